//! Error handling for warrant.
//! One error enum per subsystem, `thiserror` only.

pub mod coherence_error;
pub mod confidence_error;
pub mod config_error;
pub mod defeat_error;
pub mod grounding_error;
pub mod warrant_error;

pub use coherence_error::CoherenceError;
pub use confidence_error::ConfidenceError;
pub use config_error::ConfigError;
pub use defeat_error::DefeatError;
pub use grounding_error::GroundingError;
pub use warrant_error::{WarrantError, WarrantResult};

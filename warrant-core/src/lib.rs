//! # warrant-core
//!
//! Foundation crate for the warrant evidential reasoning engine.
//! Defines confidence values and their derivation operators, errors, config,
//! and constants. Every other crate in the workspace depends on this.

pub mod confidence;
pub mod config;
pub mod constants;
pub mod errors;
pub mod observability;

// Re-export the most commonly used types at the crate root.
pub use confidence::{AbsentReason, BoundBasis, CalibrationStatus, ConfidenceValue, Measurement};
pub use config::WarrantConfig;
pub use errors::{WarrantError, WarrantResult};

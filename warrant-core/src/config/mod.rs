//! Configuration system for warrant.
//! TOML-based, layered: env > file > compiled defaults.

pub mod coherence_config;
pub mod defaults;
pub mod defeat_config;
pub mod observability_config;
pub mod warrant_config;

pub use coherence_config::{CoherenceConfig, GroundingDirection, PenaltyConfig, RuleKind};
pub use defeat_config::{DefeatConfig, PriorityWeights};
pub use observability_config::ObservabilityConfig;
pub use warrant_config::WarrantConfig;

//! Tracing subscriber setup for hosts embedding the engine, plus the span
//! macros the engine crates open around their operations.

pub mod spans;

use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;
use crate::errors::ConfigError;

/// Install a global `fmt` subscriber filtered by `config.log_level`.
///
/// Returns `Ok(false)` if a global subscriber was already installed, so calling
/// this from several tests is harmless.
pub fn init_tracing(config: &ObservabilityConfig) -> Result<bool, ConfigError> {
    let filter = build_filter(config)?;
    let installed = if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
            .is_ok()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
            .is_ok()
    };
    Ok(installed)
}

/// Parse the configured filter directive.
pub fn build_filter(config: &ObservabilityConfig) -> Result<EnvFilter, ConfigError> {
    EnvFilter::try_new(&config.log_level).map_err(|e| ConfigError::ValidationFailed {
        field: "observability.log_level".to_string(),
        message: e.to_string(),
    })
}

//! Top-level warrant configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{CoherenceConfig, DefeatConfig, ObservabilityConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`WARRANT_*`)
/// 2. Config file passed to [`WarrantConfig::load`]
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WarrantConfig {
    pub coherence: CoherenceConfig,
    pub defeat: DefeatConfig,
    pub observability: ObservabilityConfig,
}

impl WarrantConfig {
    /// Load configuration from a TOML file, apply environment overrides, validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let mut config: WarrantConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string. Missing keys take defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: WarrantConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
                path: "<string>".to_string(),
                message: e.to_string(),
            })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `WARRANT_*` overrides read through `lookup`.
    ///
    /// Taking the lookup as a closure keeps the override logic testable without
    /// touching the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("WARRANT_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Some(raw) = lookup("WARRANT_MAX_DEFEAT_ITERATIONS") {
            self.defeat.max_iterations = parse_env("WARRANT_MAX_DEFEAT_ITERATIONS", &raw)?;
        }
        if let Some(raw) = lookup("WARRANT_ALLOW_CYCLES") {
            self.coherence.allow_cycles = parse_env("WARRANT_ALLOW_CYCLES", &raw)?;
        }
        if let Some(raw) = lookup("WARRANT_MIN_GROUNDING_STRENGTH") {
            self.coherence.min_grounding_strength =
                parse_env("WARRANT_MIN_GROUNDING_STRENGTH", &raw)?;
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(config: &WarrantConfig) -> Result<(), ConfigError> {
        let floor = config.coherence.min_grounding_strength;
        if !(0.0..=1.0).contains(&floor) {
            return Err(ConfigError::ValidationFailed {
                field: "coherence.min_grounding_strength".to_string(),
                message: "must be between 0.0 and 1.0".to_string(),
            });
        }
        if config.coherence.max_objects == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "coherence.max_objects".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        let p = &config.coherence.penalties;
        for (field, value) in [
            ("coherence.penalties.error", p.error),
            ("coherence.penalties.warning", p.warning),
            ("coherence.penalties.info", p.info),
            ("coherence.penalties.ungrounded_weight", p.ungrounded_weight),
            ("coherence.penalties.partial_weight", p.partial_weight),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        if config.defeat.max_iterations == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "defeat.max_iterations".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        let w = &config.defeat.priority_weights;
        if w.specificity < 0.0 || w.recency < 0.0 || w.reliability < 0.0 || w.total() <= 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "defeat.priority_weights".to_string(),
                message: "weights must be non-negative with a positive sum".to_string(),
            });
        }
        if config.defeat.recency_half_life_days <= 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "defeat.recency_half_life_days".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::ValidationFailed {
            field: key.to_string(),
            message: format!("cannot parse {raw:?}"),
        })
}

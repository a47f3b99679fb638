use serde::{Deserialize, Serialize};

use super::defaults;

/// Weights combining specificity, recency and reliability into one priority score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityWeights {
    pub specificity: f64,
    pub recency: f64,
    pub reliability: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            specificity: defaults::DEFAULT_SPECIFICITY_WEIGHT,
            recency: defaults::DEFAULT_RECENCY_WEIGHT,
            reliability: defaults::DEFAULT_RELIABILITY_WEIGHT,
        }
    }
}

impl PriorityWeights {
    pub fn total(&self) -> f64 {
        self.specificity + self.recency + self.reliability
    }
}

/// Defeat resolution configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefeatConfig {
    /// Upper bound on labelling steps before remaining nodes are declared undecided.
    pub max_iterations: usize,
    pub recency_half_life_days: f64,
    pub priority_weights: PriorityWeights,
}

impl Default for DefeatConfig {
    fn default() -> Self {
        Self {
            max_iterations: defaults::DEFAULT_MAX_DEFEAT_ITERATIONS,
            recency_half_life_days: defaults::DEFAULT_RECENCY_HALF_LIFE_DAYS,
            priority_weights: PriorityWeights::default(),
        }
    }
}

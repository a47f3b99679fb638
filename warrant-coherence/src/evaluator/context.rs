use warrant_core::config::defaults;
use warrant_core::WarrantConfig;

/// Per-call evaluation settings. Network-level policy lives in the
/// network's own `CoherenceConfig`.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationContext {
    /// Bound on defeat labelling steps.
    pub max_defeat_iterations: usize,
    /// Compute per-object diagnostics. Remediation is produced either way.
    pub diagnostics: bool,
}

impl Default for EvaluationContext {
    fn default() -> Self {
        Self {
            max_defeat_iterations: defaults::DEFAULT_MAX_DEFEAT_ITERATIONS,
            diagnostics: true,
        }
    }
}

impl EvaluationContext {
    pub fn from_config(config: &WarrantConfig) -> Self {
        Self {
            max_defeat_iterations: config.defeat.max_iterations,
            ..Self::default()
        }
    }

    pub fn without_diagnostics(mut self) -> Self {
        self.diagnostics = false;
        self
    }
}

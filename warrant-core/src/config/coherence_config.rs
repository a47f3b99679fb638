use serde::{Deserialize, Serialize};

use super::defaults;

/// Direction in which positive grounding must flow between levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GroundingDirection {
    /// Grounds come from strictly lower level positions.
    #[default]
    BottomUp,
    /// Grounds come from strictly higher level positions.
    TopDown,
    /// Any level may ground any other; the level-grounding rule passes.
    Bidirectional,
}

/// The coherence rules the evaluator knows how to run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    NoContradictions,
    Acyclicity,
    LevelGrounding,
    MinimumGrounding,
    Coverage,
    EntrenchmentOrdering,
    /// Structural integrity of deserialized networks. Always evaluated.
    Integrity,
    /// A caller-registered rule.
    Custom(String),
}

impl RuleKind {
    /// The built-in rules enabled by default, in evaluation order.
    pub const DEFAULTS: [RuleKind; 6] = [
        Self::NoContradictions,
        Self::Acyclicity,
        Self::LevelGrounding,
        Self::MinimumGrounding,
        Self::Coverage,
        Self::EntrenchmentOrdering,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::NoContradictions => "no_contradictions",
            Self::Acyclicity => "acyclicity",
            Self::LevelGrounding => "level_grounding",
            Self::MinimumGrounding => "minimum_grounding",
            Self::Coverage => "coverage",
            Self::EntrenchmentOrdering => "entrenchment_ordering",
            Self::Integrity => "integrity",
            Self::Custom(name) => name.as_str(),
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score deductions applied by the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyConfig {
    pub error: f64,
    pub warning: f64,
    pub info: f64,
    /// Multiplied by the fraction of active objects that are ungrounded.
    pub ungrounded_weight: f64,
    /// Multiplied by the fraction of active objects that are partially grounded.
    pub partial_weight: f64,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            error: defaults::DEFAULT_ERROR_PENALTY,
            warning: defaults::DEFAULT_WARNING_PENALTY,
            info: defaults::DEFAULT_INFO_PENALTY,
            ungrounded_weight: defaults::DEFAULT_UNGROUNDED_WEIGHT,
            partial_weight: defaults::DEFAULT_PARTIAL_WEIGHT,
        }
    }
}

/// Coherence network configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoherenceConfig {
    pub grounding_direction: GroundingDirection,
    /// Disables the acyclicity rule.
    pub allow_cycles: bool,
    /// Also permits two objects to ground each other. Only honored with `allow_cycles`.
    pub allow_mutual_grounding: bool,
    /// Rules to evaluate, in order.
    pub rules: Vec<RuleKind>,
    /// Size cap on the number of objects.
    pub max_objects: usize,
    /// Floor on summed positive grounding strength.
    pub min_grounding_strength: f64,
    pub penalties: PenaltyConfig,
}

impl Default for CoherenceConfig {
    fn default() -> Self {
        Self {
            grounding_direction: GroundingDirection::default(),
            allow_cycles: false,
            allow_mutual_grounding: false,
            rules: RuleKind::DEFAULTS.to_vec(),
            max_objects: defaults::DEFAULT_MAX_OBJECTS,
            min_grounding_strength: defaults::DEFAULT_MIN_GROUNDING_STRENGTH,
            penalties: PenaltyConfig::default(),
        }
    }
}

impl CoherenceConfig {
    /// Builder-style toggle for cycle tolerance.
    pub fn with_allow_cycles(mut self, allow: bool) -> Self {
        self.allow_cycles = allow;
        self
    }

    /// Whether two objects may ground each other.
    pub fn permits_mutual_grounding(&self) -> bool {
        self.allow_cycles && self.allow_mutual_grounding
    }

    /// Whether `rule` should run under this configuration.
    pub fn is_enabled(&self, rule: &RuleKind) -> bool {
        if *rule == RuleKind::Acyclicity && self.allow_cycles {
            return false;
        }
        *rule == RuleKind::Integrity || self.rules.contains(rule)
    }
}

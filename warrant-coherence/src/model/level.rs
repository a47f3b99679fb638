use serde::{Deserialize, Serialize};

use warrant_core::errors::CoherenceError;

/// A named tier of the network. Position 0 is foundational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbstractionLevel {
    pub name: String,
    pub position: u32,
    /// Resistance to revision in `[0, 1]`. Expected to be non-increasing as
    /// position increases; the entrenchment rule reports when it is not.
    pub entrenchment: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<String>,
}

impl AbstractionLevel {
    pub fn new(
        name: impl Into<String>,
        position: u32,
        entrenchment: f64,
    ) -> Result<Self, CoherenceError> {
        let level = Self {
            name: name.into(),
            position,
            entrenchment,
            constraints: Vec::new(),
        };
        level.validate()?;
        Ok(level)
    }

    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    pub fn is_foundational(&self) -> bool {
        self.position == 0
    }

    pub(crate) fn validate(&self) -> Result<(), CoherenceError> {
        if self.name.is_empty() {
            return Err(CoherenceError::InvalidLevel {
                name: self.name.clone(),
                reason: "name is empty".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.entrenchment) {
            return Err(CoherenceError::InvalidLevel {
                name: self.name.clone(),
                reason: format!("entrenchment {} is outside [0, 1]", self.entrenchment),
            });
        }
        Ok(())
    }
}

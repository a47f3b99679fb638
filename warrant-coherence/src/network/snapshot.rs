use serde::{Deserialize, Serialize};

use warrant_core::config::CoherenceConfig;
use warrant_core::errors::CoherenceError;

use super::CoherenceNetwork;
use crate::model::{AbstractionLevel, EpistemicObject, GroundingEdge};

/// Owned, serializable form of a [`CoherenceNetwork`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub id: String,
    pub objects: Vec<EpistemicObject>,
    pub edges: Vec<GroundingEdge>,
    #[serde(default)]
    pub levels: Vec<AbstractionLevel>,
    #[serde(default)]
    pub config: CoherenceConfig,
}

impl NetworkSnapshot {
    pub fn into_network(self) -> Result<CoherenceNetwork, CoherenceError> {
        CoherenceNetwork::build(
            self.id,
            self.objects,
            self.edges,
            self.levels,
            self.config,
            true,
        )
    }

    pub fn into_network_lenient(self) -> Result<CoherenceNetwork, CoherenceError> {
        CoherenceNetwork::build(
            self.id,
            self.objects,
            self.edges,
            self.levels,
            self.config,
            false,
        )
    }
}

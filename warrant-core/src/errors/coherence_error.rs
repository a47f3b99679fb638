use super::GroundingError;

/// Construction and mutation errors for coherence networks.
///
/// Evaluation never raises these: rule violations are returned as data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoherenceError {
    #[error("duplicate object id: {id}")]
    DuplicateObject { id: String },

    #[error("duplicate edge id: {id}")]
    DuplicateEdge { id: String },

    #[error("duplicate level: {name}")]
    DuplicateLevel { name: String },

    #[error("edge {edge_id} references unknown object {object_id}")]
    DanglingReference { edge_id: String, object_id: String },

    #[error("object {object_id} references unknown level {level}")]
    UnknownLevel { object_id: String, level: String },

    #[error("edge {edge_id} grounds {from} -> {to} but {to} already grounds {from} (edge {existing_edge_id})")]
    AsymmetryViolation {
        edge_id: String,
        from: String,
        to: String,
        existing_edge_id: String,
    },

    #[error("network capacity exceeded: {count} objects, cap {cap}")]
    CapacityExceeded { count: usize, cap: usize },

    #[error("invalid level {name}: {reason}")]
    InvalidLevel { name: String, reason: String },

    #[error("unknown object: {id}")]
    UnknownObject { id: String },

    #[error("unknown edge: {id}")]
    UnknownEdge { id: String },

    #[error("object {id} cannot move from {from} to {to}")]
    InvalidRevision { id: String, from: String, to: String },

    #[error("invalid edge {edge_id}: {source}")]
    InvalidEdge {
        edge_id: String,
        source: GroundingError,
    },

    #[error("invalid confidence on object {id}: {reason}")]
    InvalidConfidence { id: String, reason: String },
}

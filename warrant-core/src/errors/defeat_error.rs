/// Defeat graph construction and lifecycle errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DefeatError {
    #[error("duplicate node id in defeat graph: {id}")]
    DuplicateId { id: String },

    #[error("defeater {defeater_id} targets unknown node {target_id}")]
    DanglingTarget {
        defeater_id: String,
        target_id: String,
    },

    #[error("defeater {id} cannot attack itself")]
    SelfAttack { id: String },

    #[error("defeater {id} has no targets")]
    NoTargets { id: String },

    #[error("defeater strength {value} is outside [0, 1]")]
    InvalidStrength { value: f64 },

    #[error("defeater {id} cannot move from {from} to {to}")]
    InvalidTransition { id: String, from: String, to: String },

    #[error("unknown claim: {id}")]
    UnknownClaim { id: String },

    #[error("unknown defeater: {id}")]
    UnknownDefeater { id: String },
}

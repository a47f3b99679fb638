use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warrant_core::errors::CoherenceError;
use warrant_core::ConfidenceValue;

/// The stance an agent takes toward an object's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attitude {
    Accepting,
    Rejecting,
    Entertaining,
    Questioning,
    Suspending,
}

impl Attitude {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepting => "accepting",
            Self::Rejecting => "rejecting",
            Self::Entertaining => "entertaining",
            Self::Questioning => "questioning",
            Self::Suspending => "suspending",
        }
    }
}

/// Lifecycle status. Objects are never deleted; retraction is a status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum ObjectStatus {
    #[default]
    Active,
    Defeated,
    Suspended,
    Superseded,
    Retracted,
}

impl ObjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Defeated => "defeated",
            Self::Suspended => "suspended",
            Self::Superseded => "superseded",
            Self::Retracted => "retracted",
        }
    }

    /// Staying put is always allowed; `retracted` is terminal.
    pub fn can_transition_to(&self, next: ObjectStatus) -> bool {
        use ObjectStatus::*;
        if *self == next {
            return true;
        }
        match self {
            Active => true,
            Suspended => matches!(next, Active | Defeated | Superseded | Retracted),
            Defeated => matches!(next, Active | Retracted),
            Superseded => next == Retracted,
            Retracted => false,
        }
    }
}

/// One entry in an object's revision history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    pub at: DateTime<Utc>,
    pub from_status: ObjectStatus,
    pub to_status: ObjectStatus,
    pub from_attitude: Attitude,
    pub to_attitude: Attitude,
    pub reason: String,
}

/// A requested change to an object. Unset fields stay as they are.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectRevision {
    pub status: Option<ObjectStatus>,
    pub attitude: Option<Attitude>,
    pub confidence: Option<ConfidenceValue>,
    pub reason: String,
}

impl ObjectRevision {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            ..Self::default()
        }
    }

    pub fn status(mut self, status: ObjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn attitude(mut self, attitude: Attitude) -> Self {
        self.attitude = Some(attitude);
        self
    }

    pub fn confidence(mut self, confidence: ConfidenceValue) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// A node of the coherence network: a belief-like object an agent holds.
///
/// Incoming grounding edges are not stored here. The network resolves them by
/// id, so objects never reference each other directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpistemicObject {
    pub id: String,
    /// Opaque payload; only its hash participates in evaluation.
    pub content: serde_json::Value,
    pub attitude: Attitude,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<ConfidenceValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    /// Name of the abstraction level this object sits on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default)]
    pub status: ObjectStatus,
    #[serde(default)]
    pub history: Vec<Revision>,
    /// blake3 of the serialized content.
    #[serde(default)]
    pub content_hash: String,
}

impl EpistemicObject {
    /// A new active object with a generated id.
    pub fn new(content: impl Into<serde_json::Value>, attitude: Attitude) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), content, attitude)
    }

    pub fn with_id(
        id: impl Into<String>,
        content: impl Into<serde_json::Value>,
        attitude: Attitude,
    ) -> Self {
        let content = content.into();
        let content_hash = Self::compute_content_hash(&content);
        Self {
            id: id.into(),
            content,
            attitude,
            confidence: None,
            agent: None,
            level: None,
            status: ObjectStatus::Active,
            history: Vec::new(),
            content_hash,
        }
    }

    pub fn with_confidence(mut self, confidence: ConfidenceValue) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn compute_content_hash(content: &serde_json::Value) -> String {
        blake3::hash(content.to_string().as_bytes())
            .to_hex()
            .to_string()
    }

    pub fn is_active(&self) -> bool {
        self.status == ObjectStatus::Active
    }

    /// Accepting and still active: the only objects that can contradict.
    pub fn is_accepting(&self) -> bool {
        self.is_active() && self.attitude == Attitude::Accepting
    }

    /// Check the confidence payload and refresh the content hash.
    pub(crate) fn normalize(&mut self) -> Result<(), CoherenceError> {
        if let Some(confidence) = &self.confidence {
            confidence
                .validate()
                .map_err(|e| CoherenceError::InvalidConfidence {
                    id: self.id.clone(),
                    reason: e.to_string(),
                })?;
        }
        self.content_hash = Self::compute_content_hash(&self.content);
        Ok(())
    }

    /// Produce the next version of this object. `self` is left untouched so
    /// readers holding the previous version keep a consistent view.
    pub fn revise(&self, revision: ObjectRevision) -> Result<EpistemicObject, CoherenceError> {
        let to_status = revision.status.unwrap_or(self.status);
        if !self.status.can_transition_to(to_status) {
            return Err(CoherenceError::InvalidRevision {
                id: self.id.clone(),
                from: self.status.as_str().to_string(),
                to: to_status.as_str().to_string(),
            });
        }
        let to_attitude = revision.attitude.unwrap_or(self.attitude);

        let mut next = self.clone();
        if let Some(confidence) = revision.confidence {
            next.confidence = Some(confidence);
        }
        next.status = to_status;
        next.attitude = to_attitude;
        next.history.push(Revision {
            at: Utc::now(),
            from_status: self.status,
            to_status,
            from_attitude: self.attitude,
            to_attitude,
            reason: revision.reason,
        });
        next.normalize()?;
        Ok(next)
    }
}

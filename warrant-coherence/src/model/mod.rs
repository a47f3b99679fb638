//! Network building blocks: objects, grounding edges, abstraction levels.

pub mod grounding;
pub mod level;
pub mod object;

pub use grounding::{construct_grounding, GroundingEdge, GroundingStrength, GroundingType};
pub use level::AbstractionLevel;
pub use object::{Attitude, EpistemicObject, ObjectRevision, ObjectStatus, Revision};

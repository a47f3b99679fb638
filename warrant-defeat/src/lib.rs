//! # warrant-defeat
//!
//! Argumentation calculus deciding which claims survive contradictory or
//! superseding evidence.
//!
//! Claims and defeaters are nodes; a defeater attacks one or more targets,
//! which may be claims or other defeaters (second-order defeat). Survival is
//! the grounded labelling, computed by bounded worklist iteration so circular
//! defeat ends as an explicit `undecided` label rather than a hang.

pub mod claim;
pub mod defeater;
pub mod graph;
pub mod labelling;
pub mod priority;
pub mod resolution;

pub use claim::{Claim, Support};
pub use defeater::{AttackType, Defeater, DefeaterStatus};
pub use graph::DefeatGraph;
pub use labelling::{
    compute_grounded_extension, compute_grounded_extension_with_priority, Label, LabelCause,
    LabelStep, Labelling,
};
pub use priority::{highest_priority, priority_score, recency_score};
pub use resolution::ResolutionOutcome;

//! # warrant-lattice
//!
//! Keeps confidence composition mathematically honest. Composition is modelled
//! as a bounded lattice (meet ≈ AND, join ≈ OR, top = certain, bottom =
//! absent) and the laws are checked against sample sets rather than assumed.
//!
//! - [`laws`]: generic checks for any meet/join pair and equality predicate
//! - [`pairs`]: the registered lattices and [`pairs::verify_registered_pairs`]
//! - [`samples`]: deterministic sample sets
//! - [`tracker`]: running calibration status through a named sequence of operations

pub mod laws;
pub mod pairs;
pub mod samples;
pub mod tracker;

pub use laws::{Counterexample, Law, LawCheck, LawChecker, LawReport, Operation};
pub use pairs::{
    CalibrationLattice, ConfidenceLattice, FnLattice, LatticePair, ProbabilityLattice,
};
pub use tracker::{CalibrationTracker, TraceStep};

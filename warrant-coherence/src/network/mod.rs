//! The coherence network: id-keyed storage, mutation, snapshots.

pub mod coherence_network;
pub mod index;
pub mod snapshot;

pub use coherence_network::CoherenceNetwork;
pub use index::NetworkIndex;
pub use snapshot::NetworkSnapshot;

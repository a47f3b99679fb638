//! Span definitions per operation: evaluation, defeat labelling, network revision.

/// Create an evaluation span.
#[macro_export]
macro_rules! evaluate_span {
    ($network_id:expr, $objects:expr, $edges:expr) => {
        tracing::info_span!(
            "warrant.evaluate",
            network_id = %$network_id,
            objects = $objects,
            edges = $edges
        )
    };
}

/// Create a defeat labelling span.
#[macro_export]
macro_rules! defeat_label_span {
    ($claims:expr, $defeaters:expr) => {
        tracing::info_span!("warrant.defeat.label", claims = $claims, defeaters = $defeaters)
    };
}

/// Create a network revision span.
#[macro_export]
macro_rules! network_revise_span {
    ($network_id:expr, $object_id:expr) => {
        tracing::info_span!(
            "warrant.network.revise",
            network_id = %$network_id,
            object_id = %$object_id
        )
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const EVALUATE: &str = "warrant.evaluate";
    pub const DEFEAT_LABEL: &str = "warrant.defeat.label";
    pub const NETWORK_REVISE: &str = "warrant.network.revise";
}

//! Applying a labelling back onto stored defeater statuses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warrant_core::config::DefeatConfig;
use warrant_core::errors::DefeatError;

use crate::defeater::Defeater;
use crate::graph::DefeatGraph;
use crate::labelling::{Label, Labelling};
use crate::priority;

/// What [`DefeatGraph::resolve`] changed and concluded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionOutcome {
    /// Active defeaters labelled `out`, now marked defeated.
    pub newly_defeated: Vec<String>,
    /// Active defeaters labelled `in`; they keep attacking.
    pub standing: Vec<String>,
    /// Claims labelled `in`.
    pub surviving_claims: Vec<String>,
    /// Claims labelled `out`.
    pub defeated_claims: Vec<String>,
    /// Claims and defeaters labelled `undecided`.
    pub undecided: Vec<String>,
}

impl DefeatGraph {
    /// Mark every active defeater the labelling put `out` as defeated.
    ///
    /// Undecided defeaters stay active. Ids the labelling does not know are
    /// left untouched.
    pub fn resolve(&mut self, labelling: &Labelling) -> Result<ResolutionOutcome, DefeatError> {
        let mut outcome = ResolutionOutcome::default();

        let active: Vec<String> = self
            .defeaters()
            .filter(|d| d.is_active())
            .map(|d| d.id.clone())
            .collect();
        for id in active {
            match labelling.label(&id) {
                Some(Label::Out) => {
                    self.mark_defeated(&id)?;
                    outcome.newly_defeated.push(id);
                }
                Some(Label::In) => outcome.standing.push(id),
                Some(Label::Undecided) => outcome.undecided.push(id),
                None => {}
            }
        }

        for claim in self.claims() {
            match labelling.label(&claim.id) {
                Some(Label::In) => outcome.surviving_claims.push(claim.id.clone()),
                Some(Label::Out) => outcome.defeated_claims.push(claim.id.clone()),
                Some(Label::Undecided) => outcome.undecided.push(claim.id.clone()),
                None => {}
            }
        }
        outcome.undecided.sort();

        tracing::debug!(
            defeated = outcome.newly_defeated.len(),
            surviving = outcome.surviving_claims.len(),
            undecided = outcome.undecided.len(),
            "defeat graph resolved"
        );
        Ok(outcome)
    }

    /// Among the active defeaters targeting `id`, the one that wins a
    /// resolution choice: highest priority, ties to the smallest id.
    pub fn prevailing_defeater(
        &self,
        id: &str,
        config: &DefeatConfig,
        now: DateTime<Utc>,
    ) -> Option<&Defeater> {
        priority::highest_priority(self.active_defeaters_of(id), config, now)
    }
}

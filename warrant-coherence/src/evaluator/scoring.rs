use warrant_core::config::PenaltyConfig;

use super::violation::Violation;
use crate::rules::GroundingStatus;

/// 1.0, minus a fixed penalty per violation by severity, minus weighted
/// fractions of ungrounded and partially grounded active objects. Clamped.
pub fn score(
    violations: &[Violation],
    statuses: &[GroundingStatus],
    penalties: &PenaltyConfig,
) -> f64 {
    let deducted: f64 = violations
        .iter()
        .map(|v| v.severity.penalty(penalties))
        .sum();

    let active = statuses
        .iter()
        .filter(|s| **s != GroundingStatus::Inactive)
        .count();
    let fraction = |wanted: GroundingStatus| {
        if active == 0 {
            0.0
        } else {
            statuses.iter().filter(|s| **s == wanted).count() as f64 / active as f64
        }
    };

    let raw = 1.0
        - deducted
        - penalties.ungrounded_weight * fraction(GroundingStatus::Ungrounded)
        - penalties.partial_weight * fraction(GroundingStatus::Partial);
    raw.clamp(0.0, 1.0)
}

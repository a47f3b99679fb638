//! Tie-break priority among competing defeaters.

use chrono::{DateTime, Utc};

use warrant_core::config::DefeatConfig;

use crate::defeater::Defeater;

/// Recency in `[0, 1]`: 1 for a defeater created at `now`, halving every
/// `half_life_days`. Creation times in the future count as fresh.
pub fn recency_score(created_at: DateTime<Utc>, now: DateTime<Utc>, half_life_days: f64) -> f64 {
    let age_days = (now - created_at).num_seconds().max(0) as f64 / 86_400.0;
    if half_life_days <= 0.0 {
        return if age_days == 0.0 { 1.0 } else { 0.0 };
    }
    0.5_f64.powf(age_days / half_life_days)
}

/// Weighted combination of specificity, recency and reliability, normalized
/// by the weight total.
pub fn priority_score(defeater: &Defeater, config: &DefeatConfig, now: DateTime<Utc>) -> f64 {
    let w = &config.priority_weights;
    let total = w.total();
    if total <= 0.0 {
        return 0.0;
    }
    let recency = recency_score(defeater.created_at, now, config.recency_half_life_days);
    (w.specificity * defeater.specificity + w.recency * recency + w.reliability * defeater.reliability)
        / total
}

/// Highest-priority defeater among `candidates`; ties go to the smallest id.
pub fn highest_priority<'a, I>(
    candidates: I,
    config: &DefeatConfig,
    now: DateTime<Utc>,
) -> Option<&'a Defeater>
where
    I: IntoIterator<Item = &'a Defeater>,
{
    candidates
        .into_iter()
        .map(|d| (priority_score(d, config, now), d))
        .fold(None, |best: Option<(f64, &Defeater)>, (score, d)| match best {
            Some((best_score, best_d))
                if best_score > score || (best_score == score && best_d.id <= d.id) =>
            {
                Some((best_score, best_d))
            }
            _ => Some((score, d)),
        })
        .map(|(_, d)| d)
}

use serde::{Deserialize, Serialize};

/// Whether a confidence value still carries calibrated meaning.
///
/// Ordered from best to worst; composition always takes the worst input, so a
/// derived value can never be better calibrated than what it was built from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationStatus {
    Preserved,
    Degraded,
    #[default]
    Unknown,
}

impl CalibrationStatus {
    pub const ALL: [CalibrationStatus; 3] = [Self::Preserved, Self::Degraded, Self::Unknown];

    /// Worst of the two.
    pub fn combine(self, other: Self) -> Self {
        self.max(other)
    }

    /// Worst of all, `Preserved` for an empty iterator.
    pub fn combine_all<I: IntoIterator<Item = Self>>(statuses: I) -> Self {
        statuses
            .into_iter()
            .fold(Self::Preserved, CalibrationStatus::combine)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preserved => "preserved",
            Self::Degraded => "degraded",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for CalibrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

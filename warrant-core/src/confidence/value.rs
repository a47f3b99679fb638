use serde::{Deserialize, Serialize};

use super::calibration::CalibrationStatus;
use super::interval::{check_unit, Interval};
use super::measurement::Measurement;
use crate::constants::ABSENT_EFFECTIVE_CONFIDENCE;
use crate::errors::ConfidenceError;

/// How sure the system is about something, with mandatory provenance.
///
/// Exactly one variant applies. Payloads are only reachable through getters,
/// so a value is immutable once constructed, and `Absent` has no number to
/// read by accident. Use [`ConfidenceValue::effective_value`] when a caller
/// genuinely needs a scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConfidenceValue {
    /// Logically certain outcome (0 or 1).
    Deterministic(DeterministicConfidence),
    /// Computed from other confidence values by a named formula.
    Derived(DerivedConfidence),
    /// Backed by an empirical measurement.
    Measured(MeasuredConfidence),
    /// Known only to lie within an interval.
    Bounded(BoundedConfidence),
    /// No meaningful value exists.
    Absent(AbsentConfidence),
}

/// Discriminant of [`ConfidenceValue`], for display and matching without payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceKind {
    Deterministic,
    Derived,
    Measured,
    Bounded,
    Absent,
}

impl ConfidenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deterministic => "deterministic",
            Self::Derived => "derived",
            Self::Measured => "measured",
            Self::Bounded => "bounded",
            Self::Absent => "absent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeterministicConfidence {
    value: f64,
    reason: String,
}

impl DeterministicConfidence {
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// A named input of a derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivationInput {
    pub name: String,
    pub confidence: ConfidenceValue,
}

impl DerivationInput {
    pub fn new(name: impl Into<String>, confidence: ConfidenceValue) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedConfidence {
    value: f64,
    /// Upper end when interval inputs widened the result; `value` is the lower end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    upper: Option<f64>,
    formula: String,
    inputs: Vec<DerivationInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    calibration: Option<CalibrationStatus>,
}

impl DerivedConfidence {
    /// Assemble a derived value whose numbers the caller has already range-checked.
    pub(crate) fn from_parts(
        value: f64,
        upper: Option<f64>,
        formula: impl Into<String>,
        inputs: Vec<DerivationInput>,
        calibration: Option<CalibrationStatus>,
    ) -> Self {
        Self {
            value,
            upper,
            formula: formula.into(),
            inputs,
            calibration,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn upper(&self) -> Option<f64> {
        self.upper
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn inputs(&self) -> &[DerivationInput] {
        &self.inputs
    }

    pub fn calibration(&self) -> Option<CalibrationStatus> {
        self.calibration
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasuredConfidence {
    value: f64,
    measurement: Measurement,
}

impl MeasuredConfidence {
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn measurement(&self) -> &Measurement {
        &self.measurement
    }
}

/// Where an interval bound comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundBasis {
    Theoretical,
    Literature,
    FormalAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundedConfidence {
    low: f64,
    high: f64,
    basis: BoundBasis,
    citation: String,
}

impl BoundedConfidence {
    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn basis(&self) -> BoundBasis {
        self.basis
    }

    pub fn citation(&self) -> &str {
        &self.citation
    }
}

/// Why no value exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsentReason {
    Uncalibrated,
    InsufficientData,
    NotApplicable,
}

impl AbsentReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uncalibrated => "uncalibrated",
            Self::InsufficientData => "insufficient_data",
            Self::NotApplicable => "not_applicable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsentConfidence {
    reason: AbsentReason,
}

impl AbsentConfidence {
    pub fn reason(&self) -> AbsentReason {
        self.reason
    }
}

impl ConfidenceValue {
    /// A logically certain outcome. Fails unless `value` is exactly 0 or 1.
    pub fn deterministic(value: f64, reason: impl Into<String>) -> Result<Self, ConfidenceError> {
        if value != 0.0 && value != 1.0 {
            return Err(ConfidenceError::NonBinaryDeterministic { value });
        }
        Ok(Self::Deterministic(DeterministicConfidence {
            value,
            reason: reason.into(),
        }))
    }

    /// Deterministic 1.0, the top of the confidence lattice.
    pub fn certain(reason: impl Into<String>) -> Self {
        Self::Deterministic(DeterministicConfidence {
            value: 1.0,
            reason: reason.into(),
        })
    }

    /// Deterministic 0.0.
    pub fn impossible(reason: impl Into<String>) -> Self {
        Self::Deterministic(DeterministicConfidence {
            value: 0.0,
            reason: reason.into(),
        })
    }

    /// A value computed by `formula` from `inputs`.
    pub fn derived(
        value: f64,
        formula: impl Into<String>,
        inputs: Vec<DerivationInput>,
        calibration: Option<CalibrationStatus>,
    ) -> Result<Self, ConfidenceError> {
        let formula = formula.into();
        check_unit("derived.value", value)?;
        if inputs.is_empty() {
            return Err(ConfidenceError::MissingInputs { formula });
        }
        Ok(Self::Derived(DerivedConfidence::from_parts(
            value,
            None,
            formula,
            inputs,
            calibration,
        )))
    }

    /// A value backed by an external measurement.
    pub fn measured(value: f64, measurement: Measurement) -> Result<Self, ConfidenceError> {
        check_unit("measured.value", value)?;
        measurement.validate()?;
        Ok(Self::Measured(MeasuredConfidence { value, measurement }))
    }

    /// A value known only to lie in `[low, high]`.
    pub fn bounded(
        low: f64,
        high: f64,
        basis: BoundBasis,
        citation: impl Into<String>,
    ) -> Result<Self, ConfidenceError> {
        Interval::new(low, high)?;
        Ok(Self::Bounded(BoundedConfidence {
            low,
            high,
            basis,
            citation: citation.into(),
        }))
    }

    /// First-class "unknown".
    pub fn absent(reason: AbsentReason) -> Self {
        Self::Absent(AbsentConfidence { reason })
    }

    pub fn kind(&self) -> ConfidenceKind {
        match self {
            Self::Deterministic(_) => ConfidenceKind::Deterministic,
            Self::Derived(_) => ConfidenceKind::Derived,
            Self::Measured(_) => ConfidenceKind::Measured,
            Self::Bounded(_) => ConfidenceKind::Bounded,
            Self::Absent(_) => ConfidenceKind::Absent,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent(_))
    }

    pub fn absent_reason(&self) -> Option<AbsentReason> {
        match self {
            Self::Absent(a) => Some(a.reason),
            _ => None,
        }
    }

    /// The point value, when the variant has one.
    ///
    /// `None` for `Bounded` and `Absent`. A derived value widened by interval
    /// inputs reports its lower end.
    pub fn numeric_value(&self) -> Option<f64> {
        match self {
            Self::Deterministic(d) => Some(d.value),
            Self::Derived(d) => Some(d.value),
            Self::Measured(m) => Some(m.value),
            Self::Bounded(_) | Self::Absent(_) => None,
        }
    }

    /// The range this value occupies; `None` only for `Absent`.
    pub fn interval(&self) -> Option<Interval> {
        match self {
            Self::Deterministic(d) => Some(Interval::point(d.value)),
            Self::Derived(d) => Some(match d.upper {
                Some(upper) => Interval::from_bounds(d.value, upper),
                None => Interval::point(d.value),
            }),
            Self::Measured(m) => Some(Interval::point(m.value)),
            Self::Bounded(b) => Some(Interval::from_bounds(b.low, b.high)),
            Self::Absent(_) => None,
        }
    }

    /// Conservative scalar: the lower bound for intervals, 0 for `Absent`.
    pub fn effective_value(&self) -> f64 {
        match self.interval() {
            Some(interval) => interval.low(),
            None => ABSENT_EFFECTIVE_CONFIDENCE,
        }
    }

    /// Calibration status this value contributes to anything derived from it.
    pub fn calibration_status(&self) -> CalibrationStatus {
        match self {
            Self::Deterministic(_) | Self::Measured(_) => CalibrationStatus::Preserved,
            Self::Derived(d) => d.calibration.unwrap_or(CalibrationStatus::Unknown),
            Self::Bounded(_) => CalibrationStatus::Degraded,
            Self::Absent(_) => CalibrationStatus::Unknown,
        }
    }

    /// Re-check constructor invariants, recursively for derived inputs.
    ///
    /// Construction through the public constructors cannot fail this; it exists
    /// for values that arrived through deserialization.
    pub fn validate(&self) -> Result<(), ConfidenceError> {
        let mut stack = vec![self];
        while let Some(current) = stack.pop() {
            match current {
                Self::Deterministic(d) => {
                    if d.value != 0.0 && d.value != 1.0 {
                        return Err(ConfidenceError::NonBinaryDeterministic { value: d.value });
                    }
                }
                Self::Derived(d) => {
                    check_unit("derived.value", d.value)?;
                    if let Some(upper) = d.upper {
                        Interval::new(d.value, upper)?;
                    }
                    if d.inputs.is_empty() {
                        return Err(ConfidenceError::MissingInputs {
                            formula: d.formula.clone(),
                        });
                    }
                    stack.extend(d.inputs.iter().map(|i| &i.confidence));
                }
                Self::Measured(m) => {
                    check_unit("measured.value", m.value)?;
                    m.measurement.validate()?;
                }
                Self::Bounded(b) => {
                    Interval::new(b.low, b.high)?;
                }
                Self::Absent(_) => {}
            }
        }
        Ok(())
    }
}

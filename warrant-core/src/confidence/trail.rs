//! Flattened derivation trail for audit display.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::{ConfidenceKind, ConfidenceValue};

/// One node of a derivation tree, in pre-order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailEntry {
    /// 0 for the value itself, 1 for its direct inputs, and so on.
    pub depth: usize,
    /// Input name under the parent derivation; `None` at the root.
    pub name: Option<String>,
    pub kind: ConfidenceKind,
    /// Formula, reason, dataset, citation or absence reason.
    pub detail: String,
    /// Lower end of the value's range; `None` for `Absent`.
    pub value: Option<f64>,
}

impl ConfidenceValue {
    /// Walk the derivation tree with an explicit stack, pre-order.
    pub fn trail(&self) -> Vec<TrailEntry> {
        let mut entries = Vec::new();
        let mut stack: Vec<(usize, Option<&str>, &ConfidenceValue)> = vec![(0, None, self)];
        while let Some((depth, name, value)) = stack.pop() {
            entries.push(TrailEntry {
                depth,
                name: name.map(str::to_string),
                kind: value.kind(),
                detail: detail_of(value),
                value: value.interval().map(|i| i.low()),
            });
            if let ConfidenceValue::Derived(d) = value {
                for input in d.inputs().iter().rev() {
                    stack.push((depth + 1, Some(input.name.as_str()), &input.confidence));
                }
            }
        }
        entries
    }
}

fn detail_of(value: &ConfidenceValue) -> String {
    match value {
        ConfidenceValue::Deterministic(d) => d.reason().to_string(),
        ConfidenceValue::Derived(d) => d.formula().to_string(),
        ConfidenceValue::Measured(m) => format!(
            "{} (n={})",
            m.measurement().dataset_id,
            m.measurement().sample_size
        ),
        ConfidenceValue::Bounded(b) => format!("{:?}: {}", b.basis(), b.citation()),
        ConfidenceValue::Absent(a) => a.reason().as_str().to_string(),
    }
}

impl fmt::Display for ConfidenceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deterministic(d) => write!(f, "deterministic {:.0} ({})", d.value(), d.reason()),
            Self::Derived(d) => match d.upper() {
                Some(upper) => write!(f, "derived [{:.3}, {upper:.3}] via {}", d.value(), d.formula()),
                None => write!(f, "derived {:.3} via {}", d.value(), d.formula()),
            },
            Self::Measured(m) => write!(
                f,
                "measured {:.3} on {}",
                m.value(),
                m.measurement().dataset_id
            ),
            Self::Bounded(b) => write!(f, "bounded [{:.3}, {:.3}]", b.low(), b.high()),
            Self::Absent(a) => write!(f, "absent ({})", a.reason().as_str()),
        }
    }
}

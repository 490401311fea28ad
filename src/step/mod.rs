//! Trace step representation
//!
//! This module defines [`Step`], the atomic unit of a sorting trace. A step is
//! produced once by an engine and never mutated afterwards.
//!
//! # Step Kinds
//!
//! - [`StepKind::Compare`]: two positions were compared
//! - [`StepKind::Swap`]: the working array was mutated (exchange or merge placement)
//! - [`StepKind::Finalized`]: one element reached its permanent position
//! - [`StepKind::Complete`]: the run finished; covers every position
//!
//! # Snapshots
//!
//! Every step owns a full copy of the working array as it stood when the step
//! was captured. Later mutation of the live array never reaches a step that was
//! already handed out, which is what makes random-access scrubbing possible.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Metadata attached to each step, keyed by counter or context name
pub type Metadata = BTreeMap<&'static str, MetaValue>;

/// What a step records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Compare,
    Swap,
    Finalized,
    Complete,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepKind::Compare => "COMPARE",
            StepKind::Swap => "SWAP",
            StepKind::Finalized => "FINALIZED",
            StepKind::Complete => "COMPLETE",
        };
        f.write_str(name)
    }
}

/// A single metadata value: either a counter/position or a flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    Count(u64),
    Flag(bool),
}

impl MetaValue {
    /// Get the numeric value, returns None for flags
    pub fn as_count(&self) -> Option<u64> {
        match self {
            MetaValue::Count(n) => Some(*n),
            MetaValue::Flag(_) => None,
        }
    }

    /// Get the flag value, returns None for counts
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            MetaValue::Flag(b) => Some(*b),
            MetaValue::Count(_) => None,
        }
    }
}

impl From<u64> for MetaValue {
    fn from(n: u64) -> Self {
        MetaValue::Count(n)
    }
}

impl From<usize> for MetaValue {
    fn from(n: usize) -> Self {
        MetaValue::Count(n as u64)
    }
}

impl From<bool> for MetaValue {
    fn from(b: bool) -> Self {
        MetaValue::Flag(b)
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Count(n) => write!(f, "{}", n),
            MetaValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

/// One immutable, self-describing instant of an algorithm run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step<T = f64> {
    pub kind: StepKind,
    /// Positions in the working array involved in this step
    pub indices: Vec<usize>,
    /// Values at `indices`, positionally aligned
    pub values: Vec<T>,
    pub message: String,
    /// Copy of the working array when the step was captured
    pub state: Vec<T>,
    pub metadata: Metadata,
}

impl<T: Clone> Step<T> {
    /// Capture a step, copying `state` out of the live working array
    pub fn capture(
        kind: StepKind,
        indices: Vec<usize>,
        values: Vec<T>,
        message: String,
        state: &[T],
        metadata: Metadata,
    ) -> Self {
        Step {
            kind,
            indices,
            values,
            message,
            state: state.to_vec(),
            metadata,
        }
    }

    /// Capture a step whose values are read from `state` at `indices`
    pub(crate) fn at(
        kind: StepKind,
        indices: Vec<usize>,
        message: String,
        state: &[T],
        metadata: Metadata,
    ) -> Self {
        let values = indices.iter().map(|&i| state[i].clone()).collect();
        Step::capture(kind, indices, values, message, state, metadata)
    }
}

impl<T> Step<T> {
    /// Look up a counter in the metadata
    pub fn count(&self, key: &str) -> Option<u64> {
        self.metadata.get(key).and_then(MetaValue::as_count)
    }

    /// Running comparison count at this step
    pub fn comparisons(&self) -> u64 {
        self.count("comparisons").unwrap_or(0)
    }

    /// Running mutation count at this step
    pub fn swaps(&self) -> u64 {
        self.count("swaps").unwrap_or(0)
    }

    pub fn is_complete(&self) -> bool {
        self.kind == StepKind::Complete
    }

    /// Estimate the memory usage of this step in bytes
    pub fn estimated_size(&self) -> usize {
        let element = std::mem::size_of::<T>();
        let data = (self.state.len() + self.values.len()) * element;
        let indices = self.indices.len() * std::mem::size_of::<usize>();
        // BTreeMap nodes: assume 32 bytes per entry
        let metadata = self.metadata.len() * 32;

        std::mem::size_of::<Self>() + data + indices + self.message.len() + metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_copies_state() {
        let mut live = vec![3.0, 1.0, 2.0];
        let step = Step::at(
            StepKind::Compare,
            vec![0, 1],
            "Comparing 3 and 1".to_string(),
            &live,
            Metadata::new(),
        );

        live.swap(0, 1);
        live[2] = 99.0;

        assert_eq!(step.state, vec![3.0, 1.0, 2.0]);
        assert_eq!(step.values, vec![3.0, 1.0]);
    }

    #[test]
    fn test_counters_default_to_zero() {
        let step: Step = Step::capture(
            StepKind::Complete,
            vec![],
            vec![],
            String::new(),
            &[],
            Metadata::new(),
        );
        assert_eq!(step.comparisons(), 0);
        assert_eq!(step.swaps(), 0);
        assert!(step.is_complete());
    }

    #[test]
    fn test_serialized_shape() {
        let mut metadata = Metadata::new();
        metadata.insert("comparisons", MetaValue::from(1u64));
        metadata.insert("mergePhase", MetaValue::from(true));
        let step = Step::at(
            StepKind::Swap,
            vec![1],
            "Placing 2 at position 1".to_string(),
            &[1.0, 2.0],
            metadata,
        );

        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["kind"], "swap");
        assert_eq!(json["indices"], serde_json::json!([1]));
        assert_eq!(json["values"], serde_json::json!([2.0]));
        assert_eq!(json["metadata"]["comparisons"], 1);
        assert_eq!(json["metadata"]["mergePhase"], true);
    }
}

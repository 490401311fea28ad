//! Comparator and mutator primitives shared by every engine
//!
//! - [`compare`]: total order over element values
//! - [`swap`]: in-place exchange inside an engine-owned working array
//! - [`working_copy`]: validate caller input and copy it into a private array
//! - [`Tally`]: running comparison/mutation counters

use crate::engine::errors::TraceError;
use crate::step::{MetaValue, Metadata, Step, StepKind};
use std::cmp::Ordering;
use std::fmt;

/// Values an engine can sort and describe
pub trait Element: Clone + PartialOrd + fmt::Debug + fmt::Display {}

impl<T: Clone + PartialOrd + fmt::Debug + fmt::Display> Element for T {}

/// Compare two element values
///
/// [`working_copy`] rejects any input holding a pair without an ordering, so
/// inside a run every pair orders and the `Equal` fallback is unreachable.
#[inline]
pub fn compare<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Exchange two positions of the working array
#[inline]
pub fn swap<T>(array: &mut [T], i: usize, j: usize) {
    array.swap(i, j);
}

/// Copy the caller's input into a fresh working array
///
/// Every pair is checked, including each element against itself, so NaN and
/// partial orders with incomparable members are both rejected. The reported
/// index is the later element of the first failing pair.
pub fn working_copy<T: Element>(input: &[T]) -> Result<Vec<T>, TraceError> {
    for (index, value) in input.iter().enumerate() {
        if input[..=index]
            .iter()
            .any(|earlier| value.partial_cmp(earlier).is_none())
        {
            return Err(TraceError::InvalidInput {
                index,
                value: value.to_string(),
            });
        }
    }
    Ok(input.to_vec())
}

/// Running counters for one engine run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub comparisons: u64,
    pub swaps: u64,
}

impl Tally {
    pub fn compared(&mut self) {
        self.comparisons += 1;
    }

    pub fn swapped(&mut self) {
        self.swaps += 1;
    }

    pub fn total(&self) -> u64 {
        self.comparisons + self.swaps
    }

    /// Metadata seeded with the running counters
    pub fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert("comparisons", MetaValue::Count(self.comparisons));
        metadata.insert("swaps", MetaValue::Count(self.swaps));
        metadata
    }

    /// The terminal `Complete` step covering every position of `array`
    pub fn complete<T: Clone>(&self, array: &[T]) -> Step<T> {
        let mut metadata = self.metadata();
        metadata.insert("totalOperations", MetaValue::Count(self.total()));
        Step::capture(
            StepKind::Complete,
            (0..array.len()).collect(),
            array.to_vec(),
            "Array completely sorted!".to_string(),
            array,
            metadata,
        )
    }
}

//! Insertion sort engine
//!
//! Each pass sinks element `i` into the sorted prefix by adjacent swaps. No
//! element is final before the run ends, so no `Finalized` steps are emitted.

use crate::engine::errors::TraceError;
use crate::engine::ops::{compare, swap, working_copy, Element, Tally};
use crate::step::{Metadata, Step, StepKind};
use std::cmp::Ordering;
use std::iter::FusedIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Scan,
    Test,
    Complete,
    Done,
}

/// Lazy insertion sort trace
#[derive(Debug, Clone)]
pub struct InsertionSort<T> {
    array: Vec<T>,
    tally: Tally,
    phase: Phase,
    i: usize,
    j: usize,
}

impl<T: Element> InsertionSort<T> {
    pub fn new(input: &[T]) -> Result<Self, TraceError> {
        Ok(InsertionSort {
            array: working_copy(input)?,
            tally: Tally::default(),
            phase: Phase::Scan,
            i: 1,
            j: 1,
        })
    }

    fn metadata(&self) -> Metadata {
        let mut metadata = self.tally.metadata();
        metadata.insert("pass", self.i.into());
        metadata
    }

    fn next_pass(&mut self) {
        self.i += 1;
        self.j = self.i;
    }
}

impl<T: Element> Iterator for InsertionSort<T> {
    type Item = Step<T>;

    fn next(&mut self) -> Option<Step<T>> {
        loop {
            match self.phase {
                Phase::Scan => {
                    if self.i >= self.array.len() {
                        self.phase = Phase::Complete;
                        continue;
                    }
                    if self.j == 0 {
                        self.next_pass();
                        continue;
                    }

                    let j = self.j;
                    self.tally.compared();
                    self.phase = Phase::Test;
                    let message = format!(
                        "Comparing {} and {}",
                        self.array[j - 1],
                        self.array[j]
                    );
                    return Some(Step::at(
                        StepKind::Compare,
                        vec![j - 1, j],
                        message,
                        &self.array,
                        self.metadata(),
                    ));
                }
                Phase::Test => {
                    self.phase = Phase::Scan;
                    let j = self.j;
                    if compare(&self.array[j - 1], &self.array[j]) == Ordering::Greater {
                        swap(&mut self.array, j - 1, j);
                        self.tally.swapped();
                        self.j -= 1;

                        let message = format!(
                            "Swapping {} and {}",
                            self.array[j],
                            self.array[j - 1]
                        );
                        return Some(Step::at(
                            StepKind::Swap,
                            vec![j - 1, j],
                            message,
                            &self.array,
                            self.metadata(),
                        ));
                    }
                    self.next_pass();
                }
                Phase::Complete => {
                    self.phase = Phase::Done;
                    tracing::debug!(
                        comparisons = self.tally.comparisons,
                        swaps = self.tally.swaps,
                        "insertion sort complete"
                    );
                    return Some(self.tally.complete(&self.array));
                }
                Phase::Done => return None,
            }
        }
    }
}

impl<T: Element> FusedIterator for InsertionSort<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_sinks_into_prefix() {
        let steps: Vec<_> = InsertionSort::new(&[2, 3, 1]).unwrap().collect();
        let kinds: Vec<_> = steps.iter().map(|s| s.kind).collect();

        assert_eq!(
            kinds,
            vec![
                StepKind::Compare, // 2 vs 3
                StepKind::Compare, // 3 vs 1
                StepKind::Swap,
                StepKind::Compare, // 2 vs 1
                StepKind::Swap,
                StepKind::Complete,
            ]
        );
        assert_eq!(steps[2].state, vec![2, 1, 3]);
        assert_eq!(steps[4].state, vec![1, 2, 3]);
        assert_eq!(steps[4].count("pass"), Some(2));
    }

    #[test]
    fn test_sorted_input_compares_once_per_pass() {
        let steps: Vec<_> = InsertionSort::new(&[1, 2, 3, 4]).unwrap().collect();
        let last = steps.last().unwrap();
        assert_eq!(last.comparisons(), 3);
        assert_eq!(last.swaps(), 0);
        assert!(steps.iter().all(|s| s.kind != StepKind::Finalized));
    }
}

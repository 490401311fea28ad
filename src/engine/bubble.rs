//! Bubble sort engine
//!
//! Passes over the array comparing adjacent pairs. After each pass the largest
//! unsettled element is finalized at the end of the unsorted prefix. A pass
//! without swaps ends the run early.

use crate::engine::errors::TraceError;
use crate::engine::ops::{compare, swap, working_copy, Element, Tally};
use crate::step::{Metadata, Step, StepKind};
use std::cmp::Ordering;
use std::iter::FusedIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Emit the comparison of `j` and `j + 1`, or close the pass
    Scan,
    /// Test the pair announced by the last `Compare` step
    Test,
    Finalize,
    Complete,
    Done,
}

/// Lazy bubble sort trace
#[derive(Debug, Clone)]
pub struct BubbleSort<T> {
    array: Vec<T>,
    tally: Tally,
    phase: Phase,
    pass: usize,
    j: usize,
    swapped_in_pass: bool,
}

impl<T: Element> BubbleSort<T> {
    pub fn new(input: &[T]) -> Result<Self, TraceError> {
        Ok(BubbleSort {
            array: working_copy(input)?,
            tally: Tally::default(),
            phase: Phase::Scan,
            pass: 0,
            j: 0,
            swapped_in_pass: false,
        })
    }

    fn metadata(&self) -> Metadata {
        let mut metadata = self.tally.metadata();
        metadata.insert("pass", (self.pass + 1).into());
        metadata.insert("totalPasses", self.array.len().saturating_sub(1).into());
        metadata
    }
}

impl<T: Element> Iterator for BubbleSort<T> {
    type Item = Step<T>;

    fn next(&mut self) -> Option<Step<T>> {
        let n = self.array.len();
        loop {
            match self.phase {
                Phase::Scan => {
                    if self.pass + 1 >= n {
                        self.phase = Phase::Complete;
                        continue;
                    }
                    if self.j + 1 >= n - self.pass {
                        self.phase = Phase::Finalize;
                        continue;
                    }

                    let j = self.j;
                    self.tally.compared();
                    self.phase = Phase::Test;
                    let message = format!(
                        "Comparing {} and {}",
                        self.array[j],
                        self.array[j + 1]
                    );
                    return Some(Step::at(
                        StepKind::Compare,
                        vec![j, j + 1],
                        message,
                        &self.array,
                        self.metadata(),
                    ));
                }
                Phase::Test => {
                    let j = self.j;
                    self.j += 1;
                    self.phase = Phase::Scan;

                    if compare(&self.array[j], &self.array[j + 1]) == Ordering::Greater {
                        swap(&mut self.array, j, j + 1);
                        self.tally.swapped();
                        self.swapped_in_pass = true;

                        let message = format!(
                            "Swapping {} and {}",
                            self.array[j + 1],
                            self.array[j]
                        );
                        return Some(Step::at(
                            StepKind::Swap,
                            vec![j, j + 1],
                            message,
                            &self.array,
                            self.metadata(),
                        ));
                    }
                }
                Phase::Finalize => {
                    let settled = n - self.pass - 1;
                    let mut metadata = self.metadata();
                    metadata.insert("sortedElements", (self.pass + 1).into());
                    let step = Step::at(
                        StepKind::Finalized,
                        vec![settled],
                        format!("Element {} is in its final position", self.array[settled]),
                        &self.array,
                        metadata,
                    );

                    if self.swapped_in_pass {
                        self.pass += 1;
                        self.j = 0;
                        self.swapped_in_pass = false;
                        self.phase = Phase::Scan;
                    } else {
                        self.phase = Phase::Complete;
                    }
                    return Some(step);
                }
                Phase::Complete => {
                    self.phase = Phase::Done;
                    tracing::debug!(
                        comparisons = self.tally.comparisons,
                        swaps = self.tally.swaps,
                        "bubble sort complete"
                    );
                    return Some(self.tally.complete(&self.array));
                }
                Phase::Done => return None,
            }
        }
    }
}

impl<T: Element> FusedIterator for BubbleSort<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(steps: &[Step<i32>]) -> Vec<StepKind> {
        steps.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_two_elements_out_of_order() {
        let steps: Vec<_> = BubbleSort::new(&[2, 1]).unwrap().collect();

        assert_eq!(
            kinds(&steps),
            vec![
                StepKind::Compare,
                StepKind::Swap,
                StepKind::Finalized,
                StepKind::Complete
            ]
        );
        assert_eq!(steps[1].state, vec![1, 2]);
        assert_eq!(steps[2].indices, vec![1]);
        assert_eq!(steps[2].count("sortedElements"), Some(1));
        assert_eq!(steps[3].count("totalOperations"), Some(2));
    }

    #[test]
    fn test_reverse_input_runs_every_pass() {
        let steps: Vec<_> = BubbleSort::new(&[4, 3, 2, 1]).unwrap().collect();
        let finalized: Vec<_> = steps
            .iter()
            .filter(|s| s.kind == StepKind::Finalized)
            .map(|s| s.indices[0])
            .collect();

        assert_eq!(finalized, vec![3, 2, 1]);
        let last = steps.last().unwrap();
        assert_eq!(last.state, vec![1, 2, 3, 4]);
        assert_eq!(last.comparisons(), 6);
        assert_eq!(last.swaps(), 6);
    }

    #[test]
    fn test_pass_metadata_is_one_based() {
        let mut steps = BubbleSort::new(&[3, 1, 2]).unwrap();
        let first = steps.next().unwrap();
        assert_eq!(first.count("pass"), Some(1));
        assert_eq!(first.count("totalPasses"), Some(2));
    }
}

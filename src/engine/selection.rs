//! Selection sort engine

use crate::engine::errors::TraceError;
use crate::engine::ops::{compare, swap, working_copy, Element, Tally};
use crate::step::{Metadata, Step, StepKind};
use std::cmp::Ordering;
use std::iter::FusedIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Scan,
    Test,
    Place,
    Finalize,
    Complete,
    Done,
}

/// Lazy selection sort trace
#[derive(Debug, Clone)]
pub struct SelectionSort<T> {
    array: Vec<T>,
    tally: Tally,
    phase: Phase,
    i: usize,
    j: usize,
    min: usize,
}

impl<T: Element> SelectionSort<T> {
    pub fn new(input: &[T]) -> Result<Self, TraceError> {
        Ok(SelectionSort {
            array: working_copy(input)?,
            tally: Tally::default(),
            phase: Phase::Scan,
            i: 0,
            j: 1,
            min: 0,
        })
    }

    fn metadata(&self) -> Metadata {
        let mut metadata = self.tally.metadata();
        metadata.insert("pass", (self.i + 1).into());
        metadata.insert("minIndex", self.min.into());
        metadata
    }
}

impl<T: Element> Iterator for SelectionSort<T> {
    type Item = Step<T>;

    fn next(&mut self) -> Option<Step<T>> {
        let n = self.array.len();
        loop {
            match self.phase {
                Phase::Scan => {
                    if self.i + 1 >= n {
                        self.phase = Phase::Complete;
                        continue;
                    }
                    if self.j >= n {
                        self.phase = Phase::Place;
                        continue;
                    }

                    self.tally.compared();
                    self.phase = Phase::Test;
                    let (min, j) = (self.min, self.j);
                    let message = format!(
                        "Comparing {} with current minimum {}",
                        self.array[j], self.array[min]
                    );
                    return Some(Step::at(
                        StepKind::Compare,
                        vec![min, j],
                        message,
                        &self.array,
                        self.metadata(),
                    ));
                }
                Phase::Test => {
                    if compare(&self.array[self.j], &self.array[self.min]) == Ordering::Less {
                        self.min = self.j;
                    }
                    self.j += 1;
                    self.phase = Phase::Scan;
                }
                Phase::Place => {
                    self.phase = Phase::Finalize;
                    let (i, min) = (self.i, self.min);
                    if min != i {
                        swap(&mut self.array, i, min);
                        self.tally.swapped();
                        let message =
                            format!("Swapping {} and {}", self.array[min], self.array[i]);
                        return Some(Step::at(
                            StepKind::Swap,
                            vec![i, min],
                            message,
                            &self.array,
                            self.metadata(),
                        ));
                    }
                }
                Phase::Finalize => {
                    let i = self.i;
                    let mut metadata = self.tally.metadata();
                    metadata.insert("pass", (i + 1).into());
                    metadata.insert("sortedElements", (i + 1).into());
                    let step = Step::at(
                        StepKind::Finalized,
                        vec![i],
                        format!("Element {} is in its final position", self.array[i]),
                        &self.array,
                        metadata,
                    );

                    self.i += 1;
                    self.j = self.i + 1;
                    self.min = self.i;
                    self.phase = Phase::Scan;
                    return Some(step);
                }
                Phase::Complete => {
                    self.phase = Phase::Done;
                    tracing::debug!(
                        comparisons = self.tally.comparisons,
                        swaps = self.tally.swaps,
                        "selection sort complete"
                    );
                    return Some(self.tally.complete(&self.array));
                }
                Phase::Done => return None,
            }
        }
    }
}

impl<T: Element> FusedIterator for SelectionSort<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_is_swapped_to_front() {
        let steps: Vec<_> = SelectionSort::new(&[3, 1, 2]).unwrap().collect();
        let swap = steps.iter().find(|s| s.kind == StepKind::Swap).unwrap();

        assert_eq!(swap.indices, vec![0, 1]);
        assert_eq!(swap.state, vec![1, 3, 2]);
        assert_eq!(swap.count("minIndex"), Some(1));
        assert_eq!(steps.last().unwrap().state, vec![1, 2, 3]);
    }

    #[test]
    fn test_comparison_count_is_quadratic() {
        let steps: Vec<_> = SelectionSort::new(&[5, 4, 3, 2, 1]).unwrap().collect();
        let last = steps.last().unwrap();
        assert_eq!(last.comparisons(), 10);
        assert_eq!(last.swaps(), 2);
        assert_eq!(last.state, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_sorted_input_never_swaps() {
        let steps: Vec<_> = SelectionSort::new(&[1, 2, 3, 4]).unwrap().collect();
        assert!(steps.iter().all(|s| s.kind != StepKind::Swap));
        let finalized = steps
            .iter()
            .filter(|s| s.kind == StepKind::Finalized)
            .count();
        assert_eq!(finalized, 3);
    }
}

//! Quick sort engine (Lomuto partition)
//!
//! Pending ranges live on an explicit work stack. The left sub-range is pushed
//! last so it is partitioned first, giving the same depth-first order as the
//! recursive formulation.

use crate::engine::errors::TraceError;
use crate::engine::ops::{compare, swap, working_copy, Element, Tally};
use crate::step::{Metadata, Step, StepKind};
use std::cmp::Ordering;
use std::iter::FusedIterator;

/// An index range `[low, high]` awaiting partitioning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Range {
    low: usize,
    high: usize,
    depth: usize,
}

/// In-flight Lomuto partition of one range
#[derive(Debug, Clone)]
struct Partition<T> {
    range: Range,
    pivot: T,
    /// Next slot for an element smaller than the pivot (`i + 1` in Lomuto terms)
    store: usize,
    j: usize,
    /// A `Compare` step for `j` was emitted and awaits its test
    testing: bool,
}

/// Lazy quick sort trace
#[derive(Debug, Clone)]
pub struct QuickSort<T> {
    array: Vec<T>,
    tally: Tally,
    stack: Vec<Range>,
    active: Option<Partition<T>>,
    done: bool,
}

impl<T: Element> QuickSort<T> {
    pub fn new(input: &[T]) -> Result<Self, TraceError> {
        let array = working_copy(input)?;
        let mut stack = Vec::new();
        if array.len() > 1 {
            stack.push(Range {
                low: 0,
                high: array.len() - 1,
                depth: 0,
            });
        }

        Ok(QuickSort {
            array,
            tally: Tally::default(),
            stack,
            active: None,
            done: false,
        })
    }

    fn metadata(&self, range: Range) -> Metadata {
        let mut metadata = self.tally.metadata();
        metadata.insert("depth", range.depth.into());
        metadata.insert("low", range.low.into());
        metadata.insert("high", range.high.into());
        metadata
    }

    /// Queue the two sides of a placed pivot; ranges under two elements are already settled
    fn push_children(&mut self, range: Range, pivot_index: usize) {
        let depth = range.depth + 1;
        if pivot_index + 1 < range.high {
            self.stack.push(Range {
                low: pivot_index + 1,
                high: range.high,
                depth,
            });
        }
        if pivot_index > range.low + 1 {
            self.stack.push(Range {
                low: range.low,
                high: pivot_index - 1,
                depth,
            });
        }
    }

    /// Advance the active partition by one step
    fn partition_step(&mut self, mut part: Partition<T>) -> Option<Step<T>> {
        let range = part.range;
        loop {
            if part.testing {
                part.testing = false;
                let j = part.j;
                part.j += 1;

                if compare(&self.array[j], &part.pivot) == Ordering::Less {
                    let i = part.store;
                    part.store += 1;
                    swap(&mut self.array, i, j);
                    self.tally.swapped();

                    let message = format!("Swapping {} and {}", self.array[j], self.array[i]);
                    let step = Step::at(
                        StepKind::Swap,
                        vec![i, j],
                        message,
                        &self.array,
                        self.metadata(range),
                    );
                    self.active = Some(part);
                    return Some(step);
                }
                continue;
            }

            if part.j < range.high {
                let j = part.j;
                part.testing = true;
                self.tally.compared();

                let message = format!("Comparing {} with pivot {}", self.array[j], part.pivot);
                let step = Step::at(
                    StepKind::Compare,
                    vec![j, range.high],
                    message,
                    &self.array,
                    self.metadata(range),
                );
                self.active = Some(part);
                return Some(step);
            }

            let pivot_index = part.store;
            swap(&mut self.array, pivot_index, range.high);
            self.tally.swapped();

            let mut metadata = self.metadata(range);
            metadata.insert("pivotPosition", pivot_index.into());
            let step = Step::at(
                StepKind::Finalized,
                vec![pivot_index],
                format!("Pivot {} in final position", self.array[pivot_index]),
                &self.array,
                metadata,
            );
            self.push_children(range, pivot_index);
            return Some(step);
        }
    }
}

impl<T: Element> Iterator for QuickSort<T> {
    type Item = Step<T>;

    fn next(&mut self) -> Option<Step<T>> {
        if self.done {
            return None;
        }

        if let Some(part) = self.active.take() {
            return self.partition_step(part);
        }

        if let Some(range) = self.stack.pop() {
            let part = Partition {
                range,
                pivot: self.array[range.high].clone(),
                store: range.low,
                j: range.low,
                testing: false,
            };
            return self.partition_step(part);
        }

        self.done = true;
        tracing::debug!(
            comparisons = self.tally.comparisons,
            swaps = self.tally.swaps,
            "quick sort complete"
        );
        Some(self.tally.complete(&self.array))
    }
}

impl<T: Element> FusedIterator for QuickSort<T> {}

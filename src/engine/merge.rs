//! Merge sort engine
//!
//! Splits `[left, right]` at `mid = (left + right) / 2`, sorts both halves,
//! then merges them one placement at a time. Work is driven by an explicit
//! task stack that replays the recursive call order: left half, right half,
//! merge.
//!
//! # Placement
//!
//! A placement moves the chosen value to the destination slot `k` by
//! exchanging it with whatever sits there. The displaced element is always a
//! pending element of the left run, and its new position is tracked so the
//! next comparison can still point at it. The working array therefore stays a
//! permutation of the input throughout, and every `Compare` step names the
//! slots that actually hold the two candidates. Intermediate states differ
//! from a copy-out merge, which would show duplicated values where this one
//! shows displaced left-run elements, and placement steps carry `[k, from]`
//! whenever something was moved aside.

use crate::engine::errors::TraceError;
use crate::engine::ops::{compare, swap, working_copy, Element, Tally};
use crate::step::{Metadata, Step, StepKind};
use std::cmp::Ordering;
use std::iter::FusedIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Sort {
        left: usize,
        right: usize,
        depth: usize,
    },
    Merge {
        left: usize,
        mid: usize,
        right: usize,
        depth: usize,
    },
}

/// In-flight merge of `[left, mid]` and `[mid + 1, right]`
#[derive(Debug, Clone)]
struct Merging {
    left: usize,
    mid: usize,
    right: usize,
    depth: usize,
    /// Next pending element of the left run
    i: usize,
    /// Next pending element of the right run
    j: usize,
    /// Destination slot
    k: usize,
    /// Current position of each left-run element, by original rank
    pos: Vec<usize>,
    /// Left-run rank held at each slot of `[left, right]`, if any
    owner: Vec<Option<usize>>,
    /// A `Compare` step was emitted and awaits its placement
    testing: bool,
}

impl Merging {
    fn new(left: usize, mid: usize, right: usize, depth: usize) -> Self {
        let left_len = mid - left + 1;
        let mut owner = vec![None; right - left + 1];
        for (rank, slot) in owner.iter_mut().take(left_len).enumerate() {
            *slot = Some(rank);
        }

        Merging {
            left,
            mid,
            right,
            depth,
            i: 0,
            j: 0,
            k: left,
            pos: (left..=mid).collect(),
            owner,
            testing: false,
        }
    }

    fn left_len(&self) -> usize {
        self.mid - self.left + 1
    }

    fn right_len(&self) -> usize {
        self.right - self.mid
    }

    fn left_slot(&self) -> usize {
        self.pos[self.i]
    }

    fn right_slot(&self) -> usize {
        self.mid + 1 + self.j
    }

    /// Move the element at `from` into slot `k`, returning the touched indices
    fn place<T>(&mut self, array: &mut [T], from: usize) -> Vec<usize> {
        let k = self.k;
        self.k += 1;
        if from == k {
            self.owner[k - self.left] = None;
            return vec![k];
        }

        swap(array, k, from);
        if let Some(displaced) = self.owner[k - self.left].take() {
            self.pos[displaced] = from;
            self.owner[from - self.left] = Some(displaced);
        } else {
            self.owner[from - self.left] = None;
        }
        vec![k, from]
    }
}

/// Lazy merge sort trace
#[derive(Debug, Clone)]
pub struct MergeSort<T> {
    array: Vec<T>,
    tally: Tally,
    tasks: Vec<Task>,
    active: Option<Merging>,
    done: bool,
}

impl<T: Element> MergeSort<T> {
    pub fn new(input: &[T]) -> Result<Self, TraceError> {
        let array = working_copy(input)?;
        let mut tasks = Vec::new();
        if array.len() > 1 {
            tasks.push(Task::Sort {
                left: 0,
                right: array.len() - 1,
                depth: 0,
            });
        }

        Ok(MergeSort {
            array,
            tally: Tally::default(),
            tasks,
            active: None,
            done: false,
        })
    }

    fn metadata(&self, merging: &Merging) -> Metadata {
        let mut metadata = self.tally.metadata();
        metadata.insert("depth", merging.depth.into());
        metadata.insert("left", merging.left.into());
        metadata.insert("right", merging.right.into());
        metadata.insert("mergePhase", true.into());
        metadata
    }

    fn placement(&mut self, merging: &mut Merging, from: usize) -> Step<T> {
        let indices = merging.place(&mut self.array, from);
        self.tally.swapped();

        let k = indices[0];
        let message = format!("Placing {} at position {}", self.array[k], k);
        Step::at(
            StepKind::Swap,
            indices,
            message,
            &self.array,
            self.metadata(merging),
        )
    }

    /// Advance the active merge by one step; `None` once both runs are drained
    fn merge_step(&mut self, merging: &mut Merging) -> Option<Step<T>> {
        let left_pending = merging.i < merging.left_len();
        let right_pending = merging.j < merging.right_len();

        if merging.testing {
            merging.testing = false;
            let a = merging.left_slot();
            let b = merging.right_slot();
            // Left-biased on ties to keep the sort stable
            return if compare(&self.array[a], &self.array[b]) != Ordering::Greater {
                merging.i += 1;
                Some(self.placement(merging, a))
            } else {
                merging.j += 1;
                Some(self.placement(merging, b))
            };
        }

        if left_pending && right_pending {
            let a = merging.left_slot();
            let b = merging.right_slot();
            merging.testing = true;
            self.tally.compared();

            let message = format!("Comparing {} and {}", self.array[a], self.array[b]);
            return Some(Step::at(
                StepKind::Compare,
                vec![a, b],
                message,
                &self.array,
                self.metadata(merging),
            ));
        }

        if left_pending {
            let a = merging.left_slot();
            merging.i += 1;
            return Some(self.placement(merging, a));
        }

        if right_pending {
            let b = merging.right_slot();
            merging.j += 1;
            return Some(self.placement(merging, b));
        }

        None
    }
}

impl<T: Element> Iterator for MergeSort<T> {
    type Item = Step<T>;

    fn next(&mut self) -> Option<Step<T>> {
        if self.done {
            return None;
        }

        loop {
            if let Some(mut merging) = self.active.take() {
                if let Some(step) = self.merge_step(&mut merging) {
                    self.active = Some(merging);
                    return Some(step);
                }
                continue;
            }

            match self.tasks.pop() {
                Some(Task::Sort { left, right, depth }) => {
                    if left < right {
                        let mid = left + (right - left) / 2;
                        self.tasks.push(Task::Merge {
                            left,
                            mid,
                            right,
                            depth,
                        });
                        self.tasks.push(Task::Sort {
                            left: mid + 1,
                            right,
                            depth: depth + 1,
                        });
                        self.tasks.push(Task::Sort {
                            left,
                            right: mid,
                            depth: depth + 1,
                        });
                    }
                }
                Some(Task::Merge {
                    left,
                    mid,
                    right,
                    depth,
                }) => {
                    self.active = Some(Merging::new(left, mid, right, depth));
                }
                None => {
                    self.done = true;
                    tracing::debug!(
                        comparisons = self.tally.comparisons,
                        swaps = self.tally.swaps,
                        "merge sort complete"
                    );
                    return Some(self.tally.complete(&self.array));
                }
            }
        }
    }
}

impl<T: Element> FusedIterator for MergeSort<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_of_two_singletons() {
        let steps: Vec<_> = MergeSort::new(&[5, 1]).unwrap().collect();

        assert_eq!(steps[0].kind, StepKind::Compare);
        assert_eq!(steps[0].values, vec![5, 1]);
        // 1 lands at 0 and 5 is moved aside to 1
        assert_eq!(steps[1].kind, StepKind::Swap);
        assert_eq!(steps[1].indices, vec![0, 1]);
        assert_eq!(steps[1].state, vec![1, 5]);
        // the remaining 5 is already in its slot
        assert_eq!(steps[2].indices, vec![1]);
        assert_eq!(steps[3].kind, StepKind::Complete);
    }

    #[test]
    fn test_one_placement_per_element_per_merge() {
        let steps: Vec<_> = MergeSort::new(&[5, 1, 4, 2]).unwrap().collect();
        let placements = steps.iter().filter(|s| s.kind == StepKind::Swap).count();
        let comparisons = steps.iter().filter(|s| s.kind == StepKind::Compare).count();

        // two merges of size 2, one merge of size 4
        assert_eq!(placements, 8);
        assert_eq!(comparisons, 5);
        let last = steps.last().unwrap();
        assert_eq!(last.state, vec![1, 2, 4, 5]);
        assert_eq!(last.swaps(), 8);
        assert_eq!(last.comparisons(), 5);
    }

    #[test]
    fn test_state_is_always_a_permutation() {
        let input = [9, 3, 7, 1, 8, 2, 6];
        let mut expected = input.to_vec();
        expected.sort();

        for step in MergeSort::new(&input).unwrap() {
            let mut state = step.state.clone();
            state.sort();
            assert_eq!(state, expected);
        }
    }

    #[test]
    fn test_compare_values_match_state() {
        for step in MergeSort::new(&[4, 8, 1, 3, 7, 2]).unwrap() {
            for (slot, value) in step.indices.iter().zip(&step.values) {
                assert_eq!(step.state[*slot], *value);
            }
        }
    }

    #[test]
    fn test_depth_metadata() {
        let steps: Vec<_> = MergeSort::new(&[2, 1, 4, 3]).unwrap().collect();
        assert_eq!(steps[0].count("depth"), Some(1));
        assert_eq!(steps[0].count("left"), Some(0));
        assert_eq!(steps[0].count("right"), Some(1));
        let top = steps
            .iter()
            .find(|s| s.count("left") == Some(0) && s.count("right") == Some(3))
            .unwrap();
        assert_eq!(top.count("depth"), Some(0));
        assert_eq!(top.metadata["mergePhase"].as_flag(), Some(true));
    }
}

//! Sorting engines that produce step traces
//!
//! This module provides the step-generation core:
//! - [`ops`]: comparator/mutator primitives and running counters
//! - [`errors`]: error types
//! - one lazy engine per algorithm ([`bubble`], [`quick`], [`merge`],
//!   [`selection`], [`insertion`])
//!
//! # Execution Model
//!
//! Each engine copies its input into a private working array and sorts it in
//! place, handing out one [`Step`] per iterator pull. Input validation happens
//! in the constructor, so a run either fails before its first step or yields a
//! complete trace ending in a `Complete` step. Dropping an engine part way
//! through abandons the run; steps already yielded stay valid.

pub mod bubble;
pub mod errors;
pub mod insertion;
pub mod merge;
pub mod ops;
pub mod quick;
pub mod selection;

use crate::step::Step;
use bubble::BubbleSort;
use errors::TraceError;
use insertion::InsertionSort;
use merge::MergeSort;
use ops::Element;
use quick::QuickSort;
use selection::SelectionSort;
use std::fmt;
use std::iter::FusedIterator;

/// Every algorithm that can produce a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bubble,
    Quick,
    Merge,
    Selection,
    Insertion,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Bubble,
        Algorithm::Quick,
        Algorithm::Merge,
        Algorithm::Selection,
        Algorithm::Insertion,
    ];

    /// Display name used by the registry
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Quick => "Quick Sort",
            Algorithm::Merge => "Merge Sort",
            Algorithm::Selection => "Selection Sort",
            Algorithm::Insertion => "Insertion Sort",
        }
    }

    /// Whether equal elements keep their relative order
    pub fn is_stable(self) -> bool {
        matches!(
            self,
            Algorithm::Bubble | Algorithm::Merge | Algorithm::Insertion
        )
    }

    /// Start a run over a private copy of `input`
    pub fn run<T: Element>(self, input: &[T]) -> Result<Steps<T>, TraceError> {
        tracing::debug!(algorithm = self.name(), len = input.len(), "starting run");
        let steps = match self {
            Algorithm::Bubble => Steps::Bubble(BubbleSort::new(input)?),
            Algorithm::Quick => Steps::Quick(QuickSort::new(input)?),
            Algorithm::Merge => Steps::Merge(MergeSort::new(input)?),
            Algorithm::Selection => Steps::Selection(SelectionSort::new(input)?),
            Algorithm::Insertion => Steps::Insertion(InsertionSort::new(input)?),
        };
        Ok(steps)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lazy step sequence of one run, whichever algorithm produced it
#[derive(Debug, Clone)]
pub enum Steps<T> {
    Bubble(BubbleSort<T>),
    Quick(QuickSort<T>),
    Merge(MergeSort<T>),
    Selection(SelectionSort<T>),
    Insertion(InsertionSort<T>),
}

impl<T: Element> Iterator for Steps<T> {
    type Item = Step<T>;

    fn next(&mut self) -> Option<Step<T>> {
        match self {
            Steps::Bubble(steps) => steps.next(),
            Steps::Quick(steps) => steps.next(),
            Steps::Merge(steps) => steps.next(),
            Steps::Selection(steps) => steps.next(),
            Steps::Insertion(steps) => steps.next(),
        }
    }
}

impl<T: Element> FusedIterator for Steps<T> {}

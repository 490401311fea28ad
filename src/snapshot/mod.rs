// Trace materialization for random-access replay

use crate::engine::errors::TraceError;
use crate::engine::ops::Element;
use crate::step::{Step, StepKind};
use serde::Serialize;
use std::cmp::Ordering;

/// Default materialization budget (1 GB)
pub const DEFAULT_MEMORY_LIMIT: usize = 1024 * 1024 * 1024;

/// Immutable, indexable record of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace<T = f64> {
    steps: Vec<Step<T>>,
    #[serde(skip)]
    memory: usize,
}

impl<T: Element> Trace<T> {
    /// Drain a lazy step sequence under the default memory budget
    pub fn materialize<I>(steps: I) -> Result<Self, TraceError>
    where
        I: IntoIterator<Item = Step<T>>,
    {
        Recorder::new(DEFAULT_MEMORY_LIMIT).record(steps)
    }

    /// Check the invariants every engine trace must satisfy
    pub fn verify(&self) -> Result<(), TraceError> {
        let violation = |step: usize, reason: String| -> Result<(), TraceError> {
            Err(TraceError::EngineInvariantViolation { step, reason })
        };

        let Some(last) = self.steps.last() else {
            return violation(0, "trace is empty".to_string());
        };
        let n = last.state.len();
        let mut counters = (0, 0);

        for (at, step) in self.steps.iter().enumerate() {
            if step.state.len() != n {
                return violation(
                    at,
                    format!("state has {} elements, expected {}", step.state.len(), n),
                );
            }
            if step.indices.len() != step.values.len() {
                return violation(
                    at,
                    format!(
                        "{} indices but {} values",
                        step.indices.len(),
                        step.values.len()
                    ),
                );
            }
            for (&index, value) in step.indices.iter().zip(&step.values) {
                match step.state.get(index) {
                    None => return violation(at, format!("index {} out of bounds", index)),
                    Some(current) if current != value => {
                        return violation(
                            at,
                            format!("value {:?} does not match state at {}", value, index),
                        );
                    }
                    Some(_) => {}
                }
            }

            let next = (step.comparisons(), step.swaps());
            if next.0 < counters.0 || next.1 < counters.1 {
                return violation(
                    at,
                    format!("counters went backwards: {:?} -> {:?}", counters, next),
                );
            }
            counters = next;

            if step.is_complete() && at + 1 != self.steps.len() {
                return violation(at, "Complete step before end of trace".to_string());
            }
        }

        let end = self.steps.len() - 1;
        if last.kind != StepKind::Complete {
            return violation(end, format!("trace ends with {}", last.kind));
        }
        if !last.indices.iter().copied().eq(0..n) {
            return violation(end, "Complete step does not span the array".to_string());
        }
        if let Some(total) = last.count("totalOperations") {
            if total != counters.0 + counters.1 {
                return violation(
                    end,
                    format!("totalOperations {} != {} + {}", total, counters.0, counters.1),
                );
            }
        }
        // Unordered neighbours count as unsorted
        let out_of_order = last.state.windows(2).any(|pair| {
            !matches!(
                pair[0].partial_cmp(&pair[1]),
                Some(Ordering::Less | Ordering::Equal)
            )
        });
        if out_of_order {
            return violation(end, "final state is not sorted".to_string());
        }

        Ok(())
    }
}

impl<T> Trace<T> {
    /// Get a step by index
    pub fn get(&self, index: usize) -> Option<&Step<T>> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step<T>] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step<T>> {
        self.steps.iter()
    }

    /// The terminal `Complete` step
    pub fn last(&self) -> Option<&Step<T>> {
        self.steps.last()
    }

    /// Sorted array captured by the final step
    pub fn final_state(&self) -> Option<&[T]> {
        self.steps.last().map(|step| step.state.as_slice())
    }

    /// Estimated bytes held by all steps
    pub fn memory_usage(&self) -> usize {
        self.memory
    }
}

impl<'a, T> IntoIterator for &'a Trace<T> {
    type Item = &'a Step<T>;
    type IntoIter = std::slice::Iter<'a, Step<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Collects steps into a [`Trace`] under a memory budget
#[derive(Debug)]
pub struct Recorder<T> {
    steps: Vec<Step<T>>,
    max_memory: usize,
    current_memory: usize,
}

impl<T: Element> Recorder<T> {
    pub fn new(max_memory: usize) -> Self {
        Recorder {
            steps: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a step to the trace
    pub fn push(&mut self, step: Step<T>) -> Result<(), TraceError> {
        let step_size = step.estimated_size();

        if self.current_memory + step_size > self.max_memory {
            tracing::warn!(
                current = self.current_memory,
                limit = self.max_memory,
                steps = self.steps.len(),
                "trace memory limit exceeded"
            );
            return Err(TraceError::TraceLimitExceeded {
                current: self.current_memory + step_size,
                limit: self.max_memory,
            });
        }

        tracing::trace!(index = self.steps.len(), kind = %step.kind, "recorded step");
        self.current_memory += step_size;
        self.steps.push(step);
        Ok(())
    }

    /// Pull every step from `steps`, then verify and seal the trace
    pub fn record<I>(mut self, steps: I) -> Result<Trace<T>, TraceError>
    where
        I: IntoIterator<Item = Step<T>>,
    {
        for step in steps {
            self.push(step)?;
        }
        self.finish()
    }

    pub fn finish(self) -> Result<Trace<T>, TraceError> {
        let trace = Trace {
            steps: self.steps,
            memory: self.current_memory,
        };
        trace.verify()?;
        tracing::debug!(
            steps = trace.len(),
            bytes = trace.memory_usage(),
            "trace materialized"
        );
        Ok(trace)
    }
}

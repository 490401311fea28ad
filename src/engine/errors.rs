//! Error types for trace generation and navigation
//!
//! This module defines [`TraceError`], covering every failure the crate can
//! report. Engine failures are raised before the first step is produced, so a
//! caller never receives a partial trace.

use thiserror::Error;

/// Errors produced while building, verifying, or navigating a trace
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// An input element cannot be ordered (e.g. NaN)
    #[error("invalid input: element {index} ({value}) is not comparable")]
    InvalidInput { index: usize, value: String },

    /// Registry lookup failed
    #[error("algorithm not found: {name}")]
    UnknownAlgorithm { name: String },

    /// An engine produced a step that breaks a trace invariant
    #[error("engine invariant violated at step {step}: {reason}")]
    EngineInvariantViolation { step: usize, reason: String },

    /// Materializing the trace would exceed the configured memory budget
    #[error("trace memory limit exceeded: {current} bytes used, limit is {limit}")]
    TraceLimitExceeded { current: usize, limit: usize },

    /// Playback seek past the end of the trace
    #[error("step {index} out of range for trace of {len} steps")]
    SeekOutOfRange { index: usize, len: usize },
}

impl TraceError {
    /// True for failures raised by an engine rather than by the calling layer
    pub fn is_engine_failure(&self) -> bool {
        matches!(
            self,
            TraceError::InvalidInput { .. } | TraceError::EngineInvariantViolation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_failure_is_not_engine_failure() {
        let lookup = TraceError::UnknownAlgorithm {
            name: "Bogo Sort".to_string(),
        };
        let input = TraceError::InvalidInput {
            index: 2,
            value: "NaN".to_string(),
        };

        assert!(!lookup.is_engine_failure());
        assert!(input.is_engine_failure());
        assert_eq!(lookup.to_string(), "algorithm not found: Bogo Sort");
        assert_eq!(
            input.to_string(),
            "invalid input: element 2 (NaN) is not comparable"
        );
    }
}

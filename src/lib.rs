//! # Introduction
//!
//! Sortscope runs sorting algorithms over small in-memory arrays and records
//! every comparison and mutation as a [`step::Step`] carrying a full copy of
//! the array. The recorded trace can be replayed, scrubbed, and stepped
//! backward by indexing alone, without re-running the algorithm.
//!
//! ## Pipeline
//!
//! ```text
//! Input → Engine (lazy steps) → Recorder → Trace → Player
//! ```
//!
//! 1. [`engine`] — one lazy state machine per algorithm, plus the shared
//!    comparator/mutator primitives in [`engine::ops`].
//! 2. [`step`] — the immutable step record and its metadata.
//! 3. [`registry`] — display name → [`engine::Algorithm`] lookup, grouped by
//!    category.
//! 4. [`snapshot`] — drains a run into a verified, indexable [`snapshot::Trace`]
//!    under a memory budget.
//! 5. [`playback`] — cursor with next/previous/seek/play/pause over a trace.
//!
//! ## Algorithms
//!
//! Bubble, Quick (Lomuto), Merge, Selection, Insertion.
//!
//! ```
//! use sortscope::engine::Algorithm;
//! use sortscope::snapshot::Trace;
//!
//! let trace = Trace::materialize(Algorithm::Merge.run(&[5.0, 1.0, 4.0, 2.0])?)?;
//! assert_eq!(trace.final_state(), Some(&[1.0, 2.0, 4.0, 5.0][..]));
//! # Ok::<(), sortscope::engine::errors::TraceError>(())
//! ```

pub mod engine;
pub mod playback;
pub mod registry;
pub mod snapshot;
pub mod step;

pub use engine::errors::TraceError;
pub use engine::Algorithm;
pub use snapshot::Trace;
pub use step::{Step, StepKind};

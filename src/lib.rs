//! statetrace - step-by-step state traces for algorithm visualization
//!
//! statetrace instruments classic data structures so that every mutation
//! emits a structured snapshot of the container's contents and the
//! operation just performed. The ordered snapshot sequence (the trace) is
//! what an external AR renderer replays to animate algorithm execution.
//!
//! # Quick Start
//!
//! ```ignore
//! use statetrace::{RunContext, Stack, Value};
//!
//! let capture = RunContext::capture(|ctx| {
//!     let mut stack = Stack::new(ctx)?;
//!     stack.push(3)?;
//!     stack.push(5)?;
//!     stack.pop()?;
//!     Ok::<_, statetrace::Error>(())
//! });
//!
//! let trace = capture.trace?;
//! assert_eq!(trace.len(), 4); // declare + push + push + pop
//! ```
//!
//! # Architecture
//!
//! Containers created inside a [`RunContext`] bind to its recorder; every
//! significant operation appends one snapshot. `end_run` seals the
//! recorder and runs the trace validator, the gate before a trace may be
//! handed to the upload collaborator. A trace that fails validation must
//! not be published.

// Re-export the public API from the workspace crates
pub use statetrace_core::{
    ops, Content, DoublyNode, Error, HighlightMark, NodeId, PriorityEntry, Result, RunId, Schema,
    SchemaVersion, SinglyNode, Snapshot, StructureId, StructureKind, Trace, Value,
};
pub use statetrace_engine::{
    RunCapture, RunContext, RunStatus, SnapshotSequence, StateRecorder, TraceValidator,
};
pub use statetrace_structures::{
    Array, DoublyLinkedList, PriorityQueue, Queue, SinglyLinkedList, Stack, Text, Vector,
};

//! Trace recording engine
//!
//! This crate provides the run-scoped machinery around the core data
//! model:
//! - StateRecorder: append-only, ordered snapshot log per run
//! - TraceValidator: schema + sequence validation gate
//! - RunContext: scoped binding between a run and its recorder

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod recorder;
pub mod validator;

pub use context::{RunCapture, RunContext, RunStatus};
pub use recorder::{SnapshotSequence, StateRecorder};
pub use validator::TraceValidator;

//! Run context: scoped binding between an algorithm run and its recorder
//!
//! A RunContext is an explicit object threaded through container
//! construction, not process-global state: the binding is created by
//! `begin_run`, handed to containers via `recorder()`, and consumed by
//! `end_run`, so it cannot leak into a subsequent, unrelated run.
//! Concurrent runs each hold their own context; there is no cross-run
//! shared mutable state.
//!
//! `capture` wraps a whole algorithm closure with the acquire/release
//! discipline: the recorder is sealed and validated even when the
//! algorithm fails midway, so a learner still gets the partial trace
//! showing how far execution got.

use crate::recorder::StateRecorder;
use crate::validator::TraceValidator;
use statetrace_core::{Result, RunId, Trace};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

fn now_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}

/// How a captured run finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStatus {
    /// Run in progress (begin_run called, end_run not yet called)
    Active,
    /// Algorithm returned normally
    Completed,
    /// Algorithm returned an error; the partial trace was still sealed
    Failed,
}

impl RunStatus {
    /// Check if the run is still active
    pub fn is_active(&self) -> bool {
        matches!(self, RunStatus::Active)
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Active => "Active",
            RunStatus::Completed => "Completed",
            RunStatus::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scoped association between one algorithm run and its recorder
///
/// Containers created inside the run bind to `recorder()` at
/// construction. `end_run` consumes the context, seals the recorder and
/// runs the trace validator.
#[derive(Debug)]
pub struct RunContext {
    run_id: RunId,
    recorder: Arc<StateRecorder>,
    started_at: u64,
}

impl RunContext {
    /// Begin a new run with a fresh recorder
    pub fn begin_run() -> Self {
        let run_id = RunId::new();
        debug!(%run_id, "run started");
        Self {
            run_id,
            recorder: Arc::new(StateRecorder::new()),
            started_at: now_micros(),
        }
    }

    /// The run this context belongs to
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// The recorder containers created in this run bind to
    pub fn recorder(&self) -> Arc<StateRecorder> {
        Arc::clone(&self.recorder)
    }

    /// End the run: seal the recorder, validate, produce the trace
    ///
    /// Sealing happens unconditionally; validation runs on whatever was
    /// recorded, partial or not. Consuming `self` clears the binding so
    /// it cannot leak into a later run.
    ///
    /// # Errors
    /// Fails with `TraceValidationError` when the recorded sequence does
    /// not validate; such a trace must not be published.
    pub fn end_run(self) -> Result<Trace> {
        self.recorder.seal();
        let snapshots = self.recorder.snapshots();
        let validator = TraceValidator::new();
        validator.validate(&snapshots)?;
        let ended_at = now_micros();
        debug!(run_id = %self.run_id, snapshots = snapshots.len(), "run ended");
        Ok(Trace {
            schema_version: validator.schema_version(),
            run_id: self.run_id,
            started_at: self.started_at,
            ended_at,
            snapshots,
        })
    }

    /// Run an algorithm closure under a fresh context
    ///
    /// The recorder is sealed and validated regardless of whether the
    /// closure succeeds, and the algorithm result is reported alongside
    /// whatever trace was captured.
    pub fn capture<T, E, F>(algorithm: F) -> RunCapture<T, E>
    where
        F: FnOnce(&RunContext) -> std::result::Result<T, E>,
    {
        let ctx = RunContext::begin_run();
        let run_id = ctx.run_id();
        let result = algorithm(&ctx);
        let status = if result.is_ok() {
            RunStatus::Completed
        } else {
            RunStatus::Failed
        };
        let trace = ctx.end_run();
        RunCapture {
            run_id,
            status,
            algorithm: result,
            trace,
        }
    }
}

/// Outcome of a captured run: the algorithm result plus the trace
///
/// Both halves are reported independently: a failed algorithm may still
/// carry a valid partial trace, and a completed algorithm may have
/// produced a trace that fails validation (which must not be published).
#[derive(Debug)]
pub struct RunCapture<T, E> {
    /// The run that was captured
    pub run_id: RunId,
    /// Whether the algorithm completed or failed
    pub status: RunStatus,
    /// What the algorithm closure returned
    pub algorithm: std::result::Result<T, E>,
    /// The validated trace, or the validation error
    pub trace: Result<Trace>,
}

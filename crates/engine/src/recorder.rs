//! StateRecorder: append-only, ordered snapshot log for one run
//!
//! ## Design Principles
//!
//! 1. **Single mutation point**: `append` is the only way the trace
//!    changes. No component may reorder or remove snapshots.
//!
//! 2. **Monotonic indices**: every append assigns the next contiguous
//!    index, so the renderer can replay any prefix without recomputation.
//!
//! 3. **Seal-then-freeze**: `seal` is an idempotent one-way transition to
//!    read-only. Appending to a sealed recorder is a host programming
//!    error and fails with `RecorderSealed`.

use parking_lot::Mutex;
use statetrace_core::{Error, Result, Snapshot};
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Debug, Default)]
struct RecorderInner {
    snapshots: Vec<Snapshot>,
    sealed: bool,
}

/// Append-only, ordered snapshot log for exactly one algorithm run
///
/// Shared as `Arc<StateRecorder>` by every instrumented container of the
/// run. Containers of one run are used sequentially; the mutex exists so
/// independent runs can live on separate threads without sharing state.
///
/// # Example
///
/// ```ignore
/// let recorder = Arc::new(StateRecorder::new());
/// let index = recorder.append(snapshot)?;
/// recorder.seal();
/// for snapshot in recorder.sequence() { /* replay */ }
/// ```
#[derive(Debug, Default)]
pub struct StateRecorder {
    inner: Mutex<RecorderInner>,
}

impl StateRecorder {
    /// Create a new, unsealed recorder
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RecorderInner::default()),
        }
    }

    /// Append a snapshot, assigning the next contiguous index
    ///
    /// Returns the assigned index.
    ///
    /// # Errors
    /// Fails with `RecorderSealed` once the recorder is sealed.
    pub fn append(&self, mut snapshot: Snapshot) -> Result<u64> {
        let mut inner = self.inner.lock();
        if inner.sealed {
            return Err(Error::RecorderSealed);
        }
        let index = inner.snapshots.len() as u64;
        snapshot.index = index;
        trace!(
            index,
            operation = %snapshot.operation,
            structure_id = %snapshot.structure_id,
            "snapshot appended"
        );
        inner.snapshots.push(snapshot);
        Ok(index)
    }

    /// Mark the recorder read-only; idempotent
    pub fn seal(&self) {
        let mut inner = self.inner.lock();
        if !inner.sealed {
            inner.sealed = true;
            debug!(snapshots = inner.snapshots.len(), "recorder sealed");
        }
    }

    /// Check whether the recorder has been sealed
    pub fn is_sealed(&self) -> bool {
        self.inner.lock().sealed
    }

    /// Number of recorded snapshots
    pub fn len(&self) -> usize {
        self.inner.lock().snapshots.len()
    }

    /// Check if nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clone out the full snapshot sequence in index order
    pub fn snapshots(&self) -> Vec<Snapshot> {
        self.inner.lock().snapshots.clone()
    }

    /// Lazy, restartable, finite sequence of snapshots in index order
    ///
    /// Available before or after sealing: each call starts a fresh cursor,
    /// and each step reads the snapshot at the cursor under the lock, so a
    /// sequence started mid-run observes appends that happen behind it.
    pub fn sequence(self: &Arc<Self>) -> SnapshotSequence {
        SnapshotSequence {
            recorder: Arc::clone(self),
            cursor: 0,
        }
    }
}

/// Cursor over a recorder's snapshots in index order
///
/// Finite: ends at the recorder's current length at the time each step
/// is taken.
#[derive(Debug)]
pub struct SnapshotSequence {
    recorder: Arc<StateRecorder>,
    cursor: usize,
}

impl Iterator for SnapshotSequence {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        let inner = self.recorder.inner.lock();
        let snapshot = inner.snapshots.get(self.cursor).cloned();
        if snapshot.is_some() {
            self.cursor += 1;
        }
        snapshot
    }
}

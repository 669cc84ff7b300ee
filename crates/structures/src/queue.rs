//! Instrumented FIFO queue

use statetrace_core::{
    ops, Content, Error, HighlightMark, Result, Snapshot, StructureId, StructureKind, Value,
};
use statetrace_engine::{RunContext, StateRecorder};
use std::collections::VecDeque;
use std::sync::Arc;

/// A queue that records a snapshot for every enqueue, dequeue and front
///
/// Content is recorded front-first, so position 0 of the linear payload
/// is the next element to leave.
#[derive(Debug)]
pub struct Queue {
    recorder: Arc<StateRecorder>,
    id: StructureId,
    values: VecDeque<Value>,
}

impl Queue {
    /// Create an empty queue bound to the run's recorder
    pub fn new(ctx: &RunContext) -> Result<Self> {
        let queue = Self {
            recorder: ctx.recorder(),
            id: StructureId::new(),
            values: VecDeque::new(),
        };
        queue.emit(ops::DECLARE, Vec::new())?;
        Ok(queue)
    }

    fn emit(&self, operation: &str, highlight: Vec<HighlightMark>) -> Result<()> {
        let snapshot = Snapshot::new(
            self.id,
            StructureKind::Queue,
            operation,
            Content::Linear(self.values.iter().cloned().collect()),
        )
        .with_highlight(highlight);
        self.recorder.append(snapshot)?;
        Ok(())
    }

    /// This container's stable identity within the trace
    pub fn structure_id(&self) -> StructureId {
        self.id
    }

    /// Number of elements; emits no snapshot
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check emptiness; emits no snapshot
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Add a value at the back
    pub fn enqueue(&mut self, value: impl Into<Value>) -> Result<()> {
        self.values.push_back(value.into());
        self.emit(
            ops::ENQUEUE,
            vec![HighlightMark::Position(self.values.len() - 1)],
        )
    }

    /// Remove and return the front value
    ///
    /// # Errors
    /// Fails with `StructureOperationError` on an empty queue; nothing is
    /// recorded and the content is unchanged.
    pub fn dequeue(&mut self) -> Result<Value> {
        let value = match self.values.pop_front() {
            Some(value) => value,
            None => {
                return Err(Error::invalid_operation(
                    ops::DEQUEUE,
                    StructureKind::Queue,
                    "queue is empty",
                ))
            }
        };
        self.emit(ops::DEQUEUE, vec![HighlightMark::Removed(value.clone())])?;
        Ok(value)
    }

    /// Read the front value without removing it
    ///
    /// # Errors
    /// Fails with `StructureOperationError` on an empty queue.
    pub fn front(&self) -> Result<Value> {
        match self.values.front() {
            Some(value) => {
                let value = value.clone();
                self.emit(ops::FRONT, vec![HighlightMark::Position(0)])?;
                Ok(value)
            }
            None => Err(Error::invalid_operation(
                ops::FRONT,
                StructureKind::Queue,
                "queue is empty",
            )),
        }
    }
}

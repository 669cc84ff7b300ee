//! Instrumented LIFO stack

use statetrace_core::{
    ops, Content, Error, HighlightMark, Result, Snapshot, StructureId, StructureKind, Value,
};
use statetrace_engine::{RunContext, StateRecorder};
use std::sync::Arc;

/// A stack that records a snapshot for every push, pop and peek
///
/// Content is recorded bottom-first, so the last element of the linear
/// payload is the top of the stack.
#[derive(Debug)]
pub struct Stack {
    recorder: Arc<StateRecorder>,
    id: StructureId,
    values: Vec<Value>,
}

impl Stack {
    /// Create an empty stack bound to the run's recorder
    pub fn new(ctx: &RunContext) -> Result<Self> {
        let stack = Self {
            recorder: ctx.recorder(),
            id: StructureId::new(),
            values: Vec::new(),
        };
        stack.emit(ops::DECLARE, Vec::new())?;
        Ok(stack)
    }

    fn emit(&self, operation: &str, highlight: Vec<HighlightMark>) -> Result<()> {
        let snapshot = Snapshot::new(
            self.id,
            StructureKind::Stack,
            operation,
            Content::Linear(self.values.clone()),
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

    /// Push a value onto the top
    pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
        self.values.push(value.into());
        self.emit(ops::PUSH, vec![HighlightMark::Position(self.values.len() - 1)])
    }

    /// Remove and return the top value
    ///
    /// # Errors
    /// Fails with `StructureOperationError` on an empty stack; nothing is
    /// recorded and the content is unchanged.
    pub fn pop(&mut self) -> Result<Value> {
        let value = match self.values.pop() {
            Some(value) => value,
            None => {
                return Err(Error::invalid_operation(
                    ops::POP,
                    StructureKind::Stack,
                    "stack is empty",
                ))
            }
        };
        self.emit(ops::POP, vec![HighlightMark::Removed(value.clone())])?;
        Ok(value)
    }

    /// Read the top value without removing it
    ///
    /// # Errors
    /// Fails with `StructureOperationError` on an empty stack.
    pub fn peek(&self) -> Result<Value> {
        match self.values.last() {
            Some(value) => {
                let value = value.clone();
                self.emit(ops::PEEK, vec![HighlightMark::Position(self.values.len() - 1)])?;
                Ok(value)
            }
            None => Err(Error::invalid_operation(
                ops::PEEK,
                StructureKind::Stack,
                "stack is empty",
            )),
        }
    }
}

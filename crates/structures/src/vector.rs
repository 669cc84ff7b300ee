//! Instrumented growable vector

use statetrace_core::{
    ops, Content, Error, HighlightMark, Result, Snapshot, StructureId, StructureKind, Value,
};
use statetrace_engine::{RunContext, StateRecorder};
use std::sync::Arc;

/// A growable sequence that records pushes, pops, insertions and removals
///
/// Shares the array structure kind: the renderer draws it as an ordered
/// element sequence whose length changes over time.
#[derive(Debug)]
pub struct Vector {
    recorder: Arc<StateRecorder>,
    id: StructureId,
    values: Vec<Value>,
}

impl Vector {
    /// Create an empty vector bound to the run's recorder
    pub fn new(ctx: &RunContext) -> Result<Self> {
        Self::with_values(ctx, Vec::new())
    }

    /// Create a vector from initial contents
    pub fn with_values(ctx: &RunContext, values: Vec<Value>) -> Result<Self> {
        let vector = Self {
            recorder: ctx.recorder(),
            id: StructureId::new(),
            values,
        };
        vector.emit(ops::DECLARE, Vec::new())?;
        Ok(vector)
    }

    fn emit(&self, operation: &str, highlight: Vec<HighlightMark>) -> Result<()> {
        let snapshot = Snapshot::new(
            self.id,
            StructureKind::Array,
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

    /// Append a value at the back
    pub fn push_back(&mut self, value: impl Into<Value>) -> Result<()> {
        self.values.push(value.into());
        self.emit(
            ops::PUSH_BACK,
            vec![HighlightMark::Position(self.values.len() - 1)],
        )
    }

    /// Remove and return the last value
    ///
    /// # Errors
    /// Fails with `StructureOperationError` on an empty vector.
    pub fn pop_back(&mut self) -> Result<Value> {
        let value = match self.values.pop() {
            Some(value) => value,
            None => {
                return Err(Error::invalid_operation(
                    ops::POP_BACK,
                    StructureKind::Array,
                    "vector is empty",
                ))
            }
        };
        self.emit(ops::POP_BACK, vec![HighlightMark::Removed(value.clone())])?;
        Ok(value)
    }

    /// Insert a value before `index` (index == len appends)
    ///
    /// # Errors
    /// Fails with `StructureOperationError` when `index > len`.
    pub fn insert(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
        if index > self.values.len() {
            return Err(Error::invalid_operation(
                ops::INSERT,
                StructureKind::Array,
                format!("index {} out of range for length {}", index, self.values.len()),
            ));
        }
        self.values.insert(index, value.into());
        self.emit(ops::INSERT, vec![HighlightMark::Position(index)])
    }

    /// Remove and return the value at `index`
    ///
    /// # Errors
    /// Fails with `StructureOperationError` when the index is out of range.
    pub fn remove(&mut self, index: usize) -> Result<Value> {
        if index >= self.values.len() {
            return Err(Error::invalid_operation(
                ops::REMOVE,
                StructureKind::Array,
                format!("index {} out of range for length {}", index, self.values.len()),
            ));
        }
        let value = self.values.remove(index);
        self.emit(ops::REMOVE, vec![HighlightMark::Removed(value.clone())])?;
        Ok(value)
    }

    /// Read the element at `index`
    ///
    /// # Errors
    /// Fails with `StructureOperationError` when the index is out of range.
    pub fn access(&self, index: usize) -> Result<Value> {
        if index >= self.values.len() {
            return Err(Error::invalid_operation(
                ops::ACCESS,
                StructureKind::Array,
                format!("index {} out of range for length {}", index, self.values.len()),
            ));
        }
        self.emit(ops::ACCESS, vec![HighlightMark::Position(index)])?;
        Ok(self.values[index].clone())
    }

    /// Visit every element in order, one snapshot per element
    pub fn traverse(&self) -> Result<Vec<Value>> {
        for index in 0..self.values.len() {
            self.emit(ops::TRAVERSE, vec![HighlightMark::Position(index)])?;
        }
        Ok(self.values.clone())
    }
}

//! Instrumented fixed-length array

use statetrace_core::{
    ops, Content, Error, HighlightMark, Result, Snapshot, StructureId, StructureKind, Value,
};
use statetrace_engine::{RunContext, StateRecorder};
use std::cmp::Ordering;
use std::sync::Arc;

/// A fixed-length array that records element access, assignment,
/// comparison and swaps
///
/// The length is set at construction and never changes; growable
/// sequences are covered by [`crate::Vector`].
#[derive(Debug)]
pub struct Array {
    recorder: Arc<StateRecorder>,
    id: StructureId,
    values: Vec<Value>,
}

impl Array {
    /// Create an array from initial contents, bound to the run's recorder
    pub fn with_values(ctx: &RunContext, values: Vec<Value>) -> Result<Self> {
        let array = Self {
            recorder: ctx.recorder(),
            id: StructureId::new(),
            values,
        };
        array.emit(ops::DECLARE, Vec::new())?;
        Ok(array)
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

    fn check_index(&self, operation: &str, index: usize) -> Result<()> {
        if index >= self.values.len() {
            return Err(Error::invalid_operation(
                operation,
                StructureKind::Array,
                format!("index {} out of range for length {}", index, self.values.len()),
            ));
        }
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

    /// Read the element at `index`
    ///
    /// # Errors
    /// Fails with `StructureOperationError` when the index is out of range.
    pub fn access(&self, index: usize) -> Result<Value> {
        self.check_index(ops::ACCESS, index)?;
        self.emit(ops::ACCESS, vec![HighlightMark::Position(index)])?;
        Ok(self.values[index].clone())
    }

    /// Overwrite the element at `index`
    ///
    /// # Errors
    /// Fails with `StructureOperationError` when the index is out of range.
    pub fn assign(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
        self.check_index(ops::ASSIGN, index)?;
        self.values[index] = value.into();
        self.emit(ops::ASSIGN, vec![HighlightMark::Position(index)])
    }

    /// Compare the elements at `left` and `right`
    ///
    /// # Errors
    /// Fails with `StructureOperationError` when either index is out of
    /// range or the two values have no defined order (different variants,
    /// or an unordered float).
    pub fn compare(&self, left: usize, right: usize) -> Result<Ordering> {
        self.check_index(ops::COMPARE, left)?;
        self.check_index(ops::COMPARE, right)?;
        let ordering = match self.values[left].try_cmp(&self.values[right]) {
            Some(ordering) => ordering,
            None => {
                return Err(Error::invalid_operation(
                    ops::COMPARE,
                    StructureKind::Array,
                    format!(
                        "{} and {} values are not comparable",
                        self.values[left].type_name(),
                        self.values[right].type_name()
                    ),
                ))
            }
        };
        self.emit(
            ops::COMPARE,
            vec![HighlightMark::Position(left), HighlightMark::Position(right)],
        )?;
        Ok(ordering)
    }

    /// Exchange the elements at `left` and `right`
    ///
    /// # Errors
    /// Fails with `StructureOperationError` when either index is out of range.
    pub fn swap(&mut self, left: usize, right: usize) -> Result<()> {
        self.check_index(ops::SWAP, left)?;
        self.check_index(ops::SWAP, right)?;
        self.values.swap(left, right);
        self.emit(
            ops::SWAP,
            vec![HighlightMark::Position(left), HighlightMark::Position(right)],
        )
    }

    /// Visit every element in order, one snapshot per element
    pub fn traverse(&self) -> Result<Vec<Value>> {
        for index in 0..self.values.len() {
            self.emit(ops::TRAVERSE, vec![HighlightMark::Position(index)])?;
        }
        Ok(self.values.clone())
    }
}

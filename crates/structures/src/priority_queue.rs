//! Instrumented min-heap priority queue

use statetrace_core::{
    ops, Content, Error, HighlightMark, PriorityEntry, Result, Snapshot, StructureId,
    StructureKind, Value,
};
use statetrace_engine::{RunContext, StateRecorder};
use std::sync::Arc;

/// A binary min-heap that records insertion, extraction and key decreases
///
/// Content is recorded in heap array order; lower priority is extracted
/// first. Each operation emits one snapshot after the heap has been
/// restored, so the renderer always sees a consistent heap.
#[derive(Debug)]
pub struct PriorityQueue {
    recorder: Arc<StateRecorder>,
    id: StructureId,
    entries: Vec<PriorityEntry>,
}

impl PriorityQueue {
    /// Create an empty priority queue bound to the run's recorder
    pub fn new(ctx: &RunContext) -> Result<Self> {
        let heap = Self {
            recorder: ctx.recorder(),
            id: StructureId::new(),
            entries: Vec::new(),
        };
        heap.emit(ops::DECLARE, Vec::new())?;
        Ok(heap)
    }

    fn emit(&self, operation: &str, highlight: Vec<HighlightMark>) -> Result<()> {
        let snapshot = Snapshot::new(
            self.id,
            StructureKind::PriorityQueue,
            operation,
            Content::Prioritized(self.entries.clone()),
        )
        .with_highlight(highlight);
        self.recorder.append(snapshot)?;
        Ok(())
    }

    /// This container's stable identity within the trace
    pub fn structure_id(&self) -> StructureId {
        self.id
    }

    /// Number of entries; emits no snapshot
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check emptiness; emits no snapshot
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.entries[index].priority >= self.entries[parent].priority {
                break;
            }
            self.entries.swap(index, parent);
            index = parent;
        }
        index
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;
            if left < self.entries.len()
                && self.entries[left].priority < self.entries[smallest].priority
            {
                smallest = left;
            }
            if right < self.entries.len()
                && self.entries[right].priority < self.entries[smallest].priority
            {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.entries.swap(index, smallest);
            index = smallest;
        }
    }

    /// Insert a value with a priority (lower extracts first)
    pub fn insert(&mut self, value: impl Into<Value>, priority: i64) -> Result<()> {
        self.entries.push(PriorityEntry {
            value: value.into(),
            priority,
        });
        let position = self.sift_up(self.entries.len() - 1);
        self.emit(ops::INSERT, vec![HighlightMark::Position(position)])
    }

    /// Remove and return the minimum-priority entry
    ///
    /// # Errors
    /// Fails with `StructureOperationError` on an empty queue.
    pub fn extract_min(&mut self) -> Result<PriorityEntry> {
        if self.entries.is_empty() {
            return Err(Error::invalid_operation(
                ops::EXTRACT_MIN,
                StructureKind::PriorityQueue,
                "priority queue is empty",
            ));
        }
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let entry = self.entries.remove(last);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        self.emit(
            ops::EXTRACT_MIN,
            vec![HighlightMark::Removed(entry.value.clone())],
        )?;
        Ok(entry)
    }

    /// Read the minimum-priority entry without removing it
    ///
    /// # Errors
    /// Fails with `StructureOperationError` on an empty queue.
    pub fn peek_min(&self) -> Result<PriorityEntry> {
        match self.entries.first() {
            Some(entry) => {
                let entry = entry.clone();
                self.emit(ops::PEEK_MIN, vec![HighlightMark::Position(0)])?;
                Ok(entry)
            }
            None => Err(Error::invalid_operation(
                ops::PEEK_MIN,
                StructureKind::PriorityQueue,
                "priority queue is empty",
            )),
        }
    }

    /// Lower the priority of the first entry holding `value`
    ///
    /// # Errors
    /// Fails with `StructureOperationError` when no entry holds the value
    /// or when the new priority is not strictly lower than the current
    /// one; nothing is recorded and the heap is unchanged.
    pub fn decrease_key(&mut self, value: &Value, new_priority: i64) -> Result<()> {
        let index = match self.entries.iter().position(|e| &e.value == value) {
            Some(index) => index,
            None => {
                return Err(Error::invalid_operation(
                    ops::DECREASE_KEY,
                    StructureKind::PriorityQueue,
                    format!("no entry holds value {:?}", value),
                ))
            }
        };
        let current = self.entries[index].priority;
        if new_priority >= current {
            return Err(Error::invalid_operation(
                ops::DECREASE_KEY,
                StructureKind::PriorityQueue,
                format!(
                    "new priority {} is not lower than current {}",
                    new_priority, current
                ),
            ));
        }
        self.entries[index].priority = new_priority;
        let position = self.sift_up(index);
        self.emit(ops::DECREASE_KEY, vec![HighlightMark::Position(position)])
    }
}

//! Instrumented doubly linked list
//!
//! Same arena discipline as the singly linked variant, with the extra
//! obligation that a delete updates both neighbors' links before the
//! snapshot is emitted, keeping next/prev reciprocal in every snapshot.

use statetrace_core::{
    ops, Content, DoublyNode, Error, HighlightMark, NodeId, Result, Snapshot, StructureId,
    StructureKind, Value,
};
use statetrace_engine::{RunContext, StateRecorder};
use std::sync::Arc;

#[derive(Debug)]
struct ListNode {
    value: Value,
    next: Option<NodeId>,
    prev: Option<NodeId>,
}

/// A doubly linked list that records insertions, deletions and traversal
/// in both directions
#[derive(Debug)]
pub struct DoublyLinkedList {
    recorder: Arc<StateRecorder>,
    id: StructureId,
    // Arena slots; deleted nodes leave a None and ids are never reused
    nodes: Vec<Option<ListNode>>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl DoublyLinkedList {
    /// Create an empty list bound to the run's recorder
    pub fn new(ctx: &RunContext) -> Result<Self> {
        let list = Self {
            recorder: ctx.recorder(),
            id: StructureId::new(),
            nodes: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        };
        list.emit(ops::DECLARE, Vec::new(), None)?;
        Ok(list)
    }

    fn alloc(&mut self, value: Value, next: Option<NodeId>, prev: Option<NodeId>) -> NodeId {
        let id = NodeId::from_index(self.nodes.len() as u32);
        self.nodes.push(Some(ListNode { value, next, prev }));
        id
    }

    fn node(&self, id: NodeId) -> Option<&ListNode> {
        self.nodes.get(id.index() as usize)?.as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut ListNode> {
        self.nodes.get_mut(id.index() as usize)?.as_mut()
    }

    fn content(&self) -> Vec<DoublyNode> {
        let mut entries = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while let Some(id) = cursor {
            match self.node(id) {
                Some(node) => {
                    entries.push(DoublyNode {
                        node_id: id,
                        value: node.value.clone(),
                        next: node.next,
                        prev: node.prev,
                    });
                    cursor = node.next;
                }
                None => break,
            }
        }
        entries
    }

    fn emit(
        &self,
        operation: &str,
        highlight: Vec<HighlightMark>,
        comment: Option<String>,
    ) -> Result<()> {
        let mut snapshot = Snapshot::new(
            self.id,
            StructureKind::DoublyLinkedList,
            operation,
            Content::DoublyLinked(self.content()),
        )
        .with_highlight(highlight);
        if let Some(comment) = comment {
            snapshot = snapshot.with_comment(comment);
        }
        self.recorder.append(snapshot)?;
        Ok(())
    }

    /// This container's stable identity within the trace
    pub fn structure_id(&self) -> StructureId {
        self.id
    }

    /// Number of nodes; emits no snapshot
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check emptiness; emits no snapshot
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a value as the new head
    pub fn insert_at_head(&mut self, value: impl Into<Value>) -> Result<NodeId> {
        let old_head = self.head;
        let id = self.alloc(value.into(), old_head, None);
        if let Some(old) = old_head {
            if let Some(node) = self.node_mut(old) {
                node.prev = Some(id);
            }
        } else {
            self.tail = Some(id);
        }
        self.head = Some(id);
        self.len += 1;
        self.emit(ops::INSERT_AT_HEAD, vec![HighlightMark::Node(id)], None)?;
        Ok(id)
    }

    /// Insert a value as the new tail
    pub fn insert_at_tail(&mut self, value: impl Into<Value>) -> Result<NodeId> {
        let old_tail = self.tail;
        let id = self.alloc(value.into(), None, old_tail);
        if let Some(old) = old_tail {
            if let Some(node) = self.node_mut(old) {
                node.next = Some(id);
            }
        } else {
            self.head = Some(id);
        }
        self.tail = Some(id);
        self.len += 1;
        self.emit(ops::INSERT_AT_TAIL, vec![HighlightMark::Node(id)], None)?;
        Ok(id)
    }

    /// Delete the first node holding `value`
    ///
    /// Both neighbors' links are updated before the snapshot is emitted,
    /// so the deleted node never appears as anyone's successor or
    /// predecessor.
    ///
    /// # Errors
    /// Fails with `StructureOperationError` when no node holds the value;
    /// nothing is recorded and the list is unchanged.
    pub fn delete(&mut self, value: &Value) -> Result<()> {
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let (matches, next, prev) = match self.node(id) {
                Some(node) => (&node.value == value, node.next, node.prev),
                None => break,
            };
            if matches {
                match prev {
                    Some(prev_id) => {
                        if let Some(node) = self.node_mut(prev_id) {
                            node.next = next;
                        }
                    }
                    None => self.head = next,
                }
                match next {
                    Some(next_id) => {
                        if let Some(node) = self.node_mut(next_id) {
                            node.prev = prev;
                        }
                    }
                    None => self.tail = prev,
                }
                self.nodes[id.index() as usize] = None;
                self.len -= 1;
                return self.emit(
                    ops::DELETE,
                    vec![HighlightMark::Removed(value.clone())],
                    Some(format!("deleted node {}", id)),
                );
            }
            cursor = next;
        }
        Err(Error::invalid_operation(
            ops::DELETE,
            StructureKind::DoublyLinkedList,
            format!("no node holds value {:?}", value),
        ))
    }

    /// Visit every node from the head, one snapshot per node
    pub fn traverse_forward(&self) -> Result<Vec<Value>> {
        let mut visited = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while let Some(id) = cursor {
            match self.node(id) {
                Some(node) => {
                    self.emit(ops::TRAVERSE, vec![HighlightMark::Node(id)], None)?;
                    visited.push(node.value.clone());
                    cursor = node.next;
                }
                None => break,
            }
        }
        Ok(visited)
    }

    /// Visit every node from the tail, one snapshot per node
    pub fn traverse_backward(&self) -> Result<Vec<Value>> {
        let mut visited = Vec::with_capacity(self.len);
        let mut cursor = self.tail;
        while let Some(id) = cursor {
            match self.node(id) {
                Some(node) => {
                    self.emit(ops::TRAVERSE, vec![HighlightMark::Node(id)], None)?;
                    visited.push(node.value.clone());
                    cursor = node.prev;
                }
                None => break,
            }
        }
        Ok(visited)
    }
}

//! Instrumented singly linked list
//!
//! Nodes live in an arena and are addressed by stable `NodeId`s; "no
//! successor" is an explicit `None`. A delete relinks the predecessor
//! before the snapshot is emitted, so no emitted snapshot can contain a
//! link to a node that is not part of the same snapshot.

use statetrace_core::{
    ops, Content, Error, HighlightMark, NodeId, Result, SinglyNode, Snapshot, StructureId,
    StructureKind, Value,
};
use statetrace_engine::{RunContext, StateRecorder};
use std::sync::Arc;

#[derive(Debug)]
struct ListNode {
    value: Value,
    next: Option<NodeId>,
}

/// A singly linked list that records insertions, deletions and traversal
///
/// Snapshot content lists nodes in list order, head first, each carrying
/// its own id and its successor's id so the renderer can draw the
/// pointer edges.
#[derive(Debug)]
pub struct SinglyLinkedList {
    recorder: Arc<StateRecorder>,
    id: StructureId,
    // Arena slots; deleted nodes leave a None and ids are never reused
    nodes: Vec<Option<ListNode>>,
    head: Option<NodeId>,
    len: usize,
}

impl SinglyLinkedList {
    /// Create an empty list bound to the run's recorder
    pub fn new(ctx: &RunContext) -> Result<Self> {
        let list = Self {
            recorder: ctx.recorder(),
            id: StructureId::new(),
            nodes: Vec::new(),
            head: None,
            len: 0,
        };
        list.emit(ops::DECLARE, Vec::new(), None)?;
        Ok(list)
    }

    fn alloc(&mut self, value: Value, next: Option<NodeId>) -> NodeId {
        let id = NodeId::from_index(self.nodes.len() as u32);
        self.nodes.push(Some(ListNode { value, next }));
        id
    }

    fn node(&self, id: NodeId) -> Option<&ListNode> {
        self.nodes.get(id.index() as usize)?.as_ref()
    }

    fn content(&self) -> Vec<SinglyNode> {
        let mut entries = Vec::with_capacity(self.len);
        let mut cursor = self.head;
        while let Some(id) = cursor {
            match self.node(id) {
                Some(node) => {
                    entries.push(SinglyNode {
                        node_id: id,
                        value: node.value.clone(),
                        next: node.next,
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
            StructureKind::SinglyLinkedList,
            operation,
            Content::SinglyLinked(self.content()),
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
        let id = self.alloc(value.into(), self.head);
        self.head = Some(id);
        self.len += 1;
        self.emit(ops::INSERT_AT_HEAD, vec![HighlightMark::Node(id)], None)?;
        Ok(id)
    }

    /// Insert a value as the new tail
    pub fn insert_at_tail(&mut self, value: impl Into<Value>) -> Result<NodeId> {
        let id = self.alloc(value.into(), None);
        match self.tail_id() {
            Some(tail) => {
                if let Some(Some(node)) = self.nodes.get_mut(tail.index() as usize) {
                    node.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        self.len += 1;
        self.emit(ops::INSERT_AT_TAIL, vec![HighlightMark::Node(id)], None)?;
        Ok(id)
    }

    fn tail_id(&self) -> Option<NodeId> {
        let mut cursor = self.head?;
        loop {
            match self.node(cursor).and_then(|n| n.next) {
                Some(next) => cursor = next,
                None => return Some(cursor),
            }
        }
    }

    /// Delete the first node holding `value`
    ///
    /// The predecessor's link is updated before the snapshot is emitted,
    /// so the deleted node never appears as anyone's successor.
    ///
    /// # Errors
    /// Fails with `StructureOperationError` when no node holds the value;
    /// nothing is recorded and the list is unchanged.
    pub fn delete(&mut self, value: &Value) -> Result<()> {
        let mut prev: Option<NodeId> = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let (node_value_matches, next) = match self.node(id) {
                Some(node) => (&node.value == value, node.next),
                None => break,
            };
            if node_value_matches {
                match prev {
                    Some(prev_id) => {
                        if let Some(Some(prev_node)) = self.nodes.get_mut(prev_id.index() as usize)
                        {
                            prev_node.next = next;
                        }
                    }
                    None => self.head = next,
                }
                self.nodes[id.index() as usize] = None;
                self.len -= 1;
                return self.emit(
                    ops::DELETE,
                    vec![HighlightMark::Removed(value.clone())],
                    Some(format!("deleted node {}", id)),
                );
            }
            prev = cursor;
            cursor = next;
        }
        Err(Error::invalid_operation(
            ops::DELETE,
            StructureKind::SinglyLinkedList,
            format!("no node holds value {:?}", value),
        ))
    }

    /// Visit every node from the head, one snapshot per node
    pub fn traverse(&self) -> Result<Vec<Value>> {
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
}

//! Snapshot record and per-kind content shapes
//!
//! A Snapshot is one recorded observation of a container's state plus the
//! operation that produced it. Snapshots are immutable once appended; the
//! recorder assigns the `index` field and nothing else ever changes.
//!
//! Content is a tagged union over the structure kinds so each variant
//! carries a strongly typed payload:
//! - Linear: ordered values (array/string/vector, stack, queue)
//! - Prioritized: value + priority pairs (priority queue)
//! - SinglyLinked / DoublyLinked: node entries with explicit link fields
//!
//! The linked shapes exist because the renderer must draw pointer edges;
//! a flat value list cannot express them. A removed node's former
//! neighbors must have their link fields updated in the same snapshot,
//! never a later one.

use crate::types::{NodeId, StructureId, StructureKind};
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Operation names emitted by the instrumented containers
///
/// These strings are part of the trace interchange format. Construction
/// always emits `DECLARE` first; the validator relies on that to bind a
/// structure id to its kind.
pub mod ops {
    /// Container construction
    pub const DECLARE: &str = "declare";
    /// Read of a single element (pedagogically highlighted)
    pub const ACCESS: &str = "access";
    /// Write of a single element
    pub const ASSIGN: &str = "assign";
    /// Comparison of two elements
    pub const COMPARE: &str = "compare";
    /// Exchange of two elements
    pub const SWAP: &str = "swap";
    /// Visit of one element during iteration
    pub const TRAVERSE: &str = "traverse";
    /// String append
    pub const APPEND: &str = "append";
    /// Substring extraction into a derived structure
    pub const SUBSTRING: &str = "substring";
    /// Vector growth at the back
    pub const PUSH_BACK: &str = "push_back";
    /// Vector shrink at the back
    pub const POP_BACK: &str = "pop_back";
    /// Vector element removal
    pub const REMOVE: &str = "remove";
    /// Stack push
    pub const PUSH: &str = "push";
    /// Stack pop
    pub const POP: &str = "pop";
    /// Stack top read
    pub const PEEK: &str = "peek";
    /// Queue insertion
    pub const ENQUEUE: &str = "enqueue";
    /// Queue removal
    pub const DEQUEUE: &str = "dequeue";
    /// Queue front read
    pub const FRONT: &str = "front";
    /// Priority queue / list / vector insertion
    pub const INSERT: &str = "insert";
    /// Priority queue minimum removal
    pub const EXTRACT_MIN: &str = "extract_min";
    /// Priority queue minimum read
    pub const PEEK_MIN: &str = "peek_min";
    /// Priority queue key decrease
    pub const DECREASE_KEY: &str = "decrease_key";
    /// Linked list head insertion
    pub const INSERT_AT_HEAD: &str = "insert_at_head";
    /// Linked list tail insertion
    pub const INSERT_AT_TAIL: &str = "insert_at_tail";
    /// Linked list node deletion
    pub const DELETE: &str = "delete";
}

/// One entry of a priority queue snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityEntry {
    /// Stored value
    pub value: Value,
    /// Priority (lower is extracted first)
    pub priority: i64,
}

/// One node of a singly linked list snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinglyNode {
    /// Stable node identity
    pub node_id: NodeId,
    /// Stored value
    pub value: Value,
    /// Successor, None at the tail
    pub next: Option<NodeId>,
}

/// One node of a doubly linked list snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoublyNode {
    /// Stable node identity
    pub node_id: NodeId,
    /// Stored value
    pub value: Value,
    /// Successor, None at the tail
    pub next: Option<NodeId>,
    /// Predecessor, None at the head
    pub prev: Option<NodeId>,
}

/// Per-kind snapshot payload
///
/// The variant must agree with the snapshot's declared StructureKind;
/// the schema rejects mismatches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Content {
    /// Ordered values, head/bottom first (array, stack, queue)
    Linear(Vec<Value>),
    /// Heap-ordered value/priority pairs
    Prioritized(Vec<PriorityEntry>),
    /// Nodes in list order, head first
    SinglyLinked(Vec<SinglyNode>),
    /// Nodes in list order, head first
    DoublyLinked(Vec<DoublyNode>),
}

impl Content {
    /// Check whether this payload shape is legal for the given kind
    pub fn describes(&self, kind: StructureKind) -> bool {
        matches!(
            (self, kind),
            (
                Content::Linear(_),
                StructureKind::Array | StructureKind::Stack | StructureKind::Queue
            ) | (Content::Prioritized(_), StructureKind::PriorityQueue)
                | (Content::SinglyLinked(_), StructureKind::SinglyLinkedList)
                | (Content::DoublyLinked(_), StructureKind::DoublyLinkedList)
        )
    }

    /// Number of elements in the payload
    pub fn len(&self) -> usize {
        match self {
            Content::Linear(values) => values.len(),
            Content::Prioritized(entries) => entries.len(),
            Content::SinglyLinked(nodes) => nodes.len(),
            Content::DoublyLinked(nodes) => nodes.len(),
        }
    }

    /// Check if the payload is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Renderer hint marking what the operation touched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightMark {
    /// An element position in a linear or prioritized payload
    Position(usize),
    /// A node in a linked payload
    Node(NodeId),
    /// A value the operation removed (no longer present in content)
    Removed(Value),
}

/// One recorded observation of a container's state
///
/// `index` is assigned by the recorder on append; any value the builder
/// carries before that is a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Position in the trace, contiguous from 0
    pub index: u64,
    /// Which container instance this snapshot belongs to
    pub structure_id: StructureId,
    /// Structure variant
    pub kind: StructureKind,
    /// Name of the operation that produced this snapshot
    pub operation: String,
    /// Container contents after the operation
    pub content: Content,
    /// Positions/nodes/values relevant to the operation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlight: Vec<HighlightMark>,
    /// Optional human-readable annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Snapshot {
    /// Build a snapshot for an operation on a container
    ///
    /// The index is a placeholder until the recorder assigns the real one.
    pub fn new(
        structure_id: StructureId,
        kind: StructureKind,
        operation: &str,
        content: Content,
    ) -> Self {
        Self {
            index: 0,
            structure_id,
            kind,
            operation: operation.to_string(),
            content,
            highlight: Vec::new(),
            comment: None,
        }
    }

    /// Attach highlight marks
    pub fn with_highlight(mut self, highlight: Vec<HighlightMark>) -> Self {
        self.highlight = highlight;
        self
    }

    /// Attach a human-readable annotation
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Check whether this snapshot is a construction snapshot
    pub fn is_declare(&self) -> bool {
        self.operation == ops::DECLARE
    }
}

//! Identity types for the trace engine
//!
//! This module defines the foundational identifiers:
//! - RunId: Unique identifier for one algorithm run
//! - StructureId: Unique identifier for one container instance
//! - NodeId: Stable arena index for linked-list nodes
//! - StructureKind: Discriminator over the six structure variants

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an algorithm run
///
/// A RunId is a wrapper around a UUID v4, providing unique identification
/// for each bounded `begin_run`/`end_run` execution. RunIds scope the
/// recorded trace and keep concurrent runs isolated from one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Create a new random RunId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a RunId from a string representation
    ///
    /// Accepts standard UUID format (with or without hyphens).
    /// Returns None if the string is not a valid UUID.
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    /// Get the raw bytes of this RunId
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a container instance
///
/// Assigned once at construction and never changed afterward. A trace may
/// interleave snapshots from multiple simultaneous containers; the
/// StructureId is what lets the renderer separate the sub-sequences again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructureId(Uuid);

impl StructureId {
    /// Create a new random StructureId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a StructureId from a string representation
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for StructureId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StructureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identifier for a linked-list node
///
/// Linked containers allocate nodes out of an arena and address them by
/// NodeId instead of by pointer. "No successor" is an explicit
/// `Option<NodeId>::None` (serialized as `null`), so a snapshot can never
/// carry a dangling reference to a node that is not part of the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Create a NodeId from a raw arena slot index
    pub fn from_index(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw arena slot index
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Discriminator over the six supported structure variants
///
/// Array covers the array/string/vector family: all three expose ordered
/// element content and are rendered the same way. The linked variants have
/// their own kinds because their snapshot content carries link structure.
///
/// Serialized names are part of the trace interchange format and MUST NOT
/// change: array, stack, queue, priority_queue, singly_linked_list,
/// doubly_linked_list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    /// Ordered element sequence (array, string, vector)
    Array,
    /// LIFO stack
    Stack,
    /// FIFO queue
    Queue,
    /// Min-heap priority queue
    PriorityQueue,
    /// Singly linked list (next links only)
    SinglyLinkedList,
    /// Doubly linked list (next and prev links)
    DoublyLinkedList,
}

impl StructureKind {
    /// Get string representation (matches the serialized form)
    pub fn as_str(&self) -> &'static str {
        match self {
            StructureKind::Array => "array",
            StructureKind::Stack => "stack",
            StructureKind::Queue => "queue",
            StructureKind::PriorityQueue => "priority_queue",
            StructureKind::SinglyLinkedList => "singly_linked_list",
            StructureKind::DoublyLinkedList => "doubly_linked_list",
        }
    }

    /// Check if this is one of the linked variants
    pub fn is_linked(&self) -> bool {
        matches!(
            self,
            StructureKind::SinglyLinkedList | StructureKind::DoublyLinkedList
        )
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

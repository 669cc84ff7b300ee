//! Versioned snapshot schema
//!
//! The schema is declarative configuration, not behavior: a per-kind rule
//! table consulted at validation time. Every exportable trace carries the
//! schema version it was validated against; the validator selects the
//! matching definition by that version and never infers it from shape.
//!
//! Per-kind rules cover:
//! - which Content variant the kind requires
//! - which HighlightMark variants are legal
//!
//! On top of the rule table, linked payloads get structural checks: node
//! ids must be unique within a snapshot, every link must resolve to a node
//! present in the same snapshot (or be None), and doubly linked next/prev
//! links must be reciprocal. This is the gate against the dangling-link
//! defect class.

use crate::error::{Error, Result};
use crate::snapshot::{Content, HighlightMark, Snapshot};
use crate::types::{NodeId, StructureKind};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Schema version carried by every validated trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion(pub u32);

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Content shape a kind requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContentShape {
    Linear,
    Prioritized,
    SinglyLinked,
    DoublyLinked,
}

impl ContentShape {
    fn matches(&self, content: &Content) -> bool {
        matches!(
            (self, content),
            (ContentShape::Linear, Content::Linear(_))
                | (ContentShape::Prioritized, Content::Prioritized(_))
                | (ContentShape::SinglyLinked, Content::SinglyLinked(_))
                | (ContentShape::DoublyLinked, Content::DoublyLinked(_))
        )
    }

    fn name(&self) -> &'static str {
        match self {
            ContentShape::Linear => "linear",
            ContentShape::Prioritized => "prioritized",
            ContentShape::SinglyLinked => "singly_linked",
            ContentShape::DoublyLinked => "doubly_linked",
        }
    }
}

/// Declarative rule for one structure kind
#[derive(Debug, Clone, Copy)]
struct KindRule {
    kind: StructureKind,
    content_shape: ContentShape,
    allows_position_marks: bool,
    allows_node_marks: bool,
}

/// One version of the snapshot schema
///
/// Consulted, not executed: validation walks the rule for the snapshot's
/// declared kind and reports the first offending field.
#[derive(Debug)]
pub struct Schema {
    version: SchemaVersion,
    rules: [KindRule; 6],
}

/// All known schema definitions, newest last
static SCHEMAS: Lazy<Vec<Schema>> = Lazy::new(|| {
    vec![Schema {
        version: SchemaVersion(1),
        rules: [
            KindRule {
                kind: StructureKind::Array,
                content_shape: ContentShape::Linear,
                allows_position_marks: true,
                allows_node_marks: false,
            },
            KindRule {
                kind: StructureKind::Stack,
                content_shape: ContentShape::Linear,
                allows_position_marks: true,
                allows_node_marks: false,
            },
            KindRule {
                kind: StructureKind::Queue,
                content_shape: ContentShape::Linear,
                allows_position_marks: true,
                allows_node_marks: false,
            },
            KindRule {
                kind: StructureKind::PriorityQueue,
                content_shape: ContentShape::Prioritized,
                allows_position_marks: true,
                allows_node_marks: false,
            },
            KindRule {
                kind: StructureKind::SinglyLinkedList,
                content_shape: ContentShape::SinglyLinked,
                allows_position_marks: false,
                allows_node_marks: true,
            },
            KindRule {
                kind: StructureKind::DoublyLinkedList,
                content_shape: ContentShape::DoublyLinked,
                allows_position_marks: false,
                allows_node_marks: true,
            },
        ],
    }]
});

impl Schema {
    /// The schema version new traces are validated against
    pub fn current() -> &'static Schema {
        SCHEMAS.last().expect("schema registry is never empty")
    }

    /// Look up a schema definition by version
    pub fn for_version(version: SchemaVersion) -> Option<&'static Schema> {
        SCHEMAS.iter().find(|s| s.version == version)
    }

    /// This schema's version
    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    fn rule(&self, kind: StructureKind) -> &KindRule {
        self.rules
            .iter()
            .find(|r| r.kind == kind)
            .expect("every kind has a rule")
    }

    /// Validate a single snapshot against this schema
    ///
    /// # Errors
    /// Returns `SchemaViolation` identifying the offending field.
    pub fn validate_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let rule = self.rule(snapshot.kind);

        if !rule.content_shape.matches(&snapshot.content) {
            return Err(Error::schema_violation(
                "content",
                format!(
                    "kind {} requires {} content",
                    snapshot.kind,
                    rule.content_shape.name()
                ),
            ));
        }

        let node_ids = match &snapshot.content {
            Content::SinglyLinked(nodes) => {
                let ids = collect_node_ids(nodes.iter().map(|n| n.node_id))?;
                for node in nodes {
                    check_link(&ids, node.node_id, "next", node.next)?;
                }
                // Content is in list order: each node links to the next
                // entry and the tail links nowhere
                for pair in nodes.windows(2) {
                    if pair[0].next != Some(pair[1].node_id) {
                        return Err(Error::schema_violation(
                            "content",
                            format!(
                                "node {} does not link to its successor {}",
                                pair[0].node_id, pair[1].node_id
                            ),
                        ));
                    }
                }
                if let Some(last) = nodes.last() {
                    if last.next.is_some() {
                        return Err(Error::schema_violation(
                            "content",
                            format!("tail node {} must have no successor", last.node_id),
                        ));
                    }
                }
                ids
            }
            Content::DoublyLinked(nodes) => {
                let ids = collect_node_ids(nodes.iter().map(|n| n.node_id))?;
                for node in nodes {
                    check_link(&ids, node.node_id, "next", node.next)?;
                    check_link(&ids, node.node_id, "prev", node.prev)?;
                }
                // next/prev must be reciprocal along the list order
                for pair in nodes.windows(2) {
                    if pair[0].next != Some(pair[1].node_id)
                        || pair[1].prev != Some(pair[0].node_id)
                    {
                        return Err(Error::schema_violation(
                            "content",
                            format!(
                                "nodes {} and {} have non-reciprocal links",
                                pair[0].node_id, pair[1].node_id
                            ),
                        ));
                    }
                }
                if let Some(first) = nodes.first() {
                    if first.prev.is_some() {
                        return Err(Error::schema_violation(
                            "content",
                            format!("head node {} must have no predecessor", first.node_id),
                        ));
                    }
                }
                if let Some(last) = nodes.last() {
                    if last.next.is_some() {
                        return Err(Error::schema_violation(
                            "content",
                            format!("tail node {} must have no successor", last.node_id),
                        ));
                    }
                }
                ids
            }
            _ => HashSet::new(),
        };

        for mark in &snapshot.highlight {
            match mark {
                HighlightMark::Position(pos) => {
                    if !rule.allows_position_marks {
                        return Err(Error::schema_violation(
                            "highlight",
                            format!("kind {} does not allow position marks", snapshot.kind),
                        ));
                    }
                    if *pos >= snapshot.content.len() {
                        return Err(Error::schema_violation(
                            "highlight",
                            format!(
                                "position {} out of range for content of length {}",
                                pos,
                                snapshot.content.len()
                            ),
                        ));
                    }
                }
                HighlightMark::Node(node_id) => {
                    if !rule.allows_node_marks {
                        return Err(Error::schema_violation(
                            "highlight",
                            format!("kind {} does not allow node marks", snapshot.kind),
                        ));
                    }
                    if !node_ids.contains(node_id) {
                        return Err(Error::schema_violation(
                            "highlight",
                            format!("node mark {} references a node not in content", node_id),
                        ));
                    }
                }
                HighlightMark::Removed(_) => {}
            }
        }

        Ok(())
    }
}

fn collect_node_ids(ids: impl Iterator<Item = NodeId>) -> Result<HashSet<NodeId>> {
    let mut set = HashSet::new();
    for id in ids {
        if !set.insert(id) {
            return Err(Error::schema_violation(
                "content",
                format!("duplicate node id {}", id),
            ));
        }
    }
    Ok(set)
}

fn check_link(
    present: &HashSet<NodeId>,
    from: NodeId,
    field: &str,
    link: Option<NodeId>,
) -> Result<()> {
    if let Some(target) = link {
        if !present.contains(&target) {
            return Err(Error::schema_violation(
                "content",
                format!("node {} has dangling {} link to {}", from, field, target),
            ));
        }
    }
    Ok(())
}

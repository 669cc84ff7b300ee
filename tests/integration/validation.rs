//! The exportability gate
//!
//! A trace reaches the upload collaborator only after the validator
//! accepts it. These tests tamper with recorded sequences and check the
//! validator reports the first offending index.

use statetrace::{
    ops, Content, Error, HighlightMark, NodeId, RunContext, SchemaVersion, SinglyLinkedList,
    SinglyNode, Snapshot, Stack, StructureId, StructureKind, TraceValidator, Value,
};

fn recorded_stack_sequence() -> Vec<Snapshot> {
    let ctx = RunContext::begin_run();
    let mut stack = Stack::new(&ctx).unwrap();
    stack.push(1).unwrap();
    stack.push(2).unwrap();
    stack.pop().unwrap();
    ctx.end_run().unwrap().snapshots
}

#[test]
fn engine_produced_sequences_always_validate() {
    let snapshots = recorded_stack_sequence();
    assert!(TraceValidator::new().validate(&snapshots).is_ok());
}

#[test]
fn reordered_sequence_is_rejected() {
    let mut snapshots = recorded_stack_sequence();
    snapshots.swap(1, 2);

    let err = TraceValidator::new().validate(&snapshots).unwrap_err();
    match err {
        Error::TraceValidationError { index, .. } => assert_eq!(index, 1),
        _ => panic!("wrong error variant"),
    }
}

#[test]
fn truncated_sequence_with_gap_is_rejected() {
    let mut snapshots = recorded_stack_sequence();
    snapshots.remove(2);

    let err = TraceValidator::new().validate(&snapshots).unwrap_err();
    assert!(err.to_string().contains("expected index 2"));
}

#[test]
fn schema_invalid_snapshot_is_rejected_with_its_index() {
    let mut snapshots = recorded_stack_sequence();
    // Corrupt the pop snapshot: position mark beyond the content length
    snapshots[3].highlight = vec![HighlightMark::Position(10)];

    let err = TraceValidator::new().validate(&snapshots).unwrap_err();
    match err {
        Error::TraceValidationError { index, reason } => {
            assert_eq!(index, 3);
            assert!(reason.contains("out of range"));
        }
        _ => panic!("wrong error variant"),
    }
}

#[test]
fn dangling_link_is_rejected() {
    let ctx = RunContext::begin_run();
    let mut list = SinglyLinkedList::new(&ctx).unwrap();
    list.insert_at_tail(1).unwrap();
    list.insert_at_tail(2).unwrap();
    let mut snapshots = ctx.end_run().unwrap().snapshots;

    // Hand-corrupt the last snapshot the way the historical defect did:
    // drop a node from content but keep its predecessor's link to it
    if let Content::SinglyLinked(nodes) = &mut snapshots[2].content {
        nodes.pop();
    }

    let err = TraceValidator::new().validate(&snapshots).unwrap_err();
    assert!(err.to_string().contains("dangling"));
}

#[test]
fn foreign_structure_without_declare_is_rejected() {
    let mut snapshots = recorded_stack_sequence();
    let intruder = StructureId::new();
    snapshots[2].structure_id = intruder;

    let err = TraceValidator::new().validate(&snapshots).unwrap_err();
    assert!(err.to_string().contains("before being declared"));
}

#[test]
fn validator_selects_schema_by_version() {
    let validator = TraceValidator::for_version(SchemaVersion(1)).unwrap();
    assert_eq!(validator.schema_version(), SchemaVersion(1));
    assert!(TraceValidator::for_version(SchemaVersion(7)).is_none());
}

#[test]
fn hand_built_valid_sequence_validates() {
    let id = StructureId::new();
    let node = NodeId::from_index(0);
    let mut declare = Snapshot::new(
        id,
        StructureKind::SinglyLinkedList,
        ops::DECLARE,
        Content::SinglyLinked(vec![]),
    );
    declare.index = 0;
    let mut insert = Snapshot::new(
        id,
        StructureKind::SinglyLinkedList,
        ops::INSERT_AT_HEAD,
        Content::SinglyLinked(vec![SinglyNode {
            node_id: node,
            value: Value::Int(1),
            next: None,
        }]),
    )
    .with_highlight(vec![HighlightMark::Node(node)]);
    insert.index = 1;

    assert!(TraceValidator::new().validate(&[declare, insert]).is_ok());
}

#[test]
fn validation_does_not_mutate_the_sequence() {
    let snapshots = recorded_stack_sequence();
    let copy = snapshots.clone();
    let _ = TraceValidator::new().validate(&snapshots);
    assert_eq!(snapshots, copy);
}

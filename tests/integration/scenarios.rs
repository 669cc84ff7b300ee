//! End-to-end algorithm scenarios
//!
//! Each test runs a small user algorithm under a run context and checks
//! the full trace it leaves behind.

use statetrace::{
    Content, Error, HighlightMark, Queue, RunContext, RunStatus, SinglyLinkedList, Stack, Value,
};

fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::Int).collect()
}

#[test]
fn stack_push_push_pop_trace() {
    let ctx = RunContext::begin_run();
    let mut stack = Stack::new(&ctx).unwrap();
    stack.push(3).unwrap();
    stack.push(5).unwrap();
    assert_eq!(stack.pop().unwrap(), Value::Int(5));

    let trace = ctx.end_run().unwrap();
    let indices: Vec<u64> = trace.iter().map(|s| s.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);

    let ops_seen: Vec<&str> = trace.iter().map(|s| s.operation.as_str()).collect();
    assert_eq!(ops_seen, vec!["declare", "push", "push", "pop"]);

    assert_eq!(trace.snapshots[1].content, Content::Linear(ints(&[3])));
    assert_eq!(trace.snapshots[2].content, Content::Linear(ints(&[3, 5])));
    assert_eq!(trace.snapshots[3].content, Content::Linear(ints(&[3])));
    assert_eq!(
        trace.snapshots[3].highlight,
        vec![HighlightMark::Removed(Value::Int(5))]
    );
}

#[test]
fn queue_enqueue_enqueue_dequeue_trace() {
    let ctx = RunContext::begin_run();
    let mut queue = Queue::new(&ctx).unwrap();
    queue.enqueue("a").unwrap();
    queue.enqueue("b").unwrap();
    assert_eq!(queue.dequeue().unwrap(), Value::String("a".into()));

    let trace = ctx.end_run().unwrap();
    let ops_seen: Vec<&str> = trace.iter().map(|s| s.operation.as_str()).collect();
    assert_eq!(ops_seen, vec!["declare", "enqueue", "enqueue", "dequeue"]);
    assert_eq!(
        trace.snapshots[3].content,
        Content::Linear(vec![Value::String("b".into())])
    );
}

#[test]
fn linked_list_delete_leaves_no_reference_to_deleted_node() {
    let ctx = RunContext::begin_run();
    let mut list = SinglyLinkedList::new(&ctx).unwrap();
    list.insert_at_tail(1).unwrap();
    let node_2 = list.insert_at_tail(2).unwrap();
    list.insert_at_tail(3).unwrap();
    list.delete(&Value::Int(2)).unwrap();

    let trace = ctx.end_run().unwrap();
    let last = trace.snapshots.last().unwrap();
    match &last.content {
        Content::SinglyLinked(nodes) => {
            let values: Vec<&Value> = nodes.iter().map(|n| &n.value).collect();
            assert_eq!(values, vec![&Value::Int(1), &Value::Int(3)]);
            assert!(nodes.iter().all(|n| n.node_id != node_2));
            assert!(nodes.iter().all(|n| n.next != Some(node_2)));
        }
        _ => panic!("wrong content shape"),
    }
}

#[test]
fn snapshot_count_matches_significant_operations() {
    let ctx = RunContext::begin_run();
    let mut stack = Stack::new(&ctx).unwrap(); // 1 snapshot
    stack.push(1).unwrap(); // 1
    stack.push(2).unwrap(); // 1
    let _ = stack.len(); // 0
    let _ = stack.is_empty(); // 0
    stack.peek().unwrap(); // 1
    stack.pop().unwrap(); // 1

    let trace = ctx.end_run().unwrap();
    assert_eq!(trace.len(), 5);
}

#[test]
fn two_lists_interleave_by_structure_id() {
    let ctx = RunContext::begin_run();
    let mut fast = SinglyLinkedList::new(&ctx).unwrap();
    let mut slow = SinglyLinkedList::new(&ctx).unwrap();
    for i in 0..2 {
        fast.insert_at_tail(i).unwrap();
        slow.insert_at_tail(i * 10).unwrap();
    }

    let trace = ctx.end_run().unwrap();
    assert_eq!(trace.len(), 6);

    // The trace partitions into one sub-sequence per structure id,
    // each internally ordered by index.
    let fast_indices: Vec<u64> = trace
        .iter()
        .filter(|s| s.structure_id == fast.structure_id())
        .map(|s| s.index)
        .collect();
    let slow_indices: Vec<u64> = trace
        .iter()
        .filter(|s| s.structure_id == slow.structure_id())
        .map(|s| s.index)
        .collect();
    assert_eq!(fast_indices.len(), 3);
    assert_eq!(slow_indices.len(), 3);
    assert!(fast_indices.windows(2).all(|w| w[0] < w[1]));
    assert!(slow_indices.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn capture_reports_partial_trace_on_algorithm_failure() {
    let capture = RunContext::capture(|ctx| {
        let mut stack = Stack::new(ctx)?;
        stack.push(1)?;
        stack.pop()?;
        stack.pop()?; // empty: usage error ends the algorithm
        Ok::<_, Error>(())
    });

    assert_eq!(capture.status, RunStatus::Failed);
    assert!(matches!(
        capture.algorithm.unwrap_err(),
        Error::StructureOperationError { .. }
    ));

    // The partial trace is still sealed, validated and reported
    let trace = capture.trace.unwrap();
    assert_eq!(trace.len(), 3);
    let ops_seen: Vec<&str> = trace.iter().map(|s| s.operation.as_str()).collect();
    assert_eq!(ops_seen, vec!["declare", "push", "pop"]);
}

#[test]
fn trace_serializes_for_the_upload_collaborator() {
    let capture = RunContext::capture(|ctx| {
        let mut queue = Queue::new(ctx)?;
        queue.enqueue("a")?;
        queue.dequeue()?;
        Ok::<_, Error>(())
    });

    let trace = capture.trace.unwrap();
    let json = serde_json::to_string(&trace).unwrap();
    assert!(json.contains("\"schema_version\""));
    assert!(json.contains("\"queue\""));

    let restored: statetrace::Trace = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, trace);
}

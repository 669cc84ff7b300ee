//! Randomized invariant checks
//!
//! Property tests over arbitrary operation sequences: whatever the user
//! algorithm does, the recorded trace keeps its invariants.

use proptest::prelude::*;
use statetrace::{Error, RunContext, SinglyLinkedList, Stack, TraceValidator, Value};

#[derive(Debug, Clone)]
enum StackOp {
    Push(i64),
    Pop,
}

fn stack_op() -> impl Strategy<Value = StackOp> {
    prop_oneof![
        (-100i64..100).prop_map(StackOp::Push),
        Just(StackOp::Pop),
    ]
}

#[derive(Debug, Clone)]
enum ListOp {
    InsertHead(i64),
    InsertTail(i64),
    Delete(i64),
}

fn list_op() -> impl Strategy<Value = ListOp> {
    prop_oneof![
        (0i64..10).prop_map(ListOp::InsertHead),
        (0i64..10).prop_map(ListOp::InsertTail),
        (0i64..10).prop_map(ListOp::Delete),
    ]
}

proptest! {
    #[test]
    fn stack_traces_have_contiguous_indices(ops in prop::collection::vec(stack_op(), 0..40)) {
        let ctx = RunContext::begin_run();
        let mut stack = Stack::new(&ctx).unwrap();
        let mut expected = 1u64; // declare

        for op in ops {
            match op {
                StackOp::Push(v) => {
                    stack.push(v).unwrap();
                    expected += 1;
                }
                StackOp::Pop => match stack.pop() {
                    Ok(_) => expected += 1,
                    // Failed operations contribute nothing
                    Err(Error::StructureOperationError { .. }) => {}
                    Err(e) => panic!("unexpected error: {}", e),
                },
            }
        }

        let trace = ctx.end_run().unwrap();
        prop_assert_eq!(trace.len() as u64, expected);
        let indices: Vec<u64> = trace.iter().map(|s| s.index).collect();
        let contiguous: Vec<u64> = (0..expected).collect();
        prop_assert_eq!(indices, contiguous);
    }

    #[test]
    fn list_edits_never_emit_schema_invalid_snapshots(ops in prop::collection::vec(list_op(), 0..30)) {
        let ctx = RunContext::begin_run();
        let mut list = SinglyLinkedList::new(&ctx).unwrap();

        for op in ops {
            match op {
                ListOp::InsertHead(v) => {
                    list.insert_at_head(v).unwrap();
                }
                ListOp::InsertTail(v) => {
                    list.insert_at_tail(v).unwrap();
                }
                ListOp::Delete(v) => {
                    // Deleting an absent value is a contained usage error
                    let _ = list.delete(&Value::Int(v));
                }
            }
        }

        let snapshots = ctx.end_run().unwrap().snapshots;
        prop_assert!(TraceValidator::new().validate(&snapshots).is_ok());
    }
}

//! Run and structure isolation
//!
//! Tests the run-scoping guarantees: independent runs share no state,
//! containers cannot outlive their run, and structure identity is stable.

use statetrace::{Error, Queue, RunContext, Stack};
use std::thread;

#[test]
fn runs_have_independent_recorders() {
    let run_a = RunContext::begin_run();
    let run_b = RunContext::begin_run();

    let mut stack = Stack::new(&run_a).unwrap();
    stack.push(1).unwrap();

    assert_eq!(run_a.recorder().len(), 2);
    assert_eq!(run_b.recorder().len(), 0);

    let trace_a = run_a.end_run().unwrap();
    let trace_b = run_b.end_run().unwrap();
    assert_ne!(trace_a.run_id, trace_b.run_id);
    assert_eq!(trace_a.len(), 2);
    assert!(trace_b.is_empty());
}

#[test]
fn concurrent_runs_do_not_interfere() {
    let handles: Vec<_> = (0..4)
        .map(|n| {
            thread::spawn(move || {
                let capture = RunContext::capture(|ctx| {
                    let mut queue = Queue::new(ctx)?;
                    for i in 0..n + 1 {
                        queue.enqueue(i as i64)?;
                    }
                    Ok::<_, Error>(())
                });
                capture.trace.unwrap()
            })
        })
        .collect();

    let traces: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for (n, trace) in traces.iter().enumerate() {
        // declare + n+1 enqueues
        assert_eq!(trace.len(), n + 2);
    }
    // All runs are distinct
    for i in 0..traces.len() {
        for j in i + 1..traces.len() {
            assert_ne!(traces[i].run_id, traces[j].run_id);
        }
    }
}

#[test]
fn container_used_after_end_run_fails_with_recorder_sealed() {
    let ctx = RunContext::begin_run();
    let mut stack = Stack::new(&ctx).unwrap();
    stack.push(1).unwrap();
    ctx.end_run().unwrap();

    let err = stack.push(2).unwrap_err();
    assert_eq!(err, Error::RecorderSealed);
}

#[test]
fn structure_id_is_stable_across_operations() {
    let ctx = RunContext::begin_run();
    let mut stack = Stack::new(&ctx).unwrap();
    let id = stack.structure_id();
    stack.push(1).unwrap();
    stack.pop().unwrap();

    let trace = ctx.end_run().unwrap();
    assert!(trace.iter().all(|s| s.structure_id == id));
}

#[test]
fn distinct_containers_get_distinct_ids() {
    let ctx = RunContext::begin_run();
    let a = Stack::new(&ctx).unwrap();
    let b = Stack::new(&ctx).unwrap();
    assert_ne!(a.structure_id(), b.structure_id());
}

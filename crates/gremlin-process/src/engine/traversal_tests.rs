//! Iteration engine tests: pull semantics, bulk expansion, one-shot application.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::{FutureExt, StreamExt, TryStreamExt};
use gremlin_bytecode::{Bytecode, Value};

use super::{BoxError, BulkPolicy, Error, Strategy, Traversal, TraversalStrategies, Traverser};

/// Populates the queue with a fixed set of traversers and counts calls.
struct Populate {
    traversers: Vec<Traverser>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Strategy for Populate {
    async fn apply(&self, traversal: &mut Traversal) -> Result<(), BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        traversal.set_traversers(self.traversers.clone());
        Ok(())
    }
}

fn traversal_with(traversers: Vec<Traverser>) -> (Traversal, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut strategies = TraversalStrategies::new();
    strategies.add_strategy(Populate {
        traversers,
        calls: calls.clone(),
    });
    (Traversal::new(strategies, Bytecode::new()), calls)
}

fn ints(values: &[i32]) -> Vec<Value> {
    values.iter().copied().map(Value::Int).collect()
}

#[tokio::test]
async fn next_yields_values_then_done() {
    let (mut t, _) = traversal_with(vec![Traverser::single(1), Traverser::single(2)]);

    assert_eq!(t.next().await.unwrap(), Some(Value::Int(1)));
    assert_eq!(t.next().await.unwrap(), Some(Value::Int(2)));
    assert_eq!(t.next().await.unwrap(), None);
    assert_eq!(t.next().await.unwrap(), None);
}

#[tokio::test]
async fn next_expands_bulk_contiguously() {
    let (mut t, _) = traversal_with(vec![Traverser::new(1, 2), Traverser::new(2, 1)]);

    assert_eq!(t.next().await.unwrap(), Some(Value::Int(1)));
    assert_eq!(t.next().await.unwrap(), Some(Value::Int(1)));
    assert_eq!(t.next().await.unwrap(), Some(Value::Int(2)));
    assert_eq!(t.next().await.unwrap(), None);
}

#[tokio::test]
async fn to_list_collects_in_order() {
    let (mut t, _) = traversal_with(vec![Traverser::single("a"), Traverser::single("b")]);

    let list = t.to_list().await.unwrap();
    assert_eq!(list, vec![Value::from("a"), Value::from("b")]);
}

#[tokio::test]
async fn to_list_on_empty_queue() {
    let (mut t, _) = traversal_with(Vec::new());
    assert!(t.to_list().await.unwrap().is_empty());
}

#[tokio::test]
async fn to_list_without_populated_queue() {
    let mut t = Traversal::new(TraversalStrategies::new(), Bytecode::new());
    assert!(t.to_list().await.unwrap().is_empty());
    assert!(t.is_applied());
}

#[tokio::test]
async fn to_list_expands_bulk() {
    let (mut t, _) = traversal_with(vec![
        Traverser::new(1, 1),
        Traverser::new(2, 3),
        Traverser::new(3, 2),
        Traverser::new(4, 1),
    ]);

    let list = t.to_list().await.unwrap();
    assert_eq!(list, ints(&[1, 2, 2, 2, 3, 3, 4]));
    assert_eq!(t.next().await.unwrap(), None);
}

#[tokio::test]
async fn to_list_after_partial_pull_returns_the_rest() {
    let (mut t, _) = traversal_with(vec![Traverser::new(1, 3), Traverser::single(2)]);

    assert_eq!(t.next().await.unwrap(), Some(Value::Int(1)));
    assert_eq!(t.to_list().await.unwrap(), ints(&[1, 1, 2]));
}

#[tokio::test]
async fn has_next_does_not_consume() {
    let (mut t, _) = traversal_with(vec![Traverser::single(1)]);

    assert!(t.has_next().await.unwrap());
    assert!(t.has_next().await.unwrap());
    assert_eq!(t.next().await.unwrap(), Some(Value::Int(1)));
    assert!(!t.has_next().await.unwrap());
}

#[tokio::test]
async fn iterate_applies_once_and_chains() {
    let (mut t, calls) = traversal_with(vec![Traverser::single("a"), Traverser::new("b", 5)]);

    let chained = t.iterate().await.unwrap();
    assert!(chained.is_applied());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    t.iterate().await.unwrap();
    t.to_list().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(t.next().await.unwrap(), None);
}

#[tokio::test]
async fn consuming_calls_share_one_application() {
    let (mut t, calls) = traversal_with(vec![Traverser::new(7, 2)]);

    t.has_next().await.unwrap();
    t.next().await.unwrap();
    t.to_list().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn bytecode_is_frozen_after_application() {
    let (mut t, _) = traversal_with(Vec::new());
    assert!(t.bytecode_mut().is_some());

    t.iterate().await.unwrap();
    assert!(t.bytecode_mut().is_none());

    let t = t.out("ignored");
    assert!(t.bytecode().step_instructions().is_empty());
}

#[tokio::test]
async fn non_positive_bulk_is_rejected_by_default() {
    let (mut t, _) = traversal_with(vec![Traverser::single(1), Traverser::new(2, 0)]);

    assert_eq!(t.next().await.unwrap(), Some(Value::Int(1)));
    let err = t.next().await.unwrap_err();
    assert!(matches!(err, Error::InvalidBulk { bulk: 0 }));
    assert!(matches!(
        t.to_list().await.unwrap_err(),
        Error::InvalidBulk { bulk: 0 }
    ));
}

#[tokio::test]
async fn non_positive_bulk_can_be_skipped() {
    let (t, _) = traversal_with(vec![
        Traverser::new(1, -1),
        Traverser::new(2, 2),
        Traverser::new(3, 0),
        Traverser::single(4),
    ]);
    let mut t = t.with_bulk_policy(BulkPolicy::Skip);

    assert_eq!(t.to_list().await.unwrap(), ints(&[2, 2, 4]));
}

/// Fails on the first application, succeeds afterwards.
struct FlakyOnce {
    calls: AtomicUsize,
}

#[async_trait]
impl Strategy for FlakyOnce {
    fn name(&self) -> &str {
        "FlakyOnce"
    }

    async fn apply(&self, traversal: &mut Traversal) -> Result<(), BoxError> {
        if let Some(bytecode) = traversal.bytecode_mut() {
            bytecode.push_step("rewritten", ());
        }
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            traversal.set_traversers(vec![Traverser::single("partial")]);
            return Err("connection reset".into());
        }
        traversal.set_traversers(vec![Traverser::single("ok")]);
        Ok(())
    }
}

#[tokio::test]
async fn failed_application_rolls_back_and_can_be_retried() {
    let mut strategies = TraversalStrategies::new();
    strategies.add_strategy(FlakyOnce {
        calls: AtomicUsize::new(0),
    });
    let mut t = Traversal::new(strategies, Bytecode::new());

    let err = t.next().await.unwrap_err();
    match err {
        Error::Strategy { strategy, source } => {
            assert_eq!(strategy, "FlakyOnce");
            assert_eq!(source.to_string(), "connection reset");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!t.is_applied());
    assert!(t.traversers().is_none());
    assert!(t.bytecode().step_instructions().is_empty());

    assert_eq!(t.to_list().await.unwrap(), vec![Value::from("ok")]);
    assert_eq!(t.bytecode().step_names().collect::<Vec<_>>(), ["rewritten"]);
}

/// Never completes on the first application.
struct StallOnce {
    calls: AtomicUsize,
}

#[async_trait]
impl Strategy for StallOnce {
    async fn apply(&self, traversal: &mut Traversal) -> Result<(), BoxError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            if let Some(bytecode) = traversal.bytecode_mut() {
                bytecode.push_step("stalled", ());
            }
            futures::future::pending::<()>().await;
        }
        traversal.set_traversers(vec![Traverser::new(1, 2)]);
        Ok(())
    }
}

#[tokio::test]
async fn interrupted_application_is_restarted() {
    let mut strategies = TraversalStrategies::new();
    strategies.add_strategy(StallOnce {
        calls: AtomicUsize::new(0),
    });
    let mut t = Traversal::new(strategies, Bytecode::new());

    assert!(t.next().now_or_never().is_none());
    assert!(!t.is_applied());

    assert_eq!(t.to_list().await.unwrap(), ints(&[1, 1]));
    assert!(t.bytecode().step_instructions().is_empty());
}

#[tokio::test]
async fn stream_yields_bulk_expanded_values() {
    let (mut t, calls) = traversal_with(vec![Traverser::new("x", 2), Traverser::single("y")]);

    let values: Vec<Value> = t.stream().try_collect().await.unwrap();
    assert_eq!(values, vec![Value::from("x"), Value::from("x"), Value::from("y")]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let mut stream = t.stream();
    assert!(stream.next().await.is_none());
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn stream_and_next_share_the_queue() {
    let (mut t, _) = traversal_with(vec![Traverser::new(1, 2), Traverser::single(2)]);

    assert_eq!(t.next().await.unwrap(), Some(Value::Int(1)));
    let rest: Vec<Value> = t.stream().try_collect().await.unwrap();
    assert_eq!(rest, ints(&[1, 2]));
}

#[tokio::test]
async fn stream_reports_application_failure() {
    let mut strategies = TraversalStrategies::new();
    strategies.add_strategy(FlakyOnce {
        calls: AtomicUsize::new(0),
    });
    let mut t = Traversal::new(strategies, Bytecode::new());

    let mut stream = t.stream();
    assert!(matches!(stream.next().await, Some(Err(Error::Strategy { .. }))));
    assert_eq!(stream.next().await.unwrap().unwrap(), Value::from("ok"));
    assert!(stream.next().await.is_none());
}

/// Consumes the traversal from inside its own application.
struct PeekDuringApply {
    calls: Arc<AtomicUsize>,
    nested: Arc<std::sync::Mutex<Option<Error>>>,
}

#[async_trait]
impl Strategy for PeekDuringApply {
    async fn apply(&self, traversal: &mut Traversal) -> Result<(), BoxError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(bytecode) = traversal.bytecode_mut() {
            bytecode.push_step(format!("rewrite{n}"), ());
        }
        traversal.set_traversers(vec![Traverser::single(n as i64)]);
        if let Err(err) = traversal.has_next().await {
            *self.nested.lock().unwrap() = Some(err);
        }
        Ok(())
    }
}

#[tokio::test]
async fn consuming_from_inside_application_is_rejected() {
    let calls = Arc::new(AtomicUsize::new(0));
    let nested = Arc::new(std::sync::Mutex::new(None));
    let mut strategies = TraversalStrategies::new();
    strategies.add_strategy(PeekDuringApply {
        calls: calls.clone(),
        nested: nested.clone(),
    });
    let mut t = Traversal::new(strategies, Bytecode::new());

    assert_eq!(t.to_list().await.unwrap(), vec![Value::Long(0)]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(t.bytecode().step_names().collect::<Vec<_>>(), ["rewrite0"]);
    assert!(matches!(*nested.lock().unwrap(), Some(Error::Reentrant)));
}

#[tokio::test]
async fn nested_step_on_applied_traversal_still_checks_children() {
    let (mut t, _) = traversal_with(Vec::new());
    t.iterate().await.unwrap();

    let bound = Traversal::new(TraversalStrategies::new(), Bytecode::new());
    let err = t.where_(bound).unwrap_err();
    assert!(matches!(
        err,
        Error::Bytecode(gremlin_bytecode::BytecodeError::BoundTraversal { position: 0, .. })
    ));

    let (mut t, _) = traversal_with(Vec::new());
    t.iterate().await.unwrap();
    let t = t.where_(Traversal::anonymous()).unwrap();
    assert!(t.bytecode().step_instructions().is_empty());
}

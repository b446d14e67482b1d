//! Store behavior with a combined root reducer.

#![allow(clippy::unwrap_used)] // Tests can unwrap

use proptest::prelude::*;
use serde_json::{Value, json};
use slice_store_core::action::Action;
use slice_store_core::composition::{CombinedReducer, combine_reducers, slice};
use slice_store_core::reducer::{FnReducer, reuse_if_equal};
use slice_store_runtime::{Store, StoreConfig};
use slice_store_testing::helpers::init_test_tracing;
use slice_store_testing::{RecordingListener, assertions};
use std::sync::Arc;

#[derive(Clone, Debug, Default, PartialEq)]
struct Counters {
    hits: Arc<i64>,
    log: Arc<Vec<Value>>,
}

fn root() -> CombinedReducer<Counters, Action, ()> {
    let hits = FnReducer::new(|state: &Arc<i64>, action: &Action, _env: &()| {
        match action.tag() {
            "HIT" => Arc::new(**state + 1),
            "SET" => reuse_if_equal(state, action.payload().as_i64().unwrap_or(0)),
            _ => Arc::clone(state),
        }
    });
    let log = FnReducer::new(|state: &Arc<Vec<Value>>, action: &Action, _env: &()| {
        if action.tag() == "LOG" {
            let mut next = (**state).clone();
            next.push(action.payload().clone());
            Arc::new(next)
        } else {
            Arc::clone(state)
        }
    });

    combine_reducers(vec![
        slice("hits", |s: &Counters| &s.hits, |s, v| s.hits = v, hits),
        slice("log", |s: &Counters| &s.log, |s, v| s.log = v, log),
    ])
    .unwrap()
}

fn store() -> Store<Counters, Action, (), CombinedReducer<Counters, Action, ()>> {
    Store::with_config(
        Counters::default(),
        root(),
        (),
        StoreConfig::default().with_name("counters").with_metrics(true),
    )
}

#[test]
fn test_dispatch_replaces_only_changed_slices() {
    init_test_tracing();
    let mut store = store();
    let before = Arc::clone(store.state());

    store.dispatch(Action::tag_only("HIT"));

    assert_eq!(*store.state().hits, 1);
    assertions::assert_replaced(&before, store.state());
    assertions::assert_same(&before.log, &store.state().log);
}

#[test]
fn test_equal_value_keeps_state() {
    let mut store = store();
    store.dispatch(Action::new("SET", json!(4)));
    let before = Arc::clone(store.state());

    store.dispatch(Action::new("SET", json!(4)));

    assertions::assert_same(&before, store.state());
}

#[test]
fn test_every_dispatch_notifies() {
    let mut store = store();
    let recorder = RecordingListener::new();
    store.subscribe(recorder.listener());

    store.dispatch(Action::tag_only("HIT"));
    store.dispatch(Action::tag_only("NOTHING"));
    store.dispatch(Action::new("LOG", json!("done")));

    assert_eq!(recorder.len(), 3);
    let states = recorder.states();
    assertions::assert_same(&states[0], &states[1]);
    assert_eq!(*states[2].log, vec![json!("done")]);
    assert_eq!(recorder.last().map(|s| *s.hits), Some(1));
}

#[test]
fn test_listener_subscribed_later_misses_earlier_dispatches() {
    let mut store = store();
    store.dispatch(Action::tag_only("HIT"));

    let recorder = RecordingListener::new();
    store.subscribe(recorder.listener());
    store.dispatch(Action::tag_only("HIT"));

    assert_eq!(recorder.values().iter().map(|s| *s.hits).collect::<Vec<_>>(), vec![2]);
    assert_eq!(store.listener_count(), 1);
}

#[test]
fn test_store_exposes_its_root_reducer() {
    let store = store();
    assert_eq!(store.reducer().keys().collect::<Vec<_>>(), vec!["hits", "log"]);
    assert_eq!(store.reducer().len(), 2);
}

proptest! {
    #[test]
    fn prop_hits_count_dispatches(tags in prop::collection::vec(prop::sample::select(vec!["HIT", "LOG", "OTHER"]), 0..40)) {
        let mut store = store();
        for tag in &tags {
            store.dispatch(Action::tag_only(*tag));
        }

        let expected = tags.iter().filter(|t| **t == "HIT").count();
        prop_assert_eq!(*store.state().hits, i64::try_from(expected).unwrap());
        prop_assert_eq!(store.state().log.len(), tags.iter().filter(|t| **t == "LOG").count());
    }
}

//! # Slice Store Testing
//!
//! Testing utilities and helpers for slice-store.
//!
//! This crate provides:
//! - A Given-When-Then harness for reducers ([`ReducerTest`])
//! - A listener that records every state it is handed ([`RecordingListener`])
//! - Predictable id generation for environments
//! - Property-based testing strategies
//!
//! ## Example
//!
//! ```
//! use slice_store_core::reducer::FnReducer;
//! use slice_store_testing::ReducerTest;
//! use std::sync::Arc;
//!
//! let reducer = FnReducer::new(|s: &Arc<i32>, add: &i32, _env: &()| Arc::new(**s + add));
//!
//! ReducerTest::new(reducer)
//!     .with_env(())
//!     .given_state(1)
//!     .when_action(2)
//!     .then_state(|state| assert_eq!(*state, 3))
//!     .run();
//! ```

/// Ergonomic testing utilities for reducers
pub mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of environment traits and subscribers
pub mod mocks {
    use slice_store_core::environment::SequentialIdGenerator;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    /// Captures every state a store hands to its listeners.
    ///
    /// Clones share the same log, so one clone can be moved into the store
    /// while the test keeps the other.
    ///
    /// # Example
    ///
    /// ```
    /// use slice_store_core::reducer::FnReducer;
    /// use slice_store_runtime::Store;
    /// use slice_store_testing::RecordingListener;
    /// use std::sync::Arc;
    ///
    /// let reducer = FnReducer::new(|s: &Arc<u32>, _: &(), _: &()| Arc::new(**s + 1));
    /// let mut store = Store::new(0, reducer, ());
    ///
    /// let recorder = RecordingListener::new();
    /// store.subscribe(recorder.listener());
    /// store.dispatch(());
    /// store.dispatch(());
    ///
    /// assert_eq!(recorder.values(), vec![1, 2]);
    /// ```
    #[derive(Debug)]
    pub struct RecordingListener<S> {
        seen: Rc<RefCell<Vec<Arc<S>>>>,
    }

    impl<S> RecordingListener<S> {
        /// Create an empty recorder
        #[must_use]
        pub fn new() -> Self {
            Self {
                seen: Rc::new(RefCell::new(Vec::new())),
            }
        }

        /// A callback to pass to `Store::subscribe`
        #[must_use]
        pub fn listener(&self) -> impl FnMut(&Arc<S>) + 'static
        where
            S: 'static,
        {
            let seen = Rc::clone(&self.seen);
            move |state: &Arc<S>| seen.borrow_mut().push(Arc::clone(state))
        }

        /// Number of notifications received
        #[must_use]
        pub fn len(&self) -> usize {
            self.seen.borrow().len()
        }

        /// Whether no notification was received
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.seen.borrow().is_empty()
        }

        /// Every state received, in order
        #[must_use]
        pub fn states(&self) -> Vec<Arc<S>> {
            self.seen.borrow().clone()
        }

        /// The most recent state received
        #[must_use]
        pub fn last(&self) -> Option<Arc<S>> {
            self.seen.borrow().last().cloned()
        }

        /// Every state received, cloned out of its `Arc`
        #[must_use]
        pub fn values(&self) -> Vec<S>
        where
            S: Clone,
        {
            self.seen.borrow().iter().map(|s| S::clone(s)).collect()
        }
    }

    impl<S> Clone for RecordingListener<S> {
        fn clone(&self) -> Self {
            Self {
                seen: Rc::clone(&self.seen),
            }
        }
    }

    impl<S> Default for RecordingListener<S> {
        fn default() -> Self {
            Self::new()
        }
    }

    /// Id generator for tests, starting at 0
    #[must_use]
    pub const fn test_id_generator() -> SequentialIdGenerator {
        SequentialIdGenerator::new()
    }
}

/// Test helpers and utilities
pub mod helpers {
    /// Install a `tracing` subscriber that writes through the test harness.
    ///
    /// Safe to call from every test; only the first call installs anything.
    /// Honors `RUST_LOG`, defaulting to `debug`.
    pub fn init_test_tracing() {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::prelude::*;
    use serde_json::Value;
    use slice_store_core::action::Action;

    /// Arbitrary JSON payloads: null, booleans, numbers, and short strings
    /// (numeric-looking and otherwise).
    pub fn arb_payload() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i32>().prop_map(Value::from),
            (-1.0e6..1.0e6f64).prop_map(Value::from),
            "[0-9]{1,6}".prop_map(Value::String),
            "[a-z ]{0,12}".prop_map(Value::String),
        ]
    }

    /// Action tags that are not in `known`
    pub fn arb_unknown_tag(known: &'static [&'static str]) -> impl Strategy<Value = String> {
        "[A-Z_]{1,16}".prop_filter("tag must be unrecognized", move |tag| {
            !known.contains(&tag.as_str())
        })
    }

    /// Actions whose tag is not in `known`, with arbitrary payloads
    pub fn arb_unknown_action(known: &'static [&'static str]) -> impl Strategy<Value = Action> {
        (arb_unknown_tag(known), arb_payload()).prop_map(|(tag, payload)| Action::new(tag, payload))
    }
}

pub use mocks::{RecordingListener, test_id_generator};

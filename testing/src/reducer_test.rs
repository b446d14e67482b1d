//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use slice_store_core::reducer::Reducer;
use std::sync::Arc;

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// # Example
///
/// ```ignore
/// use slice_store_testing::ReducerTest;
///
/// ReducerTest::new(TotalReducer::new())
///     .with_env(test_environment())
///     .given_state(0.0)
///     .when_action(Action::new("PLUS_TO_TOTAL", json!("5")))
///     .then_state(|total| assert_eq!(*total, 5.0))
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<Arc<S>>,
    actions: Vec<A>,
    state_assertions: Vec<StateAssertion<S>>,
    expect_unchanged: bool,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            actions: Vec::new(),
            state_assertions: Vec::new(),
            expect_unchanged: false,
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(Arc::new(state));
        self
    }

    /// Set the initial state from an existing `Arc` (Given)
    #[must_use]
    pub fn given_shared_state(mut self, state: Arc<S>) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Add an action to apply (When)
    ///
    /// Call repeatedly to apply several actions in order.
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Assert that the reducer hands back the initial `Arc` itself (Then)
    #[must_use]
    pub fn then_unchanged(mut self) -> Self {
        self.expect_unchanged = true;
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertions fail.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let initial = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        assert!(
            !self.actions.is_empty(),
            "At least one action must be set with when_action()"
        );

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        let state = self
            .actions
            .iter()
            .fold(Arc::clone(&initial), |state, action| {
                self.reducer.reduce(&state, action, &env)
            });

        if self.expect_unchanged {
            assert!(
                Arc::ptr_eq(&initial, &state),
                "Expected the reducer to return its input state unchanged"
            );
        }

        for assertion in self.state_assertions {
            assertion(&state);
        }
    }
}

/// Helper assertions for shared state
pub mod assertions {
    use std::sync::Arc;

    /// Assert that two states are the same allocation
    ///
    /// # Panics
    ///
    /// Panics if `before` and `after` point to different allocations.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_same<S>(before: &Arc<S>, after: &Arc<S>) {
        assert!(
            Arc::ptr_eq(before, after),
            "Expected the same state allocation, found a new one"
        );
    }

    /// Assert that `after` is a new allocation
    ///
    /// # Panics
    ///
    /// Panics if `before` and `after` point to the same allocation.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_replaced<S>(before: &Arc<S>, after: &Arc<S>) {
        assert!(
            !Arc::ptr_eq(before, after),
            "Expected a new state allocation, found the original"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slice_store_core::reducer::FnReducer;

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        Decrement,
        Ignore,
    }

    struct TestEnv;

    fn test_reducer()
    -> FnReducer<impl Fn(&Arc<i32>, &TestAction, &TestEnv) -> Arc<i32>, i32, TestAction, TestEnv> {
        FnReducer::new(|state: &Arc<i32>, action: &TestAction, _env: &TestEnv| match action {
            TestAction::Increment => Arc::new(**state + 1),
            TestAction::Decrement => Arc::new(**state - 1),
            TestAction::Ignore => Arc::clone(state),
        })
    }

    #[test]
    fn test_reducer_test_increment() {
        ReducerTest::new(test_reducer())
            .with_env(TestEnv)
            .given_state(0)
            .when_action(TestAction::Increment)
            .then_state(|state| {
                assert_eq!(*state, 1);
            })
            .run();
    }

    #[test]
    fn test_reducer_test_action_sequence() {
        ReducerTest::new(test_reducer())
            .with_env(TestEnv)
            .given_state(5)
            .when_action(TestAction::Decrement)
            .when_action(TestAction::Decrement)
            .when_action(TestAction::Increment)
            .then_state(|state| {
                assert_eq!(*state, 4);
            })
            .run();
    }

    #[test]
    fn test_reducer_test_unchanged() {
        ReducerTest::new(test_reducer())
            .with_env(TestEnv)
            .given_state(3)
            .when_action(TestAction::Ignore)
            .then_unchanged()
            .run();
    }

    #[test]
    #[should_panic(expected = "unchanged")]
    fn test_reducer_test_unchanged_fails_on_new_state() {
        ReducerTest::new(test_reducer())
            .with_env(TestEnv)
            .given_state(3)
            .when_action(TestAction::Increment)
            .then_unchanged()
            .run();
    }

    #[test]
    fn test_assertions() {
        let a = Arc::new(1);
        let b = Arc::new(1);
        assertions::assert_same(&a, &Arc::clone(&a));
        assertions::assert_replaced(&a, &b);
    }
}

//! # Slice Store Core
//!
//! Core traits and types for the slice-store architecture.
//!
//! This crate provides the fundamental abstractions for building a
//! unidirectional data flow: state lives in one place, actions describe
//! intended changes, and pure reducers compute the next state.
//!
//! ## Core Concepts
//!
//! - **State**: Aggregate application state, split into named slices
//! - **Action**: A tagged message (`type` + opaque `payload`)
//! - **Reducer**: Pure function `(State, Action, Environment) → State`
//! - **Slice**: One named sub-part of the state, reduced independently
//! - **Environment**: Injected dependencies (id generation)
//!
//! ## Change Detection
//!
//! State is shared through [`Arc`](std::sync::Arc). A reducer that does not
//! change its input returns the *same* `Arc`, so consumers can detect "nothing
//! happened" with [`Arc::ptr_eq`](std::sync::Arc::ptr_eq) instead of a deep
//! comparison.
//!
//! ## Example
//!
//! ```
//! use slice_store_core::reducer::Reducer;
//! use slice_store_core::action::Action;
//! use std::sync::Arc;
//!
//! struct CountReducer;
//!
//! impl Reducer for CountReducer {
//!     type State = i64;
//!     type Action = Action;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &Arc<i64>, action: &Action, _env: &()) -> Arc<i64> {
//!         match action.tag() {
//!             "INCREMENT" => Arc::new(**state + 1),
//!             _ => Arc::clone(state),
//!         }
//!     }
//! }
//!
//! let state = Arc::new(0);
//! let next = CountReducer.reduce(&state, &Action::new("INCREMENT", 1.into()), &());
//! assert_eq!(*next, 1);
//!
//! let same = CountReducer.reduce(&next, &Action::tag_only("UNKNOWN"), &());
//! assert!(Arc::ptr_eq(&next, &same));
//! ```

// Re-export commonly used types
pub use serde::{Deserialize, Serialize};
pub use serde_json::Value;

/// Actions and payload coercion
pub mod action;

/// Reducer composition (slice combinator)
pub mod composition;

pub use action::{Action, CoercionError};
pub use composition::{CombinedReducer, CompositionError, SliceEntry, combine_reducers, slice};
pub use reducer::{FnReducer, Reducer, reuse_if_equal};

/// Reducer module - The core trait for state transitions
///
/// Reducers are pure functions: `(State, Action, Environment) → State`.
/// They hold no mutable state of their own; anything they need beyond the
/// state and the action (such as fresh identifiers) comes from the environment.
pub mod reducer {
    use std::marker::PhantomData;
    use std::sync::Arc;

    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state (or state slice) this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Identity
    ///
    /// When an action does not concern this reducer, it must return the input
    /// `Arc` itself (`Arc::clone(state)`), never a fresh copy of equal value.
    /// Composition relies on that to keep untouched slices pointer-identical.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Compute the next state from the current state and an action
        ///
        /// # Arguments
        ///
        /// - `state`: The current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// The next state; the same `Arc` as `state` if nothing changed
        fn reduce(
            &self,
            state: &Arc<Self::State>,
            action: &Self::Action,
            env: &Self::Environment,
        ) -> Arc<Self::State>;
    }

    /// Adapter turning a plain function or closure into a [`Reducer`].
    ///
    /// ```
    /// use slice_store_core::reducer::{FnReducer, Reducer};
    /// use std::sync::Arc;
    ///
    /// let double = FnReducer::new(|state: &Arc<i32>, action: &bool, _env: &()| {
    ///     if *action { Arc::new(**state * 2) } else { Arc::clone(state) }
    /// });
    ///
    /// assert_eq!(*double.reduce(&Arc::new(21), &true, &()), 42);
    /// ```
    pub struct FnReducer<F, S, A, E> {
        f: F,
        _phantom: PhantomData<fn(&S, &A, &E)>,
    }

    impl<F, S, A, E> FnReducer<F, S, A, E>
    where
        F: Fn(&Arc<S>, &A, &E) -> Arc<S>,
    {
        /// Wrap a function as a reducer
        #[must_use]
        pub const fn new(f: F) -> Self {
            Self {
                f,
                _phantom: PhantomData,
            }
        }
    }

    impl<F, S, A, E> Reducer for FnReducer<F, S, A, E>
    where
        F: Fn(&Arc<S>, &A, &E) -> Arc<S>,
    {
        type State = S;
        type Action = A;
        type Environment = E;

        fn reduce(&self, state: &Arc<S>, action: &A, env: &E) -> Arc<S> {
            (self.f)(state, action, env)
        }
    }

    /// Return `state` itself when `next` equals it, otherwise wrap `next`.
    ///
    /// Value-like slices (numbers, short strings) use this so that writing the
    /// value they already hold is not reported as a change.
    ///
    /// `NaN` never equals itself, so a `NaN` result always counts as a change.
    #[must_use]
    pub fn reuse_if_equal<T: PartialEq>(state: &Arc<T>, next: T) -> Arc<T> {
        if **state == next {
            Arc::clone(state)
        } else {
            Arc::new(next)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All non-deterministic inputs to a reducer are abstracted behind traits and
/// injected via the Environment parameter, so reducers stay pure and tests can
/// substitute predictable implementations.
pub mod environment {
    use std::cell::Cell;

    /// `IdGenerator` trait - hands out unique, strictly increasing identifiers
    ///
    /// Implementations are owned by the environment of the store that uses them,
    /// so two stores never share a counter.
    ///
    /// # Examples
    ///
    /// ```
    /// use slice_store_core::environment::{IdGenerator, SequentialIdGenerator};
    ///
    /// let ids = SequentialIdGenerator::new();
    /// assert_eq!(ids.next_id(), Some(0));
    /// assert_eq!(ids.next_id(), Some(1));
    /// ```
    pub trait IdGenerator {
        /// Allocate the next identifier
        ///
        /// Returns `None` once the id space is exhausted; an id is never
        /// handed out twice.
        fn next_id(&self) -> Option<u64>;
    }

    /// Counter-backed [`IdGenerator`] starting at 0.
    ///
    /// Not thread-safe: the counter lives in a [`Cell`], matching the store's
    /// single-threaded dispatch model. After `u64::MAX` has been issued the
    /// generator is exhausted.
    #[derive(Debug)]
    pub struct SequentialIdGenerator {
        next: Cell<Option<u64>>,
    }

    impl SequentialIdGenerator {
        /// Create a generator whose first id is 0
        #[must_use]
        pub const fn new() -> Self {
            Self::starting_at(0)
        }

        /// Create a generator whose first id is `first`
        #[must_use]
        pub const fn starting_at(first: u64) -> Self {
            Self {
                next: Cell::new(Some(first)),
            }
        }

        /// The id the next call to [`IdGenerator::next_id`] will return
        #[must_use]
        pub fn peek(&self) -> Option<u64> {
            self.next.get()
        }
    }

    impl Default for SequentialIdGenerator {
        fn default() -> Self {
            Self::new()
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> Option<u64> {
            let id = self.next.get()?;
            self.next.set(id.checked_add(1));
            Some(id)
        }
    }

    impl<G: IdGenerator + ?Sized> IdGenerator for &G {
        fn next_id(&self) -> Option<u64> {
            (**self).next_id()
        }
    }
}

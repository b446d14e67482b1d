//! Reducer composition utilities
//!
//! A root state is an aggregate of named slices, each held behind an [`Arc`].
//! This module builds one root reducer out of one reducer per slice:
//!
//! - **[`slice`]**: Focus a reducer on one field of the root state (getter/setter pair)
//! - **[`combine_reducers`]**: Run every slice reducer, in order, and assemble the next root state
//!
//! Untouched slices keep their `Arc`; if no slice changes, the root `Arc` is
//! returned as-is.
//!
//! # Examples
//!
//! ```
//! use slice_store_core::composition::{combine_reducers, slice};
//! use slice_store_core::reducer::{FnReducer, Reducer};
//! use std::sync::Arc;
//!
//! #[derive(Clone, Default)]
//! struct AppState {
//!     count: Arc<i32>,
//!     name: Arc<String>,
//! }
//!
//! #[derive(Clone)]
//! enum AppAction {
//!     Increment,
//!     Rename(String),
//! }
//!
//! let count = FnReducer::new(|state: &Arc<i32>, action: &AppAction, _env: &()| match action {
//!     AppAction::Increment => Arc::new(**state + 1),
//!     AppAction::Rename(_) => Arc::clone(state),
//! });
//!
//! let name = FnReducer::new(|state: &Arc<String>, action: &AppAction, _env: &()| match action {
//!     AppAction::Rename(name) => Arc::new(name.clone()),
//!     AppAction::Increment => Arc::clone(state),
//! });
//!
//! let root = combine_reducers(vec![
//!     slice("count", |s: &AppState| &s.count, |s, v| s.count = v, count),
//!     slice("name", |s: &AppState| &s.name, |s, v| s.name = v, name),
//! ])
//! .unwrap();
//!
//! let before = Arc::new(AppState::default());
//! let after = root.reduce(&before, &AppAction::Increment, &());
//!
//! assert_eq!(*after.count, 1);
//! assert!(Arc::ptr_eq(&before.name, &after.name));
//! ```

use crate::reducer::Reducer;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while assembling a combined reducer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompositionError {
    /// Two slice entries were registered under the same key
    #[error("slice key `{0}` is registered more than once")]
    DuplicateKey(&'static str),
}

/// One named slice of a root state, paired with the reducer for it.
///
/// Built by [`slice`]; consumed by [`combine_reducers`]. The trait is object
/// safe so slices of different types can live in one list.
pub trait SliceEntry<S, A, E> {
    /// The slice's key, used for logging and duplicate detection
    fn key(&self) -> &'static str;

    /// Reduce this slice of `prev`.
    ///
    /// When the slice reducer returns a different `Arc`, it is written into
    /// `next`, cloning `prev` into `next` first if no earlier slice changed.
    /// Returns whether the slice changed.
    fn reduce_into(&self, prev: &S, next: &mut Option<S>, action: &A, env: &E) -> bool;
}

/// Focuses a reducer on one field of a larger state.
///
/// # Type Parameters
///
/// - `S`: The root state type
/// - `T`: The field's type
/// - `R`: The slice reducer over `T`
///
/// # Examples
///
/// ```
/// use slice_store_core::composition::{slice, SliceEntry};
/// use slice_store_core::reducer::FnReducer;
/// use std::sync::Arc;
///
/// #[derive(Clone)]
/// struct Root {
///     total: Arc<f64>,
/// }
///
/// let total = FnReducer::new(|state: &Arc<f64>, add: &f64, _env: &()| Arc::new(**state + add));
/// let entry = slice("total", |s: &Root| &s.total, |s, v| s.total = v, total);
/// assert_eq!(entry.key(), "total");
/// ```
pub fn slice<S, T, R>(
    key: &'static str,
    get_state: fn(&S) -> &Arc<T>,
    set_state: fn(&mut S, Arc<T>),
    reducer: R,
) -> Box<dyn SliceEntry<S, R::Action, R::Environment>>
where
    S: Clone + 'static,
    T: 'static,
    R: Reducer<State = T> + 'static,
    R::Action: 'static,
    R::Environment: 'static,
{
    Box::new(Slice {
        key,
        reducer,
        get_state,
        set_state,
    })
}

struct Slice<S, T, R> {
    key: &'static str,
    reducer: R,
    get_state: fn(&S) -> &Arc<T>,
    set_state: fn(&mut S, Arc<T>),
}

impl<S, T, R> SliceEntry<S, R::Action, R::Environment> for Slice<S, T, R>
where
    S: Clone,
    R: Reducer<State = T>,
{
    fn key(&self) -> &'static str {
        self.key
    }

    fn reduce_into(
        &self,
        prev: &S,
        next: &mut Option<S>,
        action: &R::Action,
        env: &R::Environment,
    ) -> bool {
        let chunk = (self.get_state)(prev);
        let new_chunk = self.reducer.reduce(chunk, action, env);

        if Arc::ptr_eq(chunk, &new_chunk) {
            return false;
        }

        let target = next.get_or_insert_with(|| prev.clone());
        (self.set_state)(target, new_chunk);
        true
    }
}

/// Combines one reducer per slice into a reducer over the root state.
///
/// Slices are visited in list order and every entry is consulted. Each slice
/// reducer sees the slice as it was in the *incoming* root state.
///
/// An empty list produces a reducer that always returns its input.
///
/// # Errors
///
/// Returns [`CompositionError::DuplicateKey`] if two entries share a key.
///
/// # Examples
///
/// ```
/// use slice_store_core::composition::{combine_reducers, slice, CompositionError};
/// use slice_store_core::reducer::FnReducer;
/// use std::sync::Arc;
///
/// #[derive(Clone)]
/// struct Root {
///     a: Arc<i32>,
/// }
///
/// let noop = || FnReducer::new(|s: &Arc<i32>, _: &(), _: &()| Arc::clone(s));
///
/// let result = combine_reducers(vec![
///     slice("a", |s: &Root| &s.a, |s, v| s.a = v, noop()),
///     slice("a", |s: &Root| &s.a, |s, v| s.a = v, noop()),
/// ]);
/// assert_eq!(result.err(), Some(CompositionError::DuplicateKey("a")));
/// ```
pub fn combine_reducers<S, A, E>(
    slices: Vec<Box<dyn SliceEntry<S, A, E>>>,
) -> Result<CombinedReducer<S, A, E>, CompositionError> {
    let mut seen = HashSet::with_capacity(slices.len());
    for entry in &slices {
        if !seen.insert(entry.key()) {
            return Err(CompositionError::DuplicateKey(entry.key()));
        }
    }

    Ok(CombinedReducer { slices })
}

/// A root reducer built from per-slice reducers.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E> {
    slices: Vec<Box<dyn SliceEntry<S, A, E>>>,
}

impl<S, A, E> CombinedReducer<S, A, E> {
    /// Slice keys in the order they are reduced
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slices.iter().map(|entry| entry.key())
    }

    /// Number of slices
    #[must_use]
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Whether no slices are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

impl<S, A, E> std::fmt::Debug for CombinedReducer<S, A, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E> {
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &Arc<Self::State>,
        action: &Self::Action,
        env: &Self::Environment,
    ) -> Arc<Self::State> {
        let mut next = None;

        for entry in &self.slices {
            if entry.reduce_into(state, &mut next, action, env) {
                tracing::trace!(slice = entry.key(), "Slice changed");
            }
        }

        next.map_or_else(|| Arc::clone(state), Arc::new)
    }
}

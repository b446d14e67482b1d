//! # Slice Store Runtime
//!
//! Runtime implementation for the slice-store architecture.
//!
//! This crate provides the [`Store`]: the single owner of application state.
//! It applies the root reducer to each dispatched action and then tells every
//! subscriber about the new state.
//!
//! ## Core Components
//!
//! - **Store**: Holds current state, the root reducer, and the environment
//! - **Dispatch loop**: action → reducer → replace state → notify listeners
//! - **Metrics**: Optional counters and timings through the `metrics` facade
//!
//! ## Execution Model
//!
//! Everything runs synchronously on the caller's thread. `dispatch` returns
//! only after the reducer has run and every listener has been invoked.
//! `dispatch` and `subscribe` take `&mut self`, so a listener can never reenter
//! the store while it is notifying.
//!
//! ## Example
//!
//! ```
//! use slice_store_core::reducer::FnReducer;
//! use slice_store_runtime::Store;
//! use std::sync::Arc;
//!
//! let reducer = FnReducer::new(|state: &Arc<i64>, delta: &i64, _env: &()| Arc::new(**state + delta));
//! let mut store = Store::new(0, reducer, ());
//!
//! store.subscribe(|state| println!("count is now {state}"));
//! store.dispatch(5);
//!
//! assert_eq!(**store.state(), 5);
//! ```

use std::borrow::Cow;

/// Metrics for observability
pub mod metrics;

pub use store::{Listener, Store};

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use slice_store_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_name("shopping-list")
///     .with_metrics(true);
///
/// assert_eq!(config.name(), "shopping-list");
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    name: Cow<'static, str>,
    metrics_enabled: bool,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    ///
    /// # Arguments
    ///
    /// - `name`: Label attached to log spans and metrics
    /// - `metrics_enabled`: Whether dispatches are recorded through the `metrics` facade
    #[must_use]
    pub const fn new(name: &'static str, metrics_enabled: bool) -> Self {
        Self {
            name: Cow::Borrowed(name),
            metrics_enabled,
        }
    }

    /// Set the store name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Enable or disable metrics recording
    #[must_use]
    pub const fn with_metrics(mut self, enabled: bool) -> Self {
        self.metrics_enabled = enabled;
        self
    }

    /// The store name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether metrics are recorded
    #[must_use]
    pub const fn metrics_enabled(&self) -> bool {
        self.metrics_enabled
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("store", false)
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::StoreConfig;
    use crate::metrics::StoreMetrics;
    use slice_store_core::reducer::Reducer;
    use std::sync::Arc;
    use std::time::Instant;

    /// A subscriber callback, invoked with the new state after each dispatch.
    pub type Listener<S> = Box<dyn FnMut(&Arc<S>)>;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (the current `Arc<S>`, replaced on every dispatch)
    /// 2. Reducer (state transitions)
    /// 3. Environment (injected dependencies)
    /// 4. Listeners (notified in subscription order)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<S>,
        reducer: R,
        environment: E,
        listeners: Vec<Listener<S>>,
        config: StoreConfig,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        ///
        /// # Arguments
        ///
        /// - `initial_state`: The starting state for the store
        /// - `reducer`: The root reducer
        /// - `environment`: Injected dependencies
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        ///
        /// # Example
        ///
        /// ```
        /// use slice_store_core::reducer::FnReducer;
        /// use slice_store_runtime::{Store, StoreConfig};
        /// use std::sync::Arc;
        ///
        /// let reducer = FnReducer::new(|s: &Arc<u8>, _: &(), _: &()| Arc::clone(s));
        /// let store = Store::with_config(0, reducer, (), StoreConfig::default().with_name("bytes"));
        /// assert_eq!(store.config().name(), "bytes");
        /// ```
        #[must_use]
        pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
            Self {
                state: Arc::new(initial_state),
                reducer,
                environment,
                listeners: Vec::new(),
                config,
            }
        }

        /// Register a listener
        ///
        /// The listener is invoked with the new state after every subsequent
        /// dispatch. Listeners are kept in registration order and never removed;
        /// registering the same callback twice makes it run twice.
        pub fn subscribe<F>(&mut self, listener: F)
        where
            F: FnMut(&Arc<S>) + 'static,
        {
            self.listeners.push(Box::new(listener));
            tracing::debug!(
                store = %self.config.name(),
                listeners = self.listeners.len(),
                "Listener subscribed"
            );

            if self.config.metrics_enabled() {
                StoreMetrics::record_listener_count(self.config.name(), self.listeners.len());
            }
        }

        /// Dispatch an action
        ///
        /// Runs the root reducer on the current state, replaces the stored
        /// state with the result (even when it is the same `Arc`), then invokes
        /// every listener with the new state in subscription order.
        ///
        /// A panicking reducer or listener unwinds through this call; the store
        /// does not catch it.
        #[tracing::instrument(skip_all, name = "store_dispatch", fields(store = %self.config.name()))]
        pub fn dispatch(&mut self, action: A) {
            let start = Instant::now();
            let next = {
                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();
                self.reducer.reduce(&self.state, &action, &self.environment)
            };
            let duration = start.elapsed();

            let changed = !Arc::ptr_eq(&self.state, &next);
            tracing::debug!(changed, "Reducer completed");

            self.state = next;

            for listener in &mut self.listeners {
                listener(&self.state);
            }
            tracing::trace!(notified = self.listeners.len(), "Listeners notified");

            if self.config.metrics_enabled() {
                StoreMetrics::record_dispatch(self.config.name(), changed, duration);
                StoreMetrics::record_notifications(self.config.name(), self.listeners.len());
            }
        }

        /// The current state
        #[must_use]
        pub const fn state(&self) -> &Arc<S> {
            &self.state
        }

        /// Number of registered listeners
        #[must_use]
        pub fn listener_count(&self) -> usize {
            self.listeners.len()
        }

        /// The injected environment
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// The root reducer
        #[must_use]
        pub const fn reducer(&self) -> &R {
            &self.reducer
        }

        /// The store configuration
        #[must_use]
        pub const fn config(&self) -> &StoreConfig {
            &self.config
        }
    }

    impl<S, A, E, R> std::fmt::Debug for Store<S, A, E, R>
    where
        S: std::fmt::Debug,
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store")
                .field("state", &self.state)
                .field("listeners", &self.listeners.len())
                .field("config", &self.config)
                .finish_non_exhaustive()
        }
    }
}

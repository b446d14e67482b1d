//! Metrics for store observability.
//!
//! The store records through the [`metrics`] facade. Nothing is exported from
//! this crate: an application that wants the numbers installs a recorder of its
//! choice before creating stores. Without a recorder every call is a no-op.
//!
//! # Metrics
//!
//! | name | kind | labels |
//! |---|---|---|
//! | `store_dispatch_total` | counter | `store`, `changed` |
//! | `store_listener_notifications_total` | counter | `store` |
//! | `store_reducer_duration_seconds` | histogram | `store` |
//! | `store_listeners` | gauge | `store` |

use metrics::{describe_counter, describe_gauge, describe_histogram};
use std::time::Duration;

// Re-export metrics macros for use in other modules
pub use metrics::{counter, gauge, histogram};

/// Register all metric descriptions.
///
/// Call once after installing a recorder; descriptions are only kept by
/// recorders that support them.
pub fn register_metrics() {
    describe_counter!(
        "store_dispatch_total",
        "Total number of actions dispatched to a store"
    );
    describe_counter!(
        "store_listener_notifications_total",
        "Total number of listener invocations after dispatch"
    );
    describe_histogram!(
        "store_reducer_duration_seconds",
        "Time taken by the root reducer per dispatch"
    );
    describe_gauge!("store_listeners", "Number of listeners subscribed to a store");
}

/// Store metrics recorder.
pub struct StoreMetrics;

impl StoreMetrics {
    /// Record one dispatch and how long its reducer took.
    pub fn record_dispatch(store: &str, changed: bool, duration: Duration) {
        counter!(
            "store_dispatch_total",
            "store" => store.to_owned(),
            "changed" => if changed { "true" } else { "false" }
        )
        .increment(1);
        histogram!("store_reducer_duration_seconds", "store" => store.to_owned())
            .record(duration.as_secs_f64());
    }

    /// Record listener invocations for one dispatch.
    pub fn record_notifications(store: &str, count: usize) {
        counter!("store_listener_notifications_total", "store" => store.to_owned())
            .increment(count as u64);
    }

    /// Record the current number of listeners.
    #[allow(clippy::cast_precision_loss)] // listener counts stay far below 2^52
    pub fn record_listener_count(store: &str, count: usize) {
        gauge!("store_listeners", "store" => store.to_owned()).set(count as f64);
    }
}

//! # Shopping List
//!
//! A shopping list with a price input, an add/remove item list, and a running
//! total, built on the slice-store architecture.
//!
//! This example showcases:
//! - One reducer per state slice, combined into a root reducer
//! - Change detection through shared (`Arc`) slices
//! - Id generation injected through the environment
//! - Store subscription for rendering
//!
//! ## Example
//!
//! ```
//! use shopping_list::{actions, create_store, ShoppingConfig};
//!
//! let mut store = create_store(ShoppingConfig::default()).unwrap();
//! store.subscribe(|state| println!("{state}"));
//!
//! for action in actions::submit_item("5") {
//!     store.dispatch(action);
//! }
//!
//! assert_eq!(store.state().item_count(), 1);
//! assert_eq!(store.state().total(), 5.0);
//! ```

/// Action sequences for user interactions
pub mod actions;
/// Shopping list configuration
pub mod config;
/// Environment (id generation, configuration)
pub mod environment;
/// Line-oriented input parsing for the CLI
pub mod input;
/// Slice reducers and the root reducer
pub mod reducer;
/// Domain types
pub mod types;

pub use config::{CoercionPolicy, ShoppingConfig};
pub use environment::ShoppingEnvironment;
pub use reducer::{ItemsReducer, PriceReducer, ShoppingReducer, TotalReducer, shopping_reducer};
pub use types::{ActionType, Item, ItemId, ShoppingState};

use slice_store_core::action::Action;
use slice_store_core::composition::CompositionError;
use slice_store_core::environment::{IdGenerator, SequentialIdGenerator};
use slice_store_runtime::{Store, StoreConfig};

/// A store running the shopping list reducers
pub type ShoppingStore<G = SequentialIdGenerator> =
    Store<ShoppingState, Action, ShoppingEnvironment<G>, ShoppingReducer<G>>;

/// Create a store with the initial state and ids starting at 0
///
/// # Errors
///
/// Returns [`CompositionError`] if the root reducer cannot be assembled.
pub fn create_store(config: ShoppingConfig) -> Result<ShoppingStore, CompositionError> {
    create_store_with(
        ShoppingEnvironment::new(config),
        StoreConfig::default().with_name("shopping-list"),
    )
}

/// Create a store with a custom environment and store configuration
///
/// # Errors
///
/// Returns [`CompositionError`] if the root reducer cannot be assembled.
pub fn create_store_with<G>(
    environment: ShoppingEnvironment<G>,
    store_config: StoreConfig,
) -> Result<ShoppingStore<G>, CompositionError>
where
    G: IdGenerator + 'static,
{
    Ok(Store::with_config(
        ShoppingState::new(),
        shopping_reducer()?,
        environment,
        store_config,
    ))
}

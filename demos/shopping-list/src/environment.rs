//! Environment for the shopping list reducers.

use crate::config::ShoppingConfig;
use crate::types::{Item, ItemId};
use serde_json::Value;
use slice_store_core::environment::{IdGenerator, SequentialIdGenerator};

/// Environment dependencies for the shopping list reducers
///
/// Owns the item id counter, so every store gets its own sequence and tests
/// can start from a known id.
#[derive(Debug)]
pub struct ShoppingEnvironment<G: IdGenerator = SequentialIdGenerator> {
    /// Source of item ids
    pub ids: G,
    /// Reducer configuration
    pub config: ShoppingConfig,
}

impl ShoppingEnvironment<SequentialIdGenerator> {
    /// Creates an environment whose item ids start at 0
    #[must_use]
    pub const fn new(config: ShoppingConfig) -> Self {
        Self::with_ids(SequentialIdGenerator::new(), config)
    }
}

impl Default for ShoppingEnvironment<SequentialIdGenerator> {
    fn default() -> Self {
        Self::new(ShoppingConfig::default())
    }
}

impl<G: IdGenerator> ShoppingEnvironment<G> {
    /// Creates an environment with a custom id source
    #[must_use]
    pub const fn with_ids(ids: G, config: ShoppingConfig) -> Self {
        Self { ids, config }
    }

    /// Allocate an item with the next id
    ///
    /// Returns `None` when the id source is exhausted.
    ///
    /// ```
    /// use shopping_list::{ShoppingConfig, ShoppingEnvironment};
    /// use serde_json::json;
    ///
    /// let env = ShoppingEnvironment::new(ShoppingConfig::default());
    /// let first = env.create_item(json!("milk")).unwrap();
    /// let second = env.create_item(json!("eggs")).unwrap();
    /// assert!(second.id > first.id);
    /// ```
    #[must_use]
    pub fn create_item(&self, value: Value) -> Option<Item> {
        let id = self.ids.next_id()?;
        Some(Item::new(ItemId::new(id), value))
    }
}

//! Reducer logic for the shopping list.
//!
//! One reducer per slice, combined into the root [`ShoppingReducer`]:
//!
//! | slice | reacts to |
//! |---|---|
//! | `price` | `CHANGE_PRICE` |
//! | `items` | `ADD_ITEM`, `REMOVE_ITEM` |
//! | `total` | `PLUS_TO_TOTAL`, `MINUS_TO_TOTAL` |
//!
//! Every other action leaves a slice's `Arc` untouched.

use crate::environment::ShoppingEnvironment;
use crate::types::{ActionType, Item, ShoppingState};
use slice_store_core::action::Action;
use slice_store_core::composition::{CombinedReducer, CompositionError, combine_reducers, slice};
use slice_store_core::environment::IdGenerator;
use slice_store_core::reducer::{Reducer, reuse_if_equal};
use std::marker::PhantomData;
use std::sync::Arc;

/// The root reducer over [`ShoppingState`]
pub type ShoppingReducer<G> = CombinedReducer<ShoppingState, Action, ShoppingEnvironment<G>>;

/// Build the root reducer: `price`, `items`, `total`, in that order.
///
/// # Errors
///
/// Returns [`CompositionError`] if the slice table is malformed; the table is
/// fixed, so this only fails if it is edited to repeat a key.
pub fn shopping_reducer<G>() -> Result<ShoppingReducer<G>, CompositionError>
where
    G: IdGenerator + 'static,
{
    combine_reducers(vec![
        slice(
            "price",
            |s: &ShoppingState| &s.price,
            |s, price| s.price = price,
            PriceReducer::new(),
        ),
        slice(
            "items",
            |s: &ShoppingState| &s.items,
            |s, items| s.items = items,
            ItemsReducer::new(),
        ),
        slice(
            "total",
            |s: &ShoppingState| &s.total,
            |s, total| s.total = total,
            TotalReducer::new(),
        ),
    ])
}

/// Read the payload as a number under the environment's coercion policy.
///
/// `None` means the action should be ignored.
fn numeric_payload<G: IdGenerator>(action: &Action, env: &ShoppingEnvironment<G>) -> Option<f64> {
    if !env.config.is_strict() {
        return Some(action.payload_number());
    }

    match action.try_payload_number() {
        Ok(n) => Some(n),
        Err(error) => {
            tracing::warn!(action = action.tag(), %error, "Ignoring non-numeric payload");
            None
        },
    }
}

/// Reducer for the `price` slice
#[derive(Debug, Clone, Copy)]
pub struct PriceReducer<G> {
    _phantom: PhantomData<fn() -> G>,
}

impl<G> PriceReducer<G> {
    /// Create a new price reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<G> Default for PriceReducer<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> Reducer for PriceReducer<G> {
    type State = f64;
    type Action = Action;
    type Environment = ShoppingEnvironment<G>;

    fn reduce(&self, state: &Arc<f64>, action: &Action, env: &Self::Environment) -> Arc<f64> {
        match ActionType::of(action) {
            Some(ActionType::ChangePrice) => match numeric_payload(action, env) {
                Some(price) => reuse_if_equal(state, price),
                None => Arc::clone(state),
            },
            _ => Arc::clone(state),
        }
    }
}

/// Reducer for the `items` slice
#[derive(Debug, Clone, Copy)]
pub struct ItemsReducer<G> {
    _phantom: PhantomData<fn() -> G>,
}

impl<G> ItemsReducer<G> {
    /// Create a new items reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<G> Default for ItemsReducer<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> Reducer for ItemsReducer<G> {
    type State = Vec<Item>;
    type Action = Action;
    type Environment = ShoppingEnvironment<G>;

    fn reduce(
        &self,
        state: &Arc<Vec<Item>>,
        action: &Action,
        env: &Self::Environment,
    ) -> Arc<Vec<Item>> {
        match ActionType::of(action) {
            Some(ActionType::AddItem) => {
                let Some(item) = env.create_item(action.payload().clone()) else {
                    tracing::error!("Item ids exhausted; item not added");
                    return Arc::clone(state);
                };
                tracing::debug!(id = %item.id, "Item added");

                let mut items = Vec::with_capacity(state.len() + 1);
                items.extend(state.iter().cloned());
                items.push(item);
                Arc::new(items)
            },
            Some(ActionType::RemoveItem) => {
                let Some(target) = numeric_payload(action, env) else {
                    return Arc::clone(state);
                };

                if !state.iter().any(|item| item.id.matches(target)) {
                    tracing::debug!(id = target, "No item to remove");
                    return Arc::clone(state);
                }

                tracing::debug!(id = target, "Item removed");
                Arc::new(
                    state
                        .iter()
                        .filter(|item| !item.id.matches(target))
                        .cloned()
                        .collect(),
                )
            },
            _ => Arc::clone(state),
        }
    }
}

/// Reducer for the `total` slice
#[derive(Debug, Clone, Copy)]
pub struct TotalReducer<G> {
    _phantom: PhantomData<fn() -> G>,
}

impl<G> TotalReducer<G> {
    /// Create a new total reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<G> Default for TotalReducer<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> Reducer for TotalReducer<G> {
    type State = f64;
    type Action = Action;
    type Environment = ShoppingEnvironment<G>;

    fn reduce(&self, state: &Arc<f64>, action: &Action, env: &Self::Environment) -> Arc<f64> {
        let kind = match ActionType::of(action) {
            Some(kind @ (ActionType::PlusToTotal | ActionType::MinusToTotal)) => kind,
            _ => return Arc::clone(state),
        };

        let Some(amount) = numeric_payload(action, env) else {
            return Arc::clone(state);
        };

        let total = if kind == ActionType::PlusToTotal {
            **state + amount
        } else {
            **state - amount
        };
        reuse_if_equal(state, total)
    }
}

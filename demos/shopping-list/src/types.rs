//! Domain types for the shopping list.
//!
//! The state is split into three slices (price, items, total), each behind an
//! `Arc` so the combined reducer can tell which ones an action touched.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use slice_store_core::action::Action;
use std::fmt;
use std::sync::Arc;

/// The closed set of action tags the shopping list reacts to.
///
/// Any other tag is accepted by the store and ignored by every reducer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Replace the price input's value
    ChangePrice,
    /// Append a new item wrapping the payload
    AddItem,
    /// Remove the item whose id equals the payload
    RemoveItem,
    /// Add the payload to the running total
    PlusToTotal,
    /// Subtract the payload from the running total
    MinusToTotal,
}

impl ActionType {
    /// Every recognized tag
    pub const TAGS: &'static [&'static str] = &[
        "CHANGE_PRICE",
        "ADD_ITEM",
        "REMOVE_ITEM",
        "PLUS_TO_TOTAL",
        "MINUS_TO_TOTAL",
    ];

    /// The wire tag for this action type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChangePrice => "CHANGE_PRICE",
            Self::AddItem => "ADD_ITEM",
            Self::RemoveItem => "REMOVE_ITEM",
            Self::PlusToTotal => "PLUS_TO_TOTAL",
            Self::MinusToTotal => "MINUS_TO_TOTAL",
        }
    }

    /// Look up a tag; `None` for anything unrecognized
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "CHANGE_PRICE" => Some(Self::ChangePrice),
            "ADD_ITEM" => Some(Self::AddItem),
            "REMOVE_ITEM" => Some(Self::RemoveItem),
            "PLUS_TO_TOTAL" => Some(Self::PlusToTotal),
            "MINUS_TO_TOTAL" => Some(Self::MinusToTotal),
            _ => None,
        }
    }

    /// The type of `action`, if recognized
    #[must_use]
    pub fn of(action: &Action) -> Option<Self> {
        Self::from_tag(action.tag())
    }

    /// Build an action of this type
    #[must_use]
    pub fn with_payload(self, payload: impl Into<Value>) -> Action {
        Action::new(self.as_str(), payload.into())
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unique identifier for a list item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Creates an `ItemId` from a raw counter value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw counter value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Whether this id equals a coerced numeric payload
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::float_cmp)] // ids are compared as numbers
    pub fn matches(self, n: f64) -> bool {
        self.0 as f64 == n
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single list entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,
    /// The payload the item was added with
    pub value: Value,
}

impl Item {
    /// Creates a new item
    #[must_use]
    pub const fn new(id: ItemId, value: Value) -> Self {
        Self { id, value }
    }
}

/// State of the shopping list
///
/// Slices are shared: cloning a `ShoppingState` only bumps three reference
/// counts.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShoppingState {
    /// Current value of the price input
    pub price: Arc<f64>,
    /// Items in insertion order
    pub items: Arc<Vec<Item>>,
    /// Running total
    pub total: Arc<f64>,
}

impl ShoppingState {
    /// Creates the initial state: price 0, no items, total 0
    #[must_use]
    pub fn new() -> Self {
        Self {
            price: Arc::new(0.0),
            items: Arc::new(Vec::new()),
            total: Arc::new(0.0),
        }
    }

    /// Current price
    #[must_use]
    pub fn price(&self) -> f64 {
        *self.price
    }

    /// Current total
    #[must_use]
    pub fn total(&self) -> f64 {
        *self.total
    }

    /// Returns the number of items
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns an item by ID
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }
}

impl Default for ShoppingState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShoppingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "price: {}", self.price)?;
        writeln!(f, "items:")?;
        for item in self.items.iter() {
            match &item.value {
                Value::String(text) => writeln!(f, "  [{}] {text}", item.id)?,
                other => writeln!(f, "  [{}] {other}", item.id)?,
            }
        }
        write!(f, "total: {}", self.total)
    }
}

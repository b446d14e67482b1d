//! Action sequences for the list's user interactions.
//!
//! Submitting the price input adds an item, adds its price to the total, and
//! clears the input. Removing an item takes it out of the list and subtracts
//! its value from the total.

use crate::types::{ActionType, ItemId};
use serde_json::Value;
use slice_store_core::action::Action;

/// Action for editing the price input
#[must_use]
pub fn change_price(value: impl Into<Value>) -> Action {
    ActionType::ChangePrice.with_payload(value)
}

/// Actions for submitting the price input as a new item
///
/// ```
/// use shopping_list::actions::submit_item;
///
/// let tags: Vec<_> = submit_item("5").iter().map(|a| a.tag().to_owned()).collect();
/// assert_eq!(tags, ["ADD_ITEM", "PLUS_TO_TOTAL", "CHANGE_PRICE"]);
/// ```
#[must_use]
pub fn submit_item(value: impl Into<Value>) -> [Action; 3] {
    let value = value.into();
    [
        ActionType::AddItem.with_payload(value.clone()),
        ActionType::PlusToTotal.with_payload(value),
        ActionType::ChangePrice.with_payload(0),
    ]
}

/// Actions for removing an item that was added with `value`
#[must_use]
pub fn remove_item(id: ItemId, value: impl Into<Value>) -> [Action; 2] {
    [
        ActionType::RemoveItem.with_payload(id.get()),
        ActionType::MinusToTotal.with_payload(value),
    ]
}

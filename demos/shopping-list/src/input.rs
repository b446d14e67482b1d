//! Line-oriented input for the command-line demo.
//!
//! Each line is either a raw JSON action or a short command:
//!
//! ```text
//! {"type":"ADD_ITEM","payload":"5"}
//! add 5
//! remove 0
//! price 12
//! ```

use crate::actions;
use crate::types::{ItemId, ShoppingState};
use slice_store_core::action::Action;
use thiserror::Error;

/// Errors from parsing an input line
#[derive(Error, Debug)]
pub enum InputError {
    /// The line looked like JSON but did not decode as an action
    #[error("invalid action JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The first word is not a known command
    #[error("unknown command `{0}` (expected add, remove, price, or a JSON action)")]
    UnknownCommand(String),

    /// A command was given without its argument
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    /// `remove` was given something other than an item id
    #[error("`{0}` is not an item id")]
    InvalidId(String),

    /// `remove` named an id that is not in the list
    #[error("no item with id {0}")]
    UnknownItem(ItemId),
}

/// Turn one input line into the actions it stands for.
///
/// `remove` looks the item up in `state` so the total can be reduced by the
/// item's value. Blank lines produce no actions.
///
/// # Errors
///
/// Returns [`InputError`] when the line cannot be understood.
pub fn parse_line(line: &str, state: &ShoppingState) -> Result<Vec<Action>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Vec::new());
    }

    if line.starts_with('{') {
        let action: Action = serde_json::from_str(line)?;
        return Ok(vec![action]);
    }

    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(command, rest)| (command, rest.trim()));

    match command {
        "add" => {
            let value = require(rest, "add")?;
            Ok(actions::submit_item(value.to_owned()).into())
        },
        "price" => {
            let value = require(rest, "price")?;
            Ok(vec![actions::change_price(value.to_owned())])
        },
        "remove" => {
            let raw = require(rest, "remove")?;
            let id = raw
                .parse::<u64>()
                .map(ItemId::new)
                .map_err(|_| InputError::InvalidId(raw.to_owned()))?;
            let item = state.item(id).ok_or(InputError::UnknownItem(id))?;
            Ok(actions::remove_item(id, item.value.clone()).into())
        },
        other => Err(InputError::UnknownCommand(other.to_owned())),
    }
}

fn require<'a>(rest: &'a str, command: &'static str) -> Result<&'a str, InputError> {
    if rest.is_empty() {
        Err(InputError::MissingArgument(command))
    } else {
        Ok(rest)
    }
}

//! Actions and payload coercion
//!
//! An [`Action`] is a tagged message: a string `type` naming the intended
//! change and an opaque JSON `payload`. Reducers match on the tag and ignore
//! anything they do not recognize.
//!
//! Payloads typically come straight from user input, so numeric reducers go
//! through [`coerce`] rather than expecting a JSON number.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors produced when a payload is read as a number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    /// The payload has no numeric interpretation
    #[error("payload {0} is not numeric")]
    NotNumeric(String),
}

/// A tagged message describing an intended state change.
///
/// Serializes as `{"type": "...", "payload": ...}`; a missing payload
/// deserializes as `null`.
///
/// # Example
///
/// ```
/// use slice_store_core::action::Action;
///
/// let action: Action = serde_json::from_str(r#"{"type":"ADD_ITEM","payload":"milk"}"#).unwrap();
/// assert_eq!(action.tag(), "ADD_ITEM");
/// assert_eq!(action.payload(), "milk");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    tag: String,
    #[serde(default)]
    payload: Value,
}

impl Action {
    /// Create an action with a tag and payload
    #[must_use]
    pub fn new(tag: impl Into<String>, payload: Value) -> Self {
        Self {
            tag: tag.into(),
            payload,
        }
    }

    /// Create an action whose payload is `null`
    #[must_use]
    pub fn tag_only(tag: impl Into<String>) -> Self {
        Self::new(tag, Value::Null)
    }

    /// The action's `type` tag
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The raw payload
    #[must_use]
    pub const fn payload(&self) -> &Value {
        &self.payload
    }

    /// The payload read as a number, `NaN` when it has no numeric reading
    #[must_use]
    pub fn payload_number(&self) -> f64 {
        coerce::to_number(&self.payload)
    }

    /// The payload read as a number, rejecting non-numeric payloads
    ///
    /// # Errors
    ///
    /// Returns [`CoercionError::NotNumeric`] when coercion yields `NaN`.
    pub fn try_payload_number(&self) -> Result<f64, CoercionError> {
        coerce::try_number(&self.payload)
    }

    /// Consume the action, returning its payload
    #[must_use]
    pub fn into_payload(self) -> Value {
        self.payload
    }
}

/// Loose numeric coercion of JSON payloads.
///
/// The rules follow what a form field's text would turn into as a number:
///
/// | payload | result |
/// |---|---|
/// | `null` | `0` |
/// | `true` / `false` | `1` / `0` |
/// | number | itself |
/// | string | trimmed; empty → `0`; decimal, `0x`/`0o`/`0b` literal, or `[+-]Infinity`; else `NaN` |
/// | array, object | `NaN` |
pub mod coerce {
    use super::{CoercionError, Value};

    /// Coerce a payload to `f64`, yielding `NaN` for non-numeric input.
    ///
    /// ```
    /// use slice_store_core::action::coerce::to_number;
    /// use serde_json::json;
    ///
    /// assert_eq!(to_number(&json!(" 5 ")), 5.0);
    /// assert_eq!(to_number(&json!("")), 0.0);
    /// assert!(to_number(&json!("widget")).is_nan());
    /// ```
    #[must_use]
    pub fn to_number(value: &Value) -> f64 {
        match value {
            Value::Null | Value::Bool(false) => 0.0,
            Value::Bool(true) => 1.0,
            Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Value::String(s) => parse_str(s),
            Value::Array(_) | Value::Object(_) => f64::NAN,
        }
    }

    /// Coerce a payload to `f64`, rejecting anything that would be `NaN`.
    ///
    /// # Errors
    ///
    /// Returns [`CoercionError::NotNumeric`] carrying the payload's JSON text.
    pub fn try_number(value: &Value) -> Result<f64, CoercionError> {
        let n = to_number(value);
        if n.is_nan() {
            Err(CoercionError::NotNumeric(value.to_string()))
        } else {
            Ok(n)
        }
    }

    fn parse_str(raw: &str) -> f64 {
        let s = raw.trim();
        if s.is_empty() {
            return 0.0;
        }

        match s {
            "Infinity" | "+Infinity" => return f64::INFINITY,
            "-Infinity" => return f64::NEG_INFINITY,
            _ => {},
        }

        if let Some(n) = parse_radix(s) {
            return n;
        }

        // `f64::from_str` also accepts "inf" and "nan"; only plain decimal
        // literals count here.
        let decimal_only = s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
        if !decimal_only {
            return f64::NAN;
        }

        s.parse::<f64>().unwrap_or(f64::NAN)
    }

    #[allow(clippy::cast_precision_loss)] // large literals round like any f64
    fn parse_radix(s: &str) -> Option<f64> {
        let (radix, digits) = match s.get(..2)? {
            "0x" | "0X" => (16, &s[2..]),
            "0o" | "0O" => (8, &s[2..]),
            "0b" | "0B" => (2, &s[2..]),
            _ => return None,
        };

        if digits.is_empty() || digits.starts_with(['+', '-']) {
            return Some(f64::NAN);
        }

        Some(u128::from_str_radix(digits, radix).map_or(f64::NAN, |n| n as f64))
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::coerce::{to_number, try_number};
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_number_scalars() {
        assert_eq!(to_number(&Value::Null), 0.0);
        assert_eq!(to_number(&json!(true)), 1.0);
        assert_eq!(to_number(&json!(false)), 0.0);
        assert_eq!(to_number(&json!(2.5)), 2.5);
        assert_eq!(to_number(&json!(-4)), -4.0);
    }

    #[test]
    fn test_to_number_strings() {
        assert_eq!(to_number(&json!("5")), 5.0);
        assert_eq!(to_number(&json!("  12.5\n")), 12.5);
        assert_eq!(to_number(&json!("")), 0.0);
        assert_eq!(to_number(&json!("   ")), 0.0);
        assert_eq!(to_number(&json!("1e3")), 1000.0);
        assert_eq!(to_number(&json!("0x1A")), 26.0);
        assert_eq!(to_number(&json!("0b101")), 5.0);
        assert_eq!(to_number(&json!("-Infinity")), f64::NEG_INFINITY);
    }

    #[test]
    fn test_to_number_rejects_non_numeric_text() {
        assert!(to_number(&json!("widget")).is_nan());
        assert!(to_number(&json!("12abc")).is_nan());
        assert!(to_number(&json!("inf")).is_nan());
        assert!(to_number(&json!("nan")).is_nan());
        assert!(to_number(&json!("0x")).is_nan());
        assert!(to_number(&json!("0xZZ")).is_nan());
        assert!(to_number(&json!("1.2.3")).is_nan());
    }

    #[test]
    fn test_to_number_containers_are_nan() {
        assert!(to_number(&json!([1])).is_nan());
        assert!(to_number(&json!({"a": 1})).is_nan());
    }

    #[test]
    fn test_try_number() {
        assert_eq!(try_number(&json!("7")), Ok(7.0));
        assert_eq!(
            try_number(&json!("widget")),
            Err(CoercionError::NotNumeric("\"widget\"".to_string()))
        );
    }

    #[test]
    fn test_action_serde_shape() {
        let action = Action::new("CHANGE_PRICE", json!(3));
        let encoded = serde_json::to_value(&action).unwrap_or_default();
        assert_eq!(encoded, json!({"type": "CHANGE_PRICE", "payload": 3}));

        let decoded: Result<Action, _> = serde_json::from_str(r#"{"type":"REMOVE_ITEM"}"#);
        assert!(matches!(decoded, Ok(ref a) if a.tag() == "REMOVE_ITEM" && a.payload().is_null()));
    }

    #[test]
    fn test_payload_number_helpers() {
        let action = Action::new("PLUS_TO_TOTAL", json!("5"));
        assert_eq!(action.payload_number(), 5.0);
        assert_eq!(action.try_payload_number(), Ok(5.0));
        assert!(Action::tag_only("X").try_payload_number().is_ok());
    }

    #[allow(clippy::cast_precision_loss)]
    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn integers_survive_string_coercion(n in -1_000_000_000i64..1_000_000_000) {
                prop_assert_eq!(to_number(&json!(n.to_string())), n as f64);
            }

            #[test]
            fn lowercase_words_are_nan(word in "[g-z]{1,10}") {
                prop_assert!(to_number(&json!(word)).is_nan());
            }
        }
    }
}

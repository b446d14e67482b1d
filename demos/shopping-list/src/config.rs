//! Shopping list configuration.

use serde::{Deserialize, Serialize};

/// How numeric actions treat payloads that are not numbers.
///
/// Payloads come from a free-text input, so `PLUS_TO_TOTAL "widget"` is a
/// real possibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoercionPolicy {
    /// Coerce everything; non-numeric payloads turn price or total into `NaN`
    #[default]
    Lenient,
    /// Ignore actions whose payload is not numeric and log a warning
    Strict,
}

/// Configuration for the shopping list reducers
///
/// # Example
///
/// ```
/// use shopping_list::{CoercionPolicy, ShoppingConfig};
///
/// let config = ShoppingConfig::default().with_coercion(CoercionPolicy::Strict);
/// assert_eq!(config.coercion, CoercionPolicy::Strict);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingConfig {
    /// Payload coercion policy for price, total, and item removal
    #[serde(default)]
    pub coercion: CoercionPolicy,
}

impl ShoppingConfig {
    /// Create a configuration with custom values
    #[must_use]
    pub const fn new(coercion: CoercionPolicy) -> Self {
        Self { coercion }
    }

    /// Set the coercion policy
    #[must_use]
    pub const fn with_coercion(mut self, coercion: CoercionPolicy) -> Self {
        self.coercion = coercion;
        self
    }

    /// Whether non-numeric payloads are rejected
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        matches!(self.coercion, CoercionPolicy::Strict)
    }
}

//! Quantity rules for cart intents.

use serde::{Deserialize, Serialize};

/// Smallest quantity a product grid will submit.
pub const MIN_ADD_QUANTITY: i64 = 1;

/// Largest quantity a product grid will submit in one add.
pub const MAX_ADD_QUANTITY: i64 = 5;

/// A quantity picked in a product grid, always within
/// [`MIN_ADD_QUANTITY`]..=[`MAX_ADD_QUANTITY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddQuantity(i64);

impl AddQuantity {
    /// Clamp a requested quantity into the allowed range.
    pub fn new(requested: i64) -> Self {
        Self(requested.clamp(MIN_ADD_QUANTITY, MAX_ADD_QUANTITY))
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl Default for AddQuantity {
    fn default() -> Self {
        Self(MIN_ADD_QUANTITY)
    }
}

impl From<i64> for AddQuantity {
    fn from(requested: i64) -> Self {
        Self::new(requested)
    }
}

/// What a quantity edit on an existing cart line turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// Send an update with this positive quantity.
    Set(i64),
    /// Quantity was zero or negative: remove the line instead.
    Remove,
}

impl QuantityChange {
    /// Translate a requested quantity; non-positive values never reach the server.
    pub fn from_requested(quantity: i64) -> Self {
        if quantity <= 0 {
            QuantityChange::Remove
        } else {
            QuantityChange::Set(quantity)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_quantity_clamps() {
        assert_eq!(AddQuantity::new(0).get(), 1);
        assert_eq!(AddQuantity::new(-4).get(), 1);
        assert_eq!(AddQuantity::new(3).get(), 3);
        assert_eq!(AddQuantity::new(12).get(), 5);
    }

    #[test]
    fn test_add_quantity_default_and_from() {
        assert_eq!(AddQuantity::default().get(), MIN_ADD_QUANTITY);
        assert_eq!(AddQuantity::from(i64::MAX).get(), MAX_ADD_QUANTITY);
    }

    #[test]
    fn test_quantity_change() {
        assert_eq!(QuantityChange::from_requested(0), QuantityChange::Remove);
        assert_eq!(QuantityChange::from_requested(-2), QuantityChange::Remove);
        assert_eq!(QuantityChange::from_requested(7), QuantityChange::Set(7));
    }
}

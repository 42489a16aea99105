//! Store operations and the events published for them.

use crate::Notice;
use serde::Serialize;
use shop_commerce::{Cart, CartItemId, ProductId};
use std::fmt;

/// A store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "op", content = "id", rename_all = "snake_case")]
pub enum CartOp {
    Load,
    Count,
    Add(ProductId),
    Update(CartItemId),
    Remove(CartItemId),
    Clear,
}

impl CartOp {
    /// Notice text when the server gives no message of its own.
    pub fn failure_message(&self) -> &'static str {
        match self {
            CartOp::Load => "Failed to fetch cart",
            CartOp::Count => "Failed to fetch cart count",
            CartOp::Add(_) => "Failed to add item to cart",
            CartOp::Update(_) => "Failed to update item quantity",
            CartOp::Remove(_) => "Failed to remove item",
            CartOp::Clear => "Failed to clear cart",
        }
    }

    /// Whether the operation changes the server-side cart.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            CartOp::Add(_) | CartOp::Update(_) | CartOp::Remove(_) | CartOp::Clear
        )
    }
}

impl fmt::Display for CartOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartOp::Load => write!(f, "load"),
            CartOp::Count => write!(f, "count"),
            CartOp::Add(id) => write!(f, "add product {id}"),
            CartOp::Update(id) => write!(f, "update item {id}"),
            CartOp::Remove(id) => write!(f, "remove item {id}"),
            CartOp::Clear => write!(f, "clear"),
        }
    }
}

/// Change notifications broadcast by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartEvent {
    /// A fresh snapshot replaced the previous one.
    Loaded { cart: Cart },
    /// The server-side item count changed.
    CountChanged { count: i64 },
    /// A mutation succeeded; snapshot and count are being refreshed.
    Mutated { op: CartOp },
    /// An operation started or finished its network round trip.
    Busy { op: CartOp, busy: bool },
    /// Something to show the user.
    Notice { notice: Notice },
}

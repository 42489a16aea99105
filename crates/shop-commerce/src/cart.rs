//! Cart types.
//!
//! The cart is owned by the server and keyed by the session cookie. The
//! client never edits these values locally; every mutation is followed by a
//! fresh `GET /cart` whose result replaces the previous snapshot.

use crate::ids::{CartItemId, ProductId};
use crate::money::{Currency, Money};
use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "CartItemBody")]
pub struct CartItem {
    /// Cart line identifier (used by update/remove).
    pub id: CartItemId,
    /// Product on this line.
    pub product: Product,
    /// Quantity, always at least 1 for persisted lines.
    pub quantity: i64,
    /// Server-computed line total.
    pub subtotal: Money,
}

impl CartItem {
    /// Product identifier of this line.
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartItemBody {
    id: CartItemId,
    product: Product,
    quantity: i64,
    #[serde(default)]
    subtotal: Option<Money>,
}

impl From<CartItemBody> for CartItem {
    fn from(body: CartItemBody) -> Self {
        // Older backends omit the subtotal; fall back to price x quantity.
        let subtotal = body
            .subtotal
            .unwrap_or_else(|| body.product.price * body.quantity);
        Self {
            id: body.id,
            product: body.product,
            quantity: body.quantity,
            subtotal,
        }
    }
}

/// A cart snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", from = "CartBody")]
pub struct Cart {
    /// Items in the cart.
    pub items: Vec<CartItem>,
    /// Sum of line subtotals.
    pub total_amount: Money,
    /// Sum of line quantities.
    pub total_items: i64,
}

impl Cart {
    /// An empty cart.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a cart from bare items, deriving the totals.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let total_amount = items
            .iter()
            .fold(Money::zero(Currency::default()), |acc, i| acc + i.subtotal);
        let total_items = items.iter().map(|i| i.quantity).sum();
        Self {
            items,
            total_amount,
            total_items,
        }
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by ID.
    pub fn get_item(&self, item_id: CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Get the line holding a product.
    pub fn get_item_by_product(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    /// Relabel every amount with a display currency.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.total_amount = self.total_amount.with_currency(currency);
        for item in &mut self.items {
            item.subtotal = item.subtotal.with_currency(currency);
            item.product.price = item.product.price.with_currency(currency);
        }
        self
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartBody {
    #[serde(default)]
    items: Vec<CartItem>,
    #[serde(default)]
    total_amount: Option<Money>,
    #[serde(default)]
    total_items: Option<i64>,
}

impl From<CartBody> for Cart {
    fn from(body: CartBody) -> Self {
        let derived = Cart::from_items(body.items);
        Self {
            total_amount: body.total_amount.unwrap_or(derived.total_amount),
            total_items: body.total_items.unwrap_or(derived.total_items),
            items: derived.items,
        }
    }
}

/// Either wire shape of `GET /cart`.
///
/// The object form carries server totals; the list form (monolith backend)
/// is normalized with [`Cart::from_items`].
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CartPayload {
    Items(Vec<CartItem>),
    Cart(Cart),
}

impl CartPayload {
    /// Normalize into a cart snapshot.
    pub fn into_cart(self) -> Cart {
        match self {
            CartPayload::Items(items) => Cart::from_items(items),
            CartPayload::Cart(cart) => cart,
        }
    }
}

/// Body of `GET /cart/count`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CartCount {
    #[serde(default)]
    pub count: i64,
}

/// Body of `POST /cart/items`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Body of `PUT /cart/items/{id}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateItemRequest {
    pub quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM: &str = r#"{"id":10,"product":{"id":1,"name":"Mug","price":100,"stock":8},
        "quantity":2,"subtotal":200}"#;

    #[test]
    fn test_cart_object_shape() {
        let json = format!(r#"{{"items":[{ITEM}],"totalAmount":200,"totalItems":2}}"#);
        let payload: CartPayload = serde_json::from_str(&json).unwrap();
        let cart = payload.into_cart();
        assert_eq!(cart.total_amount.amount_cents, 20000);
        assert_eq!(cart.total_items, 2);
        assert_eq!(cart.unique_item_count(), 1);
    }

    #[test]
    fn test_cart_list_shape_derives_totals() {
        let pan = r#"{"id":11,"product":{"id":2,"name":"Pan","price":35.5},"quantity":1}"#;
        let json = format!("[{ITEM},{pan}]");
        let payload: CartPayload = serde_json::from_str(&json).unwrap();
        let cart = payload.into_cart();
        assert_eq!(cart.total_items, 3);
        assert_eq!(cart.total_amount.amount_cents, 23550);
        assert_eq!(cart.get_item(CartItemId::new(11)).unwrap().subtotal.amount_cents, 3550);
    }

    #[test]
    fn test_cart_object_missing_totals() {
        let json = format!(r#"{{"items":[{ITEM}]}}"#);
        let cart: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(cart.total_items, 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_empty_cart_object() {
        let cart = serde_json::from_str::<CartPayload>("{}").unwrap().into_cart();
        assert!(cart.is_empty());
        assert!(cart.total_amount.is_zero());
    }

    #[test]
    fn test_get_item_by_product() {
        let cart = Cart::from_items(vec![serde_json::from_str(ITEM).unwrap()]);
        assert_eq!(
            cart.get_item_by_product(ProductId::new(1)).map(|i| i.id),
            Some(CartItemId::new(10))
        );
        assert!(cart.get_item_by_product(ProductId::new(2)).is_none());
    }

    #[test]
    fn test_request_bodies() {
        let add = AddItemRequest {
            product_id: ProductId::new(4),
            quantity: 3,
        };
        assert_eq!(serde_json::to_string(&add).unwrap(), r#"{"productId":4,"quantity":3}"#);
        let update = UpdateItemRequest { quantity: 2 };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"quantity":2}"#);
    }

    #[test]
    fn test_with_currency() {
        let item: CartItem = serde_json::from_str(ITEM).unwrap();
        let cart = Cart::from_items(vec![item]).with_currency(Currency::INR);
        assert_eq!(cart.total_amount.display(), "\u{20b9}200.00");
        assert_eq!(cart.items[0].product.price.currency, Currency::INR);
    }
}

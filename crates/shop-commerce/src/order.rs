//! Order types.

use crate::error::CommerceError;
use crate::ids::{CustomerId, OrderId, OrderItemId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order status as stored by the order service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// Order placed, awaiting confirmation.
    #[default]
    Pending,
    /// Order confirmed.
    Confirmed,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| CommerceError::UnknownStatus(s.to_string()))
    }
}

/// An order line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub id: Option<OrderItemId>,
    pub product_id: ProductId,
    pub quantity: i64,
    #[serde(default, alias = "price")]
    pub unit_price: Option<Money>,
}

/// An order as returned by the order endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    /// ISO-8601 local timestamp as sent by the server.
    #[serde(default)]
    pub order_date: Option<String>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default, alias = "total")]
    pub total_amount: Option<Money>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub shipping_address: Option<String>,
}

impl Order {
    /// Total quantity across lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Relabel every amount with a display currency.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.total_amount = self.total_amount.map(|m| m.with_currency(currency));
        for item in &mut self.items {
            item.unit_price = item.unit_price.map(|m| m.with_currency(currency));
        }
        self
    }
}

/// A line in a new order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Payload for placing an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    pub items: Vec<NewOrderItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
}

impl NewOrder {
    /// Apply the order form rules.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.customer_id.is_none() && self.customer_name.as_deref().map_or(true, str::is_empty) {
            return Err(CommerceError::MissingField("customer"));
        }
        if self.items.is_empty() {
            return Err(CommerceError::MissingField("items"));
        }
        if let Some(bad) = self.items.iter().find(|i| i.quantity <= 0) {
            return Err(CommerceError::InvalidQuantity(bad.quantity));
        }
        Ok(())
    }
}

/// Body of `PATCH /orders/{id}/status`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!("shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert_eq!(" PENDING ".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert!("lost".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_status_wire_form() {
        let body = serde_json::to_string(&StatusUpdate {
            status: OrderStatus::Delivered,
        })
        .unwrap();
        assert_eq!(body, r#"{"status":"DELIVERED"}"#);
    }

    #[test]
    fn test_order_accepts_total_alias() {
        let json = r#"{"id":9,"status":"CONFIRMED","total":250.5,
            "items":[{"productId":1,"quantity":2,"price":125.25}]}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.total_amount.unwrap().amount_cents, 25050);
        assert_eq!(order.items[0].unit_price.unwrap().amount_cents, 12525);
        assert_eq!(order.item_count(), 2);
    }

    #[test]
    fn test_new_order_validation() {
        let mut order = NewOrder {
            customer_id: Some(CustomerId::new(1)),
            items: vec![NewOrderItem {
                product_id: ProductId::new(1),
                quantity: 1,
            }],
            ..Default::default()
        };
        assert!(order.validate().is_ok());

        order.items[0].quantity = 0;
        assert_eq!(order.validate(), Err(CommerceError::InvalidQuantity(0)));

        order.items.clear();
        assert_eq!(order.validate(), Err(CommerceError::MissingField("items")));

        order.customer_id = None;
        assert_eq!(order.validate(), Err(CommerceError::MissingField("customer")));
    }
}

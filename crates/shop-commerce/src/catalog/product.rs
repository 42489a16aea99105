//! Product types.

use crate::catalog::Category;
use crate::error::CommerceError;
use crate::ids::{CategoryId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A product as listed by the catalog endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price.
    pub price: Money,
    /// Category the product belongs to.
    #[serde(default)]
    pub category: Option<ProductCategory>,
    /// Units in stock.
    #[serde(default)]
    pub stock: i64,
    /// Image URL.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Product {
    /// Check if the product can be added to a cart.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Category label for display.
    pub fn category_label(&self) -> &str {
        self.category.as_ref().map(ProductCategory::label).unwrap_or("-")
    }

    /// Relabel the price with a display currency.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.price = self.price.with_currency(currency);
        self
    }
}

/// The category of a product.
///
/// Some backends send the category name, others embed the category record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ProductCategory {
    /// Category name only.
    Named(String),
    /// Embedded category record.
    Embedded(Box<Category>),
}

impl ProductCategory {
    /// Human-readable label.
    pub fn label(&self) -> &str {
        match self {
            ProductCategory::Named(name) => name,
            ProductCategory::Embedded(category) => &category.name,
        }
    }

    /// Category identifier, when the record is embedded.
    pub fn id(&self) -> Option<CategoryId> {
        match self {
            ProductCategory::Named(_) => None,
            ProductCategory::Embedded(category) => Some(category.id),
        }
    }
}

/// Payload for creating or updating a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    pub stock: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewProduct {
    /// Apply the product form rules.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.name.trim().is_empty() {
            return Err(CommerceError::MissingField("name"));
        }
        if self.price.is_negative() {
            return Err(CommerceError::invalid("price", "must not be negative"));
        }
        if self.stock < 0 {
            return Err(CommerceError::invalid("stock", "must not be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_product_with_named_category() {
        let json = r#"{"id":1,"name":"Mug","description":"Blue","price":9.5,
            "category":"Kitchen","stock":3,"imageUrl":"/img/mug.png"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price.amount_cents, 950);
        assert_eq!(product.category_label(), "Kitchen");
        assert!(product.is_in_stock());
    }

    #[test]
    fn test_product_with_embedded_category() {
        let json =
            r#"{"id":2,"name":"Pan","price":20,"category":{"id":4,"name":"Cookware"},"stock":0}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.category_label(), "Cookware");
        assert_eq!(product.category.as_ref().unwrap().id(), Some(CategoryId::new(4)));
        assert!(!product.is_in_stock());
    }

    #[test]
    fn test_new_product_validation() {
        let mut form = NewProduct {
            name: "Lamp".to_string(),
            price: Money::new(1500, Currency::USD),
            stock: 2,
            ..Default::default()
        };
        assert!(form.validate().is_ok());

        form.stock = -1;
        assert!(form.validate().is_err());

        form.stock = 1;
        form.name = "  ".to_string();
        assert_eq!(form.validate(), Err(CommerceError::MissingField("name")));
    }

    #[test]
    fn test_new_product_wire_shape() {
        let form = NewProduct {
            name: "Lamp".to_string(),
            price: Money::new(1500, Currency::USD),
            category_id: Some(CategoryId::new(3)),
            stock: 2,
            ..Default::default()
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["categoryId"], 3);
        assert_eq!(value["price"], 15.0);
        assert!(value.get("description").is_none());
    }
}

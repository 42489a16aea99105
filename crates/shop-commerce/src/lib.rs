//! E-commerce domain types for the shop client.
//!
//! These are the shapes exchanged with the shop REST backend:
//!
//! - **Catalog**: products and categories
//! - **Customers** and **Orders**: admin records
//! - **Cart**: the server-held cart snapshot, its items and count
//! - **Quantity**: client-side quantity rules for cart intents
//!
//! # Example
//!
//! ```rust
//! use shop_commerce::prelude::*;
//!
//! let quantity = AddQuantity::new(9);
//! assert_eq!(quantity.get(), MAX_ADD_QUANTITY);
//!
//! assert_eq!(QuantityChange::from_requested(0), QuantityChange::Remove);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod customer;
pub mod order;
pub mod quantity;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

pub use cart::{AddItemRequest, Cart, CartCount, CartItem, CartPayload, UpdateItemRequest};
pub use catalog::{Category, CategoryForm, ImageUpload, NewProduct, Product, ProductCategory};
pub use customer::{Customer, NewCustomer};
pub use order::{NewOrder, NewOrderItem, Order, OrderItem, OrderStatus, StatusUpdate};
pub use quantity::{AddQuantity, QuantityChange, MAX_ADD_QUANTITY, MIN_ADD_QUANTITY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        Category, CategoryForm, ImageUpload, NewProduct, Product, ProductCategory,
    };

    // Admin records
    pub use crate::customer::{Customer, NewCustomer};
    pub use crate::order::{NewOrder, NewOrderItem, Order, OrderItem, OrderStatus, StatusUpdate};

    // Cart
    pub use crate::cart::{
        AddItemRequest, Cart, CartCount, CartItem, CartPayload, UpdateItemRequest,
    };
    pub use crate::quantity::{AddQuantity, QuantityChange, MAX_ADD_QUANTITY, MIN_ADD_QUANTITY};
}

//! Catalog module.
//!
//! Contains types for products and categories.

mod category;
mod product;

pub use category::{Category, CategoryForm, ImageUpload};
pub use product::{NewProduct, Product, ProductCategory};

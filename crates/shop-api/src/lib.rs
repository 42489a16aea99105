//! Typed REST client for the shop backend.
//!
//! [`ApiClient`] wraps the HTTP plumbing from `shop-data` and exposes one
//! service per resource: products, categories, customers, orders and the
//! session cart. Each resource can live on its own base URL.
//!
//! # Example
//!
//! ```rust,no_run
//! use shop_api::{ApiClient, ApiConfig};
//! use shop_commerce::ProductId;
//!
//! # async fn run() -> Result<(), shop_api::ApiError> {
//! let api = ApiClient::new(ApiConfig::new("http://localhost:8080/api"))?;
//!
//! api.cart().add_item(ProductId::new(1), 2).await?;
//! let cart = api.cart().get().await?;
//! println!("{} items, {}", cart.total_items, cart.total_amount);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
pub mod services;

pub use client::ApiClient;
pub use config::{ApiConfig, Endpoints, Resource, ServiceUrls, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use shop_data::EnvelopePolicy;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiClient, ApiConfig, ApiError, EnvelopePolicy, Resource};
}

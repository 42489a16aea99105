//! Cart synchronization for the shop client.
//!
//! This crate provides:
//! - [`CartStore`] - the single shared holder of the server cart, its count
//!   and in-flight flags
//! - [`CartEvent`] / [`Notice`] - change notifications and user messages
//! - [`CountBadge`] - the header badge fed by the store
//!
//! # Example
//!
//! ```rust,no_run
//! use shop_api::{ApiClient, ApiConfig};
//! use shop_cart::{CartStore, CountBadge};
//! use shop_commerce::{AddQuantity, ProductId};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = CartStore::new(ApiClient::new(ApiConfig::default())?);
//! let badge = CountBadge::new(&store);
//!
//! store.load().await?;
//! store.add(ProductId::new(1), AddQuantity::new(2)).await?;
//! println!("{badge}");
//! # Ok(())
//! # }
//! ```

mod badge;
mod error;
mod event;
mod notice;
mod store;

pub use badge::CountBadge;
pub use error::CartError;
pub use event::{CartEvent, CartOp};
pub use notice::{Notice, NoticeLevel};
pub use store::CartStore;

//! Per-resource services.
//!
//! Each service borrows the [`ApiClient`](crate::ApiClient) and exposes one
//! method per REST operation.

mod cart;
mod categories;
mod customers;
mod orders;
mod products;

pub use cart::CartService;
pub use categories::CategoryService;
pub use customers::CustomerService;
pub use orders::OrderService;
pub use products::ProductService;

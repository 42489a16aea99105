//! Cart store errors.

use shop_api::ApiError;
use shop_commerce::CartItemId;
use thiserror::Error;

/// Errors returned by [`CartStore`](crate::CartStore) operations.
///
/// By the time a caller sees one of these, the store has already published
/// an error notice for it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The item is not in the current snapshot.
    #[error("Cart item {0} is not in the cart")]
    NotInCart(CartItemId),
}

impl CartError {
    /// Server-provided message, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            CartError::Api(err) => err.server_message(),
            CartError::NotInCart(_) => None,
        }
    }
}

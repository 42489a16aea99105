use crate::config::Resource;
use crate::{ApiClient, ApiError};
use shop_commerce::prelude::*;
use shop_data::Method;
use tracing::instrument;

/// `/cart` operations for the session's cart.
///
/// Mutations only report success or failure. Callers refetch the cart with
/// [`CartService::get`] afterwards instead of trusting the mutation reply.
#[derive(Debug, Clone, Copy)]
pub struct CartService<'a> {
    client: &'a ApiClient,
}

impl<'a> CartService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /cart`, accepting either the object or the bare-list shape.
    #[instrument(skip(self))]
    pub async fn get(&self) -> Result<Cart, ApiError> {
        let payload: Option<CartPayload> = {
            let response = self
                .client
                .execute(self.client.request(Method::Get, Resource::Cart, ""))
                .await?;
            self.client.envelope().decode_optional(&response)?
        };
        let cart = payload.map(CartPayload::into_cart).unwrap_or_default();
        Ok(cart.with_currency(self.client.currency()))
    }

    /// `POST /cart/items` with `{productId, quantity}`. The server merges
    /// the quantity into an existing line for the same product.
    #[instrument(skip(self))]
    pub async fn add_item(&self, product_id: ProductId, quantity: i64) -> Result<(), ApiError> {
        if quantity < MIN_ADD_QUANTITY {
            return Err(CommerceError::InvalidQuantity(quantity).into());
        }
        let body = AddItemRequest {
            product_id,
            quantity,
        };
        self.client
            .send_json_unit(Method::Post, Resource::Cart, "items", &body)
            .await
    }

    /// `PUT /cart/items/{id}` with `{quantity}`. Non-positive quantities are
    /// refused here; use [`CartService::remove_item`] instead.
    #[instrument(skip(self))]
    pub async fn update_item(&self, item_id: CartItemId, quantity: i64) -> Result<(), ApiError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity).into());
        }
        let path = format!("items/{item_id}");
        self.client
            .send_json_unit(Method::Put, Resource::Cart, &path, &UpdateItemRequest { quantity })
            .await
    }

    /// `DELETE /cart/items/{id}`
    #[instrument(skip(self))]
    pub async fn remove_item(&self, item_id: CartItemId) -> Result<(), ApiError> {
        self.client
            .delete(Resource::Cart, &format!("items/{item_id}"))
            .await
    }

    /// `DELETE /cart`
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), ApiError> {
        self.client.delete(Resource::Cart, "").await
    }

    /// `GET /cart/count`
    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<i64, ApiError> {
        let count: CartCount = self.client.get(Resource::Cart, "count").await?;
        Ok(count.count)
    }
}

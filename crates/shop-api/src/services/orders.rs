use crate::config::Resource;
use crate::{ApiClient, ApiError};
use shop_commerce::prelude::*;
use shop_data::Method;
use tracing::instrument;

/// `/orders` operations. Orders are never deleted, only moved through
/// their status lifecycle.
#[derive(Debug, Clone, Copy)]
pub struct OrderService<'a> {
    client: &'a ApiClient,
}

impl<'a> OrderService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Order>, ApiError> {
        let currency = self.client.currency();
        let orders: Vec<Order> = self.client.get_list(Resource::Orders, "").await?;
        Ok(orders.into_iter().map(|o| o.with_currency(currency)).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: OrderId) -> Result<Order, ApiError> {
        let order: Order = self.client.get(Resource::Orders, &id.to_string()).await?;
        Ok(order.with_currency(self.client.currency()))
    }

    #[instrument(skip(self, order), fields(items = order.items.len()))]
    pub async fn create(&self, order: &NewOrder) -> Result<Order, ApiError> {
        order.validate()?;
        let created: Order = self
            .client
            .send_json(Method::Post, Resource::Orders, "", order)
            .await?;
        Ok(created.with_currency(self.client.currency()))
    }

    /// `PATCH /orders/{id}/status` with `{"status": ...}`.
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, ApiError> {
        let path = format!("{id}/status");
        let updated: Order = self
            .client
            .send_json(Method::Patch, Resource::Orders, &path, &StatusUpdate { status })
            .await?;
        Ok(updated.with_currency(self.client.currency()))
    }
}

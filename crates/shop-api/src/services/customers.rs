use crate::config::Resource;
use crate::{ApiClient, ApiError};
use shop_commerce::prelude::*;
use shop_data::Method;
use tracing::instrument;

/// `/customers` operations.
#[derive(Debug, Clone, Copy)]
pub struct CustomerService<'a> {
    client: &'a ApiClient,
}

impl<'a> CustomerService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Customer>, ApiError> {
        self.client.get_list(Resource::Customers, "").await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: CustomerId) -> Result<Customer, ApiError> {
        self.client.get(Resource::Customers, &id.to_string()).await
    }

    #[instrument(skip(self, customer), fields(email = %customer.email))]
    pub async fn create(&self, customer: &NewCustomer) -> Result<Customer, ApiError> {
        customer.validate()?;
        self.client
            .send_json(Method::Post, Resource::Customers, "", customer)
            .await
    }

    #[instrument(skip(self, customer))]
    pub async fn update(
        &self,
        id: CustomerId,
        customer: &NewCustomer,
    ) -> Result<Customer, ApiError> {
        customer.validate()?;
        self.client
            .send_json(Method::Put, Resource::Customers, &id.to_string(), customer)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: CustomerId) -> Result<(), ApiError> {
        self.client.delete(Resource::Customers, &id.to_string()).await
    }
}

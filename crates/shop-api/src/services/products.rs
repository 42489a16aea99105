use crate::config::Resource;
use crate::{ApiClient, ApiError};
use shop_commerce::prelude::*;
use shop_data::Method;
use tracing::instrument;

/// `/products` operations.
#[derive(Debug, Clone, Copy)]
pub struct ProductService<'a> {
    client: &'a ApiClient,
}

impl<'a> ProductService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /products`
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        let products: Vec<Product> = self.client.get_list(Resource::Products, "").await?;
        Ok(self.relabel(products))
    }

    /// `GET /products/{id}`
    #[instrument(skip(self))]
    pub async fn get(&self, id: ProductId) -> Result<Product, ApiError> {
        let product: Product = self.client.get(Resource::Products, &id.to_string()).await?;
        Ok(product.with_currency(self.client.currency()))
    }

    /// `GET /products/category/{id}`
    #[instrument(skip(self))]
    pub async fn by_category(&self, category_id: CategoryId) -> Result<Vec<Product>, ApiError> {
        let path = format!("category/{category_id}");
        let products: Vec<Product> = self.client.get_list(Resource::Products, &path).await?;
        Ok(self.relabel(products))
    }

    /// `POST /products`
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create(&self, product: &NewProduct) -> Result<Product, ApiError> {
        product.validate()?;
        let created: Product = self
            .client
            .send_json(Method::Post, Resource::Products, "", product)
            .await?;
        Ok(created.with_currency(self.client.currency()))
    }

    /// `PUT /products/{id}`
    #[instrument(skip(self, product))]
    pub async fn update(&self, id: ProductId, product: &NewProduct) -> Result<Product, ApiError> {
        product.validate()?;
        let updated: Product = self
            .client
            .send_json(Method::Put, Resource::Products, &id.to_string(), product)
            .await?;
        Ok(updated.with_currency(self.client.currency()))
    }

    /// `DELETE /products/{id}`
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<(), ApiError> {
        self.client.delete(Resource::Products, &id.to_string()).await
    }

    fn relabel(&self, products: Vec<Product>) -> Vec<Product> {
        let currency = self.client.currency();
        products.into_iter().map(|p| p.with_currency(currency)).collect()
    }
}

//! The API client.

use crate::config::{ApiConfig, Endpoints, Resource};
use crate::services::{CartService, CategoryService, CustomerService, OrderService, ProductService};
use crate::ApiError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shop_commerce::Currency;
use shop_data::{
    ClientRequestBuilder, EnvelopePolicy, FetchClient, Form, Method, Response, Transport,
};
use std::sync::Arc;

struct Inner {
    http: FetchClient,
    endpoints: Endpoints,
    envelope: EnvelopePolicy,
    currency: Currency,
}

/// Typed client for the shop backend.
///
/// Cheap to clone; clones share the HTTP transport and its session cookies.
/// Every call is a single attempt with no retry.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("endpoints", &self.inner.endpoints)
            .field("envelope", &self.inner.envelope)
            .field("currency", &self.inner.currency)
            .finish()
    }
}

impl ApiClient {
    /// Create a client over HTTP.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        config.validate()?;
        let http = FetchClient::new()?;
        Ok(Self::from_parts(config, http))
    }

    /// Create a client over a custom transport.
    pub fn with_transport(
        config: ApiConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ApiError> {
        config.validate()?;
        Ok(Self::from_parts(config, FetchClient::with_transport(transport)))
    }

    fn from_parts(config: ApiConfig, http: FetchClient) -> Self {
        Self {
            inner: Arc::new(Inner {
                http,
                endpoints: config.endpoints(),
                envelope: config.envelope,
                currency: config.currency,
            }),
        }
    }

    pub fn products(&self) -> ProductService<'_> {
        ProductService::new(self)
    }

    pub fn categories(&self) -> CategoryService<'_> {
        CategoryService::new(self)
    }

    pub fn customers(&self) -> CustomerService<'_> {
        CustomerService::new(self)
    }

    pub fn orders(&self) -> OrderService<'_> {
        OrderService::new(self)
    }

    pub fn cart(&self) -> CartService<'_> {
        CartService::new(self)
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.inner.endpoints
    }

    pub fn envelope(&self) -> EnvelopePolicy {
        self.inner.envelope
    }

    /// Currency used to label decoded amounts.
    pub fn currency(&self) -> Currency {
        self.inner.currency
    }

    // Request helpers shared by the services.

    pub(crate) fn request(
        &self,
        method: Method,
        resource: Resource,
        path: &str,
    ) -> ClientRequestBuilder {
        self.inner.http.request(method, self.inner.endpoints.url(resource, path))
    }

    pub(crate) async fn execute(
        &self,
        request: ClientRequestBuilder,
    ) -> Result<Response, ApiError> {
        let response = request.send().await?;
        Ok(response.error_for_status()?)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        resource: Resource,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = self.execute(self.request(Method::Get, resource, path)).await?;
        Ok(self.inner.envelope.decode(&response)?)
    }

    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        resource: Resource,
        path: &str,
    ) -> Result<Vec<T>, ApiError> {
        let response = self.execute(self.request(Method::Get, resource, path)).await?;
        Ok(self.inner.envelope.decode_list(&response)?)
    }

    pub(crate) async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        resource: Resource,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.request(method, resource, path).json(body)?;
        let response = self.execute(request).await?;
        Ok(self.inner.envelope.decode(&response)?)
    }

    /// Send a JSON body and only check the reply.
    pub(crate) async fn send_json_unit<B: Serialize>(
        &self,
        method: Method,
        resource: Resource,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let request = self.request(method, resource, path).json(body)?;
        let response = self.execute(request).await?;
        Ok(self.inner.envelope.check(&response)?)
    }

    pub(crate) async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        resource: Resource,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let request = self.request(method, resource, path).multipart(form);
        let response = self.execute(request).await?;
        Ok(self.inner.envelope.decode(&response)?)
    }

    pub(crate) async fn delete(&self, resource: Resource, path: &str) -> Result<(), ApiError> {
        let response = self.execute(self.request(Method::Delete, resource, path)).await?;
        Ok(self.inner.envelope.check(&response)?)
    }
}

//! HTTP client utilities for the shop backend.
//!
//! Provides a small builder API over a pluggable [`Transport`], with JSON and
//! multipart bodies and configurable response envelopes.
//!
//! # Example
//!
//! ```rust,no_run
//! use shop_data::{EnvelopePolicy, FetchClient};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct CartCount {
//!     count: i64,
//! }
//!
//! # async fn run() -> Result<(), shop_data::FetchError> {
//! let client = FetchClient::new()?.with_base_url("http://localhost:8080/api");
//!
//! let response = client.get("/cart/count").send().await?;
//! let count: CartCount = EnvelopePolicy::Bare.decode(&response)?;
//! println!("{} items", count.count);
//! # Ok(())
//! # }
//! ```

mod envelope;
mod error;
mod multipart;
mod request;
mod response;
mod transport;

pub use envelope::EnvelopePolicy;
pub use error::FetchError;
pub use multipart::{Form, Part};
pub use request::{Body, Method, RequestBuilder};
pub use response::Response;
pub use transport::{HttpTransport, Transport};

use std::fmt;
use std::sync::Arc;

/// HTTP client for the backend.
///
/// Cheap to clone; clones share the transport (and its cookie jar).
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a client over the reqwest transport.
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new()?)))
    }

    /// Create a client over a custom transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: None,
            transport,
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a request with a custom method.
    ///
    /// Absolute URLs are used as-is; anything else is joined to the base URL.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !is_absolute(&url) => join_url(base, &url),
            _ => url,
        };

        let builder = RequestBuilder::new(method, full_url).accept("application/json");

        ClientRequestBuilder {
            builder,
            transport: Arc::clone(&self.transport),
        }
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Join a base URL and a path with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Set the request body as a multipart form.
    pub fn multipart(mut self, form: Form) -> Self {
        self.builder = self.builder.multipart(form);
        self
    }

    /// Inspect the request that will be sent.
    pub fn request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and return the response, whatever its status.
    pub async fn send(self) -> Result<Response, FetchError> {
        tracing::trace!(method = %self.builder.method, url = %self.builder.url, "sending request");
        self.transport.send(self.builder).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{EnvelopePolicy, FetchClient, FetchError, Form, Method, Response, Transport};
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<RequestBuilder>>,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
            self.seen.lock().unwrap().push(request);
            Ok(Response::no_content())
        }
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://h/api/", "/cart"), "http://h/api/cart");
        assert_eq!(join_url("http://h/api", "cart"), "http://h/api/cart");
    }

    #[tokio::test]
    async fn test_base_url_and_accept_header() {
        let recorder = Arc::new(Recorder::default());
        let client = FetchClient::with_transport(recorder.clone())
            .with_base_url("http://localhost:8080/api/");

        client.request(Method::Delete, "/cart/items/4").send().await.unwrap();
        client.get("https://other.example/products").send().await.unwrap();

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen[0].url(), "http://localhost:8080/api/cart/items/4");
        assert_eq!(seen[0].method(), Method::Delete);
        assert_eq!(seen[0].header_value("accept"), Some("application/json"));
        assert_eq!(seen[1].url(), "https://other.example/products");
    }

    #[tokio::test]
    async fn test_json_body_is_forwarded() {
        let recorder = Arc::new(Recorder::default());
        let client = FetchClient::with_transport(recorder.clone());

        client
            .request(Method::Post, "http://localhost/cart/items")
            .json(&serde_json::json!({"productId": 3, "quantity": 1}))
            .unwrap()
            .send()
            .await
            .unwrap();

        let seen = recorder.seen.lock().unwrap();
        let body: serde_json::Value = seen[0].json_body().unwrap();
        assert_eq!(body["productId"], 3);
    }
}

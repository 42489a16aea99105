//! Request transports.
//!
//! [`Transport`] is the seam between the client and the network. The
//! production implementation is [`HttpTransport`] (reqwest with a cookie
//! jar); tests plug in an in-memory backend.

use crate::multipart::{Form, Part};
use crate::request::{Body, Method, RequestBuilder};
use crate::{FetchError, Response};
use async_trait::async_trait;
use shop_observability::CallTimer;
use std::collections::HashMap;

/// Sends a request and returns the raw response.
///
/// Implementations return `Ok` for any HTTP reply, including 4xx/5xx;
/// status handling belongs to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// reqwest-backed transport.
///
/// The client keeps a cookie store so the session cookie set by the backend
/// on the first cart call is replayed on every later call.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with a session cookie jar.
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(concat!("shop-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    fn multipart(form: Form) -> Result<reqwest::multipart::Form, FetchError> {
        let mut out = reqwest::multipart::Form::new();
        for part in form.parts().iter().cloned() {
            out = match part {
                Part::Text { name, value } => out.text(name, value),
                Part::File {
                    name,
                    file_name,
                    content_type,
                    bytes,
                } => {
                    let part = reqwest::multipart::Part::bytes(bytes)
                        .file_name(file_name)
                        .mime_str(&content_type)?;
                    out.part(name, part)
                }
            };
        }
        Ok(out)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let RequestBuilder {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.client.request(Self::method(method), &url);
        for (key, value) in &headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        builder = match body {
            Body::Empty => builder,
            Body::Bytes(bytes) => builder.body(bytes),
            Body::Multipart(form) => builder.multipart(Self::multipart(form)?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(Response::new(status, headers, body))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let timer = CallTimer::start(request.method.as_str(), request.url.clone());
        let result = self.execute(request).await;
        let record = match &result {
            Ok(response) => timer.finish(response.status, response.body.len()),
            Err(err) => timer.fail(err.to_string()),
        };
        record.log();
        result
    }
}

//! HTTP request builder.

use crate::multipart::Form;
use crate::FetchError;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// HTTP methods used by the backend contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Whether the method leaves server state unchanged.
    pub fn is_idempotent_read(&self) -> bool {
        matches!(self, Method::Get)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Body {
    /// No body.
    #[default]
    Empty,
    /// Raw bytes; the content type travels in the headers.
    Bytes(Vec<u8>),
    /// `multipart/form-data`; the transport sets the boundary header.
    Multipart(Form),
}

impl Body {
    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Empty)
    }
}

/// A builder for constructing HTTP requests.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBuilder {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Body,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: Body::Empty,
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Body::Bytes(body.into());
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Body::Bytes(json);
        Ok(self)
    }

    /// Set the request body as a multipart form.
    pub fn multipart(mut self, form: Form) -> Self {
        // The transport writes Content-Type with its own boundary.
        self.headers.retain(|k, _| !k.eq_ignore_ascii_case("content-type"));
        self.body = Body::Multipart(form);
        self
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    /// HTTP method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Full URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Header value, looked up case-insensitively.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// All headers.
    pub fn header_map(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Request body.
    pub fn body_ref(&self) -> &Body {
        &self.body
    }

    /// Parse the JSON body, mostly useful to fake transports in tests.
    pub fn json_body<T: serde::de::DeserializeOwned>(&self) -> Result<T, FetchError> {
        match &self.body {
            Body::Bytes(bytes) => serde_json::from_slice(bytes).map_err(FetchError::from),
            Body::Empty => Err(FetchError::JsonError("request has no body".to_string())),
            Body::Multipart(_) => {
                Err(FetchError::JsonError("request body is multipart".to_string()))
            }
        }
    }
}

//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a JSON response (used by fake transports).
    pub fn json_body(status: u16, value: &serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self::new(status, headers, value.to_string().into_bytes())
    }

    /// Create a `204 No Content` response.
    pub fn no_content() -> Self {
        Self::new(204, HashMap::new(), Vec::new())
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the response was a client error (4xx status).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if the response was a server error (5xx status).
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Check if the body is empty or whitespace.
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Get the raw response body.
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Get a header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    ///
    /// The error message is the body's `message` or `error` field when the
    /// server sent JSON, the raw text otherwise, and empty for an empty body.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(FetchError::HttpError {
            status: self.status,
            message: self.error_message(),
        })
    }

    fn error_message(&self) -> String {
        if let Ok(value) = self.json::<serde_json::Value>() {
            for key in ["message", "error", "detail"] {
                if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                    return text.to_string();
                }
            }
        }
        self.text()
            .map(|text| text.trim().to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    // === Status Check Tests ===

    #[test]
    fn test_response_is_success() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(204, b"").is_success());
        assert!(!make_response(199, b"").is_success());
        assert!(!make_response(300, b"").is_success());
    }

    #[test]
    fn test_response_error_classes() {
        assert!(make_response(404, b"").is_client_error());
        assert!(!make_response(500, b"").is_client_error());
        assert!(make_response(503, b"").is_server_error());
        assert!(!make_response(499, b"").is_server_error());
    }

    // === Body Tests ===

    #[test]
    fn test_response_empty() {
        assert!(make_response(204, b"").is_empty());
        assert!(make_response(200, b"  \n").is_empty());
        assert!(!make_response(200, b"[]").is_empty());
    }

    #[test]
    fn test_response_json() {
        let resp = Response::json_body(200, &serde_json::json!({"count": 4}));
        let value: serde_json::Value = resp.json().unwrap();
        assert_eq!(value["count"], 4);
        assert_eq!(resp.content_type(), Some("application/json"));
    }

    #[test]
    fn test_response_text_invalid_utf8() {
        let resp = make_response(200, &[0xff, 0xfe]);
        assert!(resp.text().is_err());
    }

    #[test]
    fn test_header_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("Set-Cookie".to_string(), "JSESSIONID=abc".to_string());
        let resp = Response::new(200, headers, Vec::new());
        assert_eq!(resp.header("set-cookie"), Some("JSESSIONID=abc"));
        assert_eq!(resp.header("X-Missing"), None);
    }

    // === error_for_status Tests ===

    #[test]
    fn test_error_for_status_success() {
        assert!(make_response(200, b"OK").error_for_status().is_ok());
    }

    #[test]
    fn test_error_for_status_uses_json_message() {
        let resp = make_response(500, br#"{"message":"Product not found"}"#);
        let err = resp.error_for_status().unwrap_err();
        assert_eq!(
            err,
            FetchError::HttpError {
                status: 500,
                message: "Product not found".to_string()
            }
        );
        assert_eq!(err.server_message(), Some("Product not found"));
    }

    #[test]
    fn test_error_for_status_falls_back_to_text() {
        let err = make_response(404, b"Not Found").error_for_status().unwrap_err();
        assert_eq!(err.server_message(), Some("Not Found"));

        let err = make_response(502, b"").error_for_status().unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.server_message(), None);
        assert_eq!(err.to_string(), "HTTP 502: no details");
    }
}

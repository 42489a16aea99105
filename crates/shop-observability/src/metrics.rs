//! Timing of outbound API calls.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Outcome of a single outbound call.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CallRecord {
    /// HTTP method.
    pub method: String,
    /// Full URL called.
    pub url: String,
    /// HTTP status code, absent when the transport failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Call duration (microseconds).
    pub duration_us: u64,
    /// Response size in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_bytes: Option<usize>,
    /// Whether the call produced a 2xx response.
    pub success: bool,
    /// Error message if the transport failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CallRecord {
    /// Duration as milliseconds, for log fields.
    pub fn duration_ms(&self) -> f64 {
        self.duration_us as f64 / 1000.0
    }

    /// Emit the record through `tracing`.
    pub fn log(&self) {
        match (&self.error, self.status_code) {
            (Some(error), _) => tracing::warn!(
                method = %self.method,
                url = %self.url,
                duration_ms = self.duration_ms(),
                error = %error,
                "api call failed"
            ),
            (None, Some(status)) if !self.success => tracing::warn!(
                method = %self.method,
                url = %self.url,
                status,
                duration_ms = self.duration_ms(),
                "api call returned error status"
            ),
            (None, status) => tracing::debug!(
                method = %self.method,
                url = %self.url,
                status = status.unwrap_or_default(),
                duration_ms = self.duration_ms(),
                bytes = self.response_bytes.unwrap_or_default(),
                "api call"
            ),
        }
    }
}

/// Measures one outbound call.
#[derive(Debug)]
pub struct CallTimer {
    method: String,
    url: String,
    start: Instant,
}

impl CallTimer {
    /// Start timing a call.
    pub fn start(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            start: Instant::now(),
        }
    }

    /// Time elapsed since the call started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Finish with a response.
    pub fn finish(self, status_code: u16, response_bytes: usize) -> CallRecord {
        let duration_us = self.elapsed().as_micros() as u64;
        CallRecord {
            method: self.method,
            url: self.url,
            status_code: Some(status_code),
            duration_us,
            response_bytes: Some(response_bytes),
            success: (200..300).contains(&status_code),
            error: None,
        }
    }

    /// Finish with a transport failure.
    pub fn fail(self, error: impl Into<String>) -> CallRecord {
        let duration_us = self.elapsed().as_micros() as u64;
        CallRecord {
            method: self.method,
            url: self.url,
            status_code: None,
            duration_us,
            response_bytes: None,
            success: false,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_success() {
        let record = CallTimer::start("GET", "http://localhost/cart").finish(200, 42);
        assert!(record.success);
        assert_eq!(record.status_code, Some(200));
        assert_eq!(record.response_bytes, Some(42));
        assert!(record.error.is_none());
    }

    #[test]
    fn test_finish_error_status() {
        let record = CallTimer::start("DELETE", "http://localhost/cart").finish(500, 0);
        assert!(!record.success);
    }

    #[test]
    fn test_fail() {
        let record =
            CallTimer::start("POST", "http://localhost/cart/items").fail("connection refused");
        assert!(!record.success);
        assert_eq!(record.status_code, None);
        assert_eq!(record.error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_record_serializes_without_empty_fields() {
        let record = CallTimer::start("GET", "http://localhost/cart").fail("boom");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("status_code").is_none());
        assert_eq!(json["error"], "boom");
    }
}

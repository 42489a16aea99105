//! Response envelope handling.
//!
//! A backend either returns the payload as the body (`bare`) or wraps it as
//! `{"data": ..., "message": ..., "success": ...}` (`wrapped`). One policy is
//! configured per client and enforced: a body in the other shape is an
//! [`FetchError::EnvelopeError`].

use crate::{FetchError, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

const ENVELOPE_KEYS: [&str; 3] = ["data", "message", "success"];

/// How response bodies are framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopePolicy {
    /// The body is the payload.
    #[default]
    Bare,
    /// The payload sits under `data`.
    Wrapped,
}

impl EnvelopePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvelopePolicy::Bare => "bare",
            EnvelopePolicy::Wrapped => "wrapped",
        }
    }

    /// Decode a required payload.
    pub fn decode<T: DeserializeOwned>(&self, response: &Response) -> Result<T, FetchError> {
        match self.unwrap_payload(response)? {
            Some(value) => from_value(value),
            None => Err(FetchError::ParseError("empty response body".to_string())),
        }
    }

    /// Decode a payload that may legitimately be absent (`204`, empty body,
    /// or `data: null`).
    pub fn decode_optional<T: DeserializeOwned>(
        &self,
        response: &Response,
    ) -> Result<Option<T>, FetchError> {
        self.unwrap_payload(response)?.map(from_value).transpose()
    }

    /// Decode a list; an absent payload is an empty list.
    pub fn decode_list<T: DeserializeOwned>(
        &self,
        response: &Response,
    ) -> Result<Vec<T>, FetchError> {
        Ok(self.decode_optional(response)?.unwrap_or_default())
    }

    /// Check a mutation reply without caring about its payload.
    pub fn check(&self, response: &Response) -> Result<(), FetchError> {
        self.unwrap_payload(response).map(|_| ())
    }

    fn unwrap_payload(&self, response: &Response) -> Result<Option<Value>, FetchError> {
        if response.status == 204 || response.is_empty() {
            return Ok(None);
        }
        let value: Value = response.json()?;
        match self {
            EnvelopePolicy::Bare => {
                if let Value::Object(map) = &value {
                    if looks_wrapped(map) {
                        return Err(FetchError::EnvelopeError(
                            "wrapped body received but the client expects bare payloads"
                                .to_string(),
                        ));
                    }
                }
                Ok(non_null(value))
            }
            EnvelopePolicy::Wrapped => {
                let Value::Object(mut map) = value else {
                    return Err(FetchError::EnvelopeError(
                        "bare body received but the client expects a data/message/success envelope"
                            .to_string(),
                    ));
                };
                if !map.contains_key("data") && !map.contains_key("success") {
                    return Err(FetchError::EnvelopeError(
                        "envelope is missing its data field".to_string(),
                    ));
                }
                if map.get("success").and_then(Value::as_bool) == Some(false) {
                    let message = map
                        .get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("request was not successful")
                        .to_string();
                    return Err(FetchError::Rejected(message));
                }
                Ok(map.remove("data").and_then(non_null))
            }
        }
    }
}

impl fmt::Display for EnvelopePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvelopePolicy {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bare" => Ok(EnvelopePolicy::Bare),
            "wrapped" => Ok(EnvelopePolicy::Wrapped),
            other => Err(FetchError::EnvelopeError(format!("unknown envelope policy: {other}"))),
        }
    }
}

// A lone `message` is a plain bare reply; `data` or `success` marks an envelope.
fn looks_wrapped(map: &Map<String, Value>) -> bool {
    (map.contains_key("data") || map.contains_key("success"))
        && map.keys().all(|k| ENVELOPE_KEYS.contains(&k.as_str()))
}

fn non_null(value: Value) -> Option<Value> {
    (!value.is_null()).then_some(value)
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, FetchError> {
    serde_json::from_value(value).map_err(|e| FetchError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Count {
        count: i64,
    }

    #[test]
    fn test_bare_decode() {
        let resp = Response::json_body(200, &json!({"count": 3}));
        let count: Count = EnvelopePolicy::Bare.decode(&resp).unwrap();
        assert_eq!(count, Count { count: 3 });
    }

    #[test]
    fn test_bare_rejects_wrapped_body() {
        let resp = Response::json_body(200, &json!({"data": {"count": 3}, "success": true}));
        let err = EnvelopePolicy::Bare.decode::<Count>(&resp).unwrap_err();
        assert!(matches!(err, FetchError::EnvelopeError(_)));
    }

    #[test]
    fn test_bare_rejects_envelope_without_data() {
        let resp = Response::json_body(200, &json!({"success": true, "message": "ok"}));
        let err = EnvelopePolicy::Bare.decode::<Value>(&resp).unwrap_err();
        assert!(matches!(err, FetchError::EnvelopeError(_)));
        assert!(EnvelopePolicy::Bare.check(&resp).is_err());

        let resp = Response::json_body(200, &json!({"message": "Item removed"}));
        assert!(EnvelopePolicy::Bare.check(&resp).is_ok());
    }

    #[test]
    fn test_bare_accepts_object_with_data_among_other_fields() {
        let resp = Response::json_body(200, &json!({"data": "x", "count": 1}));
        let value: Value = EnvelopePolicy::Bare.decode(&resp).unwrap();
        assert_eq!(value["count"], 1);
    }

    #[test]
    fn test_wrapped_decode() {
        let resp = Response::json_body(
            200,
            &json!({"data": {"count": 7}, "message": "ok", "success": true}),
        );
        let count: Count = EnvelopePolicy::Wrapped.decode(&resp).unwrap();
        assert_eq!(count.count, 7);
    }

    #[test]
    fn test_wrapped_rejects_bare_body() {
        let resp = Response::json_body(200, &json!([1, 2, 3]));
        let err = EnvelopePolicy::Wrapped.decode::<Vec<i64>>(&resp).unwrap_err();
        assert!(matches!(err, FetchError::EnvelopeError(_)));

        let resp = Response::json_body(200, &json!({"count": 3}));
        let err = EnvelopePolicy::Wrapped.decode::<Count>(&resp).unwrap_err();
        assert!(matches!(err, FetchError::EnvelopeError(_)));
    }

    #[test]
    fn test_wrapped_success_false_is_rejected() {
        let resp = Response::json_body(
            200,
            &json!({"data": null, "message": "Out of stock", "success": false}),
        );
        let err = EnvelopePolicy::Wrapped.check(&resp).unwrap_err();
        assert_eq!(err, FetchError::Rejected("Out of stock".to_string()));
        assert_eq!(err.server_message(), Some("Out of stock"));
    }

    #[test]
    fn test_no_content_is_absent() {
        let resp = Response::no_content();
        assert_eq!(EnvelopePolicy::Bare.decode_optional::<Count>(&resp).unwrap(), None);
        assert_eq!(EnvelopePolicy::Wrapped.decode_optional::<Count>(&resp).unwrap(), None);
        assert!(EnvelopePolicy::Bare.decode::<Count>(&resp).is_err());
    }

    #[test]
    fn test_list_null_is_empty() {
        let resp = Response::json_body(200, &json!({"data": null, "success": true}));
        let items: Vec<i64> = EnvelopePolicy::Wrapped.decode_list(&resp).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("Wrapped".parse::<EnvelopePolicy>().unwrap(), EnvelopePolicy::Wrapped);
        assert!("xml".parse::<EnvelopePolicy>().is_err());
        let policy: EnvelopePolicy = serde_json::from_str("\"bare\"").unwrap();
        assert_eq!(policy, EnvelopePolicy::Bare);
    }
}

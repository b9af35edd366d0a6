//! Typed request bodies.
//!
//! Bodies arrive as untyped JSON. Each request type checks the fields it needs
//! and either yields a typed value or an [`Error::InvalidRequest`] carrying the
//! message sent back to the client.

use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use crate::{Error, Result};

pub const INVALID_JSON: &str = "Request body must be valid JSON";
pub const QUERY_REQUIRED: &str = "The \"query\" field is required and must be a string";
pub const INTERESTS_NOT_ARRAY: &str = "The \"userInterests\" field must be an array";
pub const URL_REQUIRED: &str = "The \"url\" field is required and must be a string";
pub const URL_INVALID: &str = "The \"url\" field must be a valid URL";

pub trait RequestBody: Sized {
    /// Validates an already decoded JSON body.
    fn from_value(body: &Value) -> Result<Self>;

    /// Decodes and validates a raw body. An empty body counts as `{}`.
    fn from_slice(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Self::from_value(&Value::Object(Map::new()));
        }
        let value: Value = serde_json::from_slice(body)
            .map_err(|_| Error::InvalidRequest(INVALID_JSON.to_string()))?;
        Self::from_value(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    /// Interests as sent, echoed back untouched.
    pub user_interests: Vec<Value>,
}

impl SearchRequest {
    /// Interests as plain terms for the scraper. Non-string entries are
    /// rendered as their JSON text.
    pub fn interest_terms(&self) -> Vec<String> {
        self.user_interests
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRequest {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractRequest {
    /// The URL exactly as the client sent it.
    pub url: String,
}

impl RequestBody for SearchRequest {
    fn from_value(body: &Value) -> Result<Self> {
        let query = required_string(body, "query", QUERY_REQUIRED)?;
        let user_interests = match body.get("userInterests") {
            None => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(_) => return Err(Error::InvalidRequest(INTERESTS_NOT_ARRAY.to_string())),
        };
        Ok(Self { query, user_interests })
    }
}

impl RequestBody for AggregateRequest {
    fn from_value(body: &Value) -> Result<Self> {
        let query = required_string(body, "query", QUERY_REQUIRED)?;
        Ok(Self { query })
    }
}

impl RequestBody for ExtractRequest {
    fn from_value(body: &Value) -> Result<Self> {
        let url = required_string(body, "url", URL_REQUIRED)?;
        Url::parse(&url).map_err(|_| Error::InvalidRequest(URL_INVALID.to_string()))?;
        Ok(Self { url })
    }
}

fn required_string(body: &Value, field: &str, message: &str) -> Result<String> {
    match body.get(field).and_then(Value::as_str) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(Error::InvalidRequest(message.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invalid_message<T: std::fmt::Debug>(result: Result<T>) -> String {
        match result {
            Err(Error::InvalidRequest(message)) => message,
            other => panic!("expected InvalidRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_search_request_defaults_interests() {
        let request = SearchRequest::from_value(&json!({"query": "elections"})).unwrap();
        assert_eq!(request.query, "elections");
        assert!(request.user_interests.is_empty());
    }

    #[test]
    fn test_search_request_keeps_interests_in_order() {
        let request = SearchRequest::from_value(&json!({
            "query": "elections",
            "userInterests": ["politics", "economy"]
        }))
        .unwrap();
        assert_eq!(request.user_interests, vec![json!("politics"), json!("economy")]);
        assert_eq!(request.interest_terms(), vec!["politics", "economy"]);
    }

    #[test]
    fn test_search_request_rejects_bad_query() {
        for body in [json!({}), json!({"query": ""}), json!({"query": 42}), json!({"query": null})] {
            assert_eq!(invalid_message(SearchRequest::from_value(&body)), QUERY_REQUIRED);
        }
    }

    #[test]
    fn test_search_request_rejects_bad_interests() {
        let body = json!({"query": "q", "userInterests": "politics"});
        assert_eq!(invalid_message(SearchRequest::from_value(&body)), INTERESTS_NOT_ARRAY);

        let body = json!({"query": "q", "userInterests": null});
        assert_eq!(invalid_message(SearchRequest::from_value(&body)), INTERESTS_NOT_ARRAY);
    }

    #[test]
    fn test_search_request_accepts_any_array() {
        let request = SearchRequest::from_value(&json!({"query": "q", "userInterests": [1, "two", true]})).unwrap();
        assert_eq!(request.user_interests, vec![json!(1), json!("two"), json!(true)]);
        assert_eq!(request.interest_terms(), vec!["1", "two", "true"]);
    }

    #[test]
    fn test_aggregate_request() {
        let request = AggregateRequest::from_value(&json!({"query": "elections", "page": 2})).unwrap();
        assert_eq!(request.query, "elections");
        assert_eq!(invalid_message(AggregateRequest::from_value(&json!([1, 2]))), QUERY_REQUIRED);
    }

    #[test]
    fn test_extract_request_validates_url() {
        let request = ExtractRequest::from_value(&json!({"url": "https://example.com/a"})).unwrap();
        assert_eq!(request.url, "https://example.com/a");

        assert_eq!(invalid_message(ExtractRequest::from_value(&json!({"url": "not a url"}))), URL_INVALID);
        assert_eq!(invalid_message(ExtractRequest::from_value(&json!({"url": "/relative/path"}))), URL_INVALID);
        assert_eq!(invalid_message(ExtractRequest::from_value(&json!({"url": 7}))), URL_REQUIRED);
        assert_eq!(invalid_message(ExtractRequest::from_value(&json!({}))), URL_REQUIRED);
    }

    #[test]
    fn test_from_slice() {
        let request = AggregateRequest::from_slice(br#"{"query": "floods"}"#).unwrap();
        assert_eq!(request.query, "floods");

        assert_eq!(invalid_message(AggregateRequest::from_slice(b"")), QUERY_REQUIRED);
        assert_eq!(invalid_message(AggregateRequest::from_slice(b"{query:")), INVALID_JSON);
    }
}

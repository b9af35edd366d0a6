use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A news article as produced by a collaborator.
///
/// The shape belongs to whichever service returned it, so the record is kept
/// as raw JSON and passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Article(pub Value);

impl Article {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Looks up a top-level string field, if the article is an object carrying one.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for Article {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

//! Response bodies shared by every endpoint.

use serde::Serialize;
use serde_json::Value;
use nd_core::Article;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// `{status, data?, message?}` wrapper around every reply.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            data: Some(data),
            message: None,
        }
    }
}

impl Envelope<()> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            data: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchData {
    pub articles: Vec<Article>,
    pub count: usize,
    pub query: String,
    pub user_interests: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct AggregateData {
    pub articles: Vec<Article>,
    pub count: usize,
    pub query: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractData {
    pub url: String,
    pub content: String,
    pub content_length: usize,
}

#[derive(Debug, Serialize)]
pub struct ServiceAvailability {
    pub scraper: &'static str,
    pub aggregator: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: Status,
    pub message: String,
    pub services: ServiceAvailability,
}

impl HealthReport {
    /// Static liveness marker; the collaborators are not contacted.
    pub fn available() -> Self {
        Self {
            status: Status::Success,
            message: "News service operational".to_string(),
            services: ServiceAvailability {
                scraper: "available",
                aggregator: "available",
            },
        }
    }
}

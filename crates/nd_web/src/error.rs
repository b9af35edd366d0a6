use std::any::Any;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tower_http::catch_panic::ResponseForPanic;
use tracing::error;

use crate::envelope::Envelope;

/// Failure of a single request, already split by who is at fault.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The client sent something unusable. Answered with 400.
    #[error("{0}")]
    InvalidRequest(String),

    /// A delegated call failed. Answered with 500.
    #[error("{0}")]
    CollaboratorFailure(String),
}

impl ApiError {
    /// Wraps a collaborator error, passing its message through as is and
    /// falling back to `fallback` when it has none.
    pub fn collaborator(err: &nd_core::Error, fallback: &str) -> Self {
        let detail = err.detail();
        if detail.trim().is_empty() {
            Self::CollaboratorFailure(fallback.to_string())
        } else {
            Self::CollaboratorFailure(detail)
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::CollaboratorFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidRequest(m) | Self::CollaboratorFailure(m) => m,
        }
    }
}

impl From<nd_core::Error> for ApiError {
    fn from(err: nd_core::Error) -> Self {
        match err {
            nd_core::Error::InvalidRequest(message) => Self::InvalidRequest(message),
            other => Self::CollaboratorFailure(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            Self::InvalidRequest(m) | Self::CollaboratorFailure(m) => m,
        };
        (status, Json(Envelope::error(message))).into_response()
    }
}

/// Turns a panicking handler into a 500 error envelope with the given message.
#[derive(Debug, Clone, Copy)]
pub struct PanicEnvelope(pub &'static str);

impl ResponseForPanic for PanicEnvelope {
    type ResponseBody = axum::body::Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response {
        let detail = err
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| err.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        error!("💥 Handler panicked: {}", detail);
        ApiError::CollaboratorFailure(self.0.to_string()).into_response()
    }
}

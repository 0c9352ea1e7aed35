//! Error types for the HTTP surface.
//!
//! Every failure path serializes to a JSON `{"error": ...}` body; a raw
//! panic or stack trace never reaches the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::gateway::GatewayError;
use crate::models::ErrorBody;

/// API error taxonomy
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed URL; the client must correct its input
    #[error("{0}")]
    InvalidInput(String),

    /// Deployment misconfiguration; not retryable by the client
    #[error("Internal Server Error: Missing API Key")]
    Config,

    /// Provider call failed; retryable at the client's discretion
    #[error("Error checking URL: {0}")]
    Upstream(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Config | Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::EmptyUrl => Self::InvalidInput("URL not provided".into()),
            GatewayError::MissingApiKey => Self::Config,
            other => Self::Upstream(other.to_string()),
        }
    }
}

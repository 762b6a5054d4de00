//! API error taxonomy and HTTP mapping.
//!
//! Everything bubbles up to the request handler and is converted here; no
//! error is retried or recovered locally.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::agent::AgentError;

use super::types::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    /// One or both palm image uploads are absent.
    #[error("Both palm images are required.")]
    MissingImages,

    /// A required text field is absent from the form.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The multipart body could not be read.
    #[error("Invalid multipart request: {0}")]
    Multipart(String),

    /// The image store failed before the agent ever ran.
    #[error("{0}")]
    Upstream(String),

    /// The agent loop failed (provider error, malformed tool call, round cap).
    #[error(transparent)]
    Agent(#[from] AgentError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingImages | ApiError::MissingField(_) | ApiError::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Upstream(_) | ApiError::Agent(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

//! API request and response types.

use serde::Serialize;

/// Successful reading response.
#[derive(Debug, Clone, Serialize)]
pub struct ReadResponse {
    /// The generated astrology report
    pub result: String,
}

/// Error response body shared by every failure path.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

//! Typed errors for inference requests
//!
//! Every transport-level failure is classified here before the dispatcher
//! flattens it into an `InferenceResult::Failure`, so the cause text the
//! operator sees names the failure mode without string matching upstream.

use thiserror::Error;

/// Inference request errors with typed variants
///
/// - `Unauthorized` (401) - missing or invalid API key
/// - `RateLimited` (429) - quota exceeded on the hosted endpoint
/// - `BadRequest` (400) - endpoint rejected the payload
/// - `NotFound` (404) - unknown model identifier
/// - `ServiceError` (5xx) - model loading or server-side issue
/// - `Network` - connection/timeout
/// - `Decode` - 2xx response whose body is not JSON
/// - `Other` - catch-all for unhandled errors
#[derive(Debug, Error)]
pub enum LlmError {
    /// Authentication token is missing, expired or invalid (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Malformed request (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Model identifier unknown to the endpoint (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server-side error (HTTP 5xx)
    ///
    /// The hosted API answers 503 while a cold model is loading.
    #[error("Service error: {0}")]
    ServiceError(String),

    /// Network connectivity issue (connection refused, DNS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The endpoint answered with a body that is not JSON
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// Other errors not fitting the above categories
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl LlmError {
    /// Convert HTTP status code and error text into typed LlmError
    pub fn from_http_status(status: reqwest::StatusCode, error_text: String) -> Self {
        let detail = if error_text.is_empty() {
            status.to_string()
        } else {
            format!("{} {}", status, error_text)
        };
        match status.as_u16() {
            401 => LlmError::Unauthorized(detail),
            429 => LlmError::RateLimited(detail),
            400 => LlmError::BadRequest(detail),
            404 => LlmError::NotFound(detail),
            500..=599 => LlmError::ServiceError(detail),
            _ => LlmError::Other(anyhow::anyhow!("HTTP {}", detail)),
        }
    }

    /// Convert network/connection errors into typed LlmError
    pub fn from_network_error(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Network(format!("Request timeout: {}", e))
        } else if e.is_connect() {
            LlmError::Network(format!("Connection failed: {}", e))
        } else if e.is_decode() {
            LlmError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            Self::from_http_status(status, e.to_string())
        } else {
            LlmError::Other(e.into())
        }
    }
}

//! Error categorization.
//!
//! Turns upstream responses and transport failures into [`ApiError`]s.

use serde::Deserialize;

use super::types::{ApiError, Endpoint};
use crate::config::NETWORK_ERROR_FALLBACK;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Builds the error for a non-success response.
///
/// Uses the structured `error.message` field of the body when the body parses
/// and the message is non-empty, otherwise `"<endpoint> HTTP <status>"`.
pub fn error_from_response(endpoint: Endpoint, status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .and_then(|error| error.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("{} HTTP {}", endpoint, status));

    ApiError::Http {
        endpoint,
        status,
        message,
    }
}

/// Reduces a transport failure to its message.
///
/// The request URL is stripped first so the API key never reaches a log line
/// or the operator's screen.
pub fn error_from_transport(error: reqwest::Error) -> ApiError {
    let message = error.without_url().to_string();
    if message.trim().is_empty() {
        ApiError::Transport(NETWORK_ERROR_FALLBACK.to_string())
    } else {
        ApiError::Transport(message)
    }
}

//! GitHub API error detection
//!
//! Turns unexpected responses into `HttpStatus` errors, pulling the
//! human-readable `message` out of GitHub's error documents when present.

use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::GilbertError;
use crate::github::transport::ApiResponse;

/// Error document returned by the GitHub REST API
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
    #[allow(dead_code)]
    documentation_url: Option<String>,
}

/// Build an `HttpStatus` error for a response the caller did not expect
pub fn classify_status(response: &ApiResponse) -> GilbertError {
    let message = extract_message(&response.body).map(|m| with_hint(response.status, m));

    GilbertError::HttpStatus {
        status: response.status,
        message,
    }
}

/// Extract the `message` field of a GitHub error body
fn extract_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|e| e.message)
        .filter(|m| !m.is_empty())
}

fn with_hint(status: StatusCode, message: String) -> String {
    let hint = if is_rate_limit_error(status, &message) {
        "API rate limit exceeded. Please wait a few minutes and try again."
    } else {
        match status {
            StatusCode::UNAUTHORIZED => "Your token or password was rejected.",
            StatusCode::NOT_FOUND => "The gist does not exist or is not visible to you.",
            _ => return message,
        }
    };
    format!("{}\n\n  → {}", message, hint)
}

/// Check if error is a rate limit error
fn is_rate_limit_error(status: StatusCode, message: &str) -> bool {
    (status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS)
        && message.to_lowercase().contains("rate limit")
}

//! Custom error types for gilbert
//!
//! User-friendly error messages for all failure scenarios.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the gilbert application
#[derive(Error, Debug)]
pub enum GilbertError {
    /// A local file could not be opened or read
    #[error("Cannot read '{}': {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// The terminal could not be switched into no-echo mode, or input failed
    #[error("Cannot read credentials from the terminal: {0}\n\n  → Run gilbert from an interactive terminal, or log in with 'gilbert auth login'.")]
    AuthInput(String),

    /// Connection-level failure or malformed request
    #[error("Network request failed: {0}\n\n  → Check your internet connection.")]
    Transport(String),

    /// Response body did not match the expected JSON shape
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Server answered with an unexpected status code
    #[error("GitHub returned {status}{}", status_detail(.message))]
    HttpStatus {
        status: StatusCode,
        message: Option<String>,
    },

    /// No token is configured and basic auth was not requested
    #[error("You are not logged in to GitHub.\n\n  → Run 'gilbert auth login' to store a token, set GITHUB_TOKEN, or pass --basic.")]
    NotAuthenticated,

    /// Credential storage error
    #[error("Cannot access secure storage: {0}\n\n  → On macOS: Make sure Keychain Access is available.\n  → On Linux: Ensure a secret service (like gnome-keyring) is running.")]
    Credential(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML serialization/deserialization error
    #[error("Configuration file is invalid: {0}")]
    Toml(String),

    /// Endpoint URL could not be parsed
    #[error("Invalid API URL: {0}\n\n  → Check it with 'gilbert config get api-url'.")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid input from user
    #[error("{0}")]
    InvalidInput(String),

    /// Operation cancelled by user
    #[error("Operation cancelled.")]
    Cancelled,

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

impl From<reqwest::Error> for GilbertError {
    fn from(err: reqwest::Error) -> Self {
        GilbertError::Transport(err.to_string())
    }
}

impl From<keyring::Error> for GilbertError {
    fn from(err: keyring::Error) -> Self {
        GilbertError::Credential(err.to_string())
    }
}

impl From<toml::de::Error> for GilbertError {
    fn from(err: toml::de::Error) -> Self {
        GilbertError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for GilbertError {
    fn from(err: toml::ser::Error) -> Self {
        GilbertError::Toml(err.to_string())
    }
}

fn status_detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

/// Result type alias using GilbertError
pub type Result<T> = std::result::Result<T, GilbertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_message_with_detail() {
        let err = GilbertError::HttpStatus {
            status: StatusCode::NOT_FOUND,
            message: Some("Not Found".to_string()),
        };
        assert_eq!(err.to_string(), "GitHub returned 404 Not Found: Not Found");
    }

    #[test]
    fn test_http_status_message_without_detail() {
        let err = GilbertError::HttpStatus {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert_eq!(err.to_string(), "GitHub returned 500 Internal Server Error");
    }
}

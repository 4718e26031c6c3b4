//! Application configuration management
//!
//! Handles loading and saving non-secret settings:
//! - Gist API endpoint
//! - Request timeout
//! - HTTP status handling policy
//!
//! Tokens never live here; see [`crate::core::credentials`].

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{GilbertError, Result};

/// Default gists collection endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com/gists";

/// How non-success HTTP statuses are reported by the gist client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StatusPolicy {
    /// Any non-2xx status is an error, for every operation
    #[default]
    Strict,
    /// Create returns an empty URL unless 201, fetch decodes any body,
    /// delete ignores the status, update requires exactly 200
    Legacy,
}

impl StatusPolicy {
    /// Get the config file identifier
    pub fn name(&self) -> &'static str {
        match self {
            StatusPolicy::Strict => "strict",
            StatusPolicy::Legacy => "legacy",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "strict" => Some(StatusPolicy::Strict),
            "legacy" => Some(StatusPolicy::Legacy),
            _ => None,
        }
    }

    /// Get all available policies
    pub fn all() -> &'static [StatusPolicy] {
        &[StatusPolicy::Strict, StatusPolicy::Legacy]
    }
}

impl std::fmt::Display for StatusPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gists collection endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Status handling policy
    #[serde(default)]
    pub status_policy: StatusPolicy,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            status_policy: StatusPolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, or create default if not exists
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "gilbert", "gilbert")
            .ok_or_else(|| GilbertError::Config("Could not determine config directory".into()))?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Parsed gists endpoint
    pub fn endpoint(&self) -> Result<Url> {
        parse_endpoint(&self.api_url)
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Set the endpoint, rejecting URLs that cannot address sub-resources
    pub fn set_api_url(&mut self, value: &str) -> Result<()> {
        parse_endpoint(value)?;
        self.api_url = value.trim_end_matches('/').to_string();
        Ok(())
    }

    /// Set the timeout from user input
    pub fn set_timeout(&mut self, value: &str) -> Result<()> {
        let secs: u64 = value.parse().map_err(|_| {
            GilbertError::InvalidInput(format!("Invalid timeout '{}': expected seconds", value))
        })?;
        if secs == 0 {
            return Err(GilbertError::InvalidInput(
                "Timeout must be at least one second".to_string(),
            ));
        }
        self.timeout_secs = secs;
        Ok(())
    }

    /// Set the status policy
    pub fn set_status_policy(&mut self, policy: StatusPolicy) {
        self.status_policy = policy;
    }
}

/// Parse an endpoint URL, checking it can carry an `/{id}` path segment
///
/// A trailing `/` is dropped so creates post to the collection itself.
pub fn parse_endpoint(value: &str) -> Result<Url> {
    let mut url = Url::parse(value)?;
    url.path_segments_mut()
        .map_err(|_| {
            GilbertError::Config(format!("'{}' cannot be used as an API endpoint", value))
        })?
        .pop_if_empty();
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_policy_from_str() {
        assert_eq!(StatusPolicy::from_str("strict"), Some(StatusPolicy::Strict));
        assert_eq!(StatusPolicy::from_str("legacy"), Some(StatusPolicy::Legacy));
        assert_eq!(StatusPolicy::from_str("lenient"), None);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_url, "https://api.github.com/gists");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.status_policy, StatusPolicy::Strict);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("status_policy = \"legacy\"\n").unwrap();
        assert_eq!(config.status_policy, StatusPolicy::Legacy);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_set_api_url_trims_trailing_slash() {
        let mut config = Config::default();
        config.set_api_url("http://localhost:8080/gists/").unwrap();
        assert_eq!(config.api_url, "http://localhost:8080/gists");
    }

    #[test]
    fn test_parse_endpoint_drops_trailing_slash() {
        let url = parse_endpoint("https://api.github.com/gists/").unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/gists");

        let url = parse_endpoint("http://localhost:8080/gists").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/gists");
    }

    #[test]
    fn test_set_api_url_rejects_garbage() {
        let mut config = Config::default();
        assert!(config.set_api_url("not a url").is_err());
        assert!(config.set_api_url("mailto:someone@example.com").is_err());
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_set_timeout() {
        let mut config = Config::default();
        config.set_timeout("5").unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.set_timeout("0").is_err());
        assert!(config.set_timeout("soon").is_err());
    }
}

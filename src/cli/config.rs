//! Configuration CLI command handlers

use crate::cli::commands::{ConfigCommand, ConfigKey};
use crate::core::config::{Config, StatusPolicy, DEFAULT_API_URL};
use crate::error::{GilbertError, Result};

/// Handle configuration commands
pub fn handle_config(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Set { key, value } => handle_set(key, value),
        ConfigCommand::Get { key } => handle_get(key),
        ConfigCommand::Remove { key } => handle_remove(key),
    }
}

/// Handle setting a configuration value
fn handle_set(key: ConfigKey, value: String) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        ConfigKey::ApiUrl => {
            config.set_api_url(&value)?;
            println!("API URL set to: {}", config.api_url);
        }
        ConfigKey::Timeout => {
            config.set_timeout(&value)?;
            println!("Request timeout set to: {}s", config.timeout_secs);
        }
        ConfigKey::StatusPolicy => {
            let policy = parse_policy(&value)?;
            config.set_status_policy(policy);
            println!("Status policy set to: {}", policy);
        }
    }

    config.save()
}

/// Handle getting a configuration value
fn handle_get(key: ConfigKey) -> Result<()> {
    let config = Config::load()?;
    match key {
        ConfigKey::ApiUrl => println!("API URL: {}", config.api_url),
        ConfigKey::Timeout => println!("Request timeout: {}s", config.timeout_secs),
        ConfigKey::StatusPolicy => println!("Status policy: {}", config.status_policy),
    }
    Ok(())
}

/// Handle resetting a configuration value
fn handle_remove(key: ConfigKey) -> Result<()> {
    let mut config = Config::load()?;
    let defaults = Config::default();

    match key {
        ConfigKey::ApiUrl => {
            config.api_url = defaults.api_url;
            println!("API URL reset to default: {}", DEFAULT_API_URL);
        }
        ConfigKey::Timeout => {
            config.timeout_secs = defaults.timeout_secs;
            println!("Request timeout reset to default: {}s", config.timeout_secs);
        }
        ConfigKey::StatusPolicy => {
            config.set_status_policy(StatusPolicy::default());
            println!("Status policy reset to default: {}", config.status_policy);
        }
    }

    config.save()
}

fn parse_policy(value: &str) -> Result<StatusPolicy> {
    StatusPolicy::from_str(value).ok_or_else(|| {
        GilbertError::InvalidInput(format!(
            "Invalid status policy '{}'. Available policies: {}",
            value,
            StatusPolicy::all()
                .iter()
                .map(|p| p.name())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policy_lists_choices() {
        assert_eq!(parse_policy("legacy").unwrap(), StatusPolicy::Legacy);

        let err = parse_policy("loose").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid status policy 'loose'. Available policies: strict, legacy"
        );
    }
}

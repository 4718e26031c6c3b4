//! Token storage using the system keyring
//!
//! The GitHub token is read from, in priority order:
//! 1. The `GITHUB_TOKEN` environment variable
//! 2. The system keyring (macOS Keychain, Linux Secret Service), written
//!    by `gilbert auth login`
//!
//! Whatever is found is handed to the client as an explicit value; nothing
//! below this module reads global state.

use keyring::Entry;
use secrecy::{ExposeSecret, SecretString};

use crate::error::{GilbertError, Result};

const SERVICE_NAME: &str = "gilbert";
const GITHUB_TOKEN_KEY: &str = "github_token";

const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Where a token was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Environment,
    Keyring,
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSource::Environment => write!(f, "{} environment variable", GITHUB_TOKEN_ENV),
            TokenSource::Keyring => write!(f, "system keyring"),
        }
    }
}

/// Credential store for the GitHub token
pub struct CredentialStore;

impl CredentialStore {
    /// Store the GitHub token in the keyring
    pub fn store_github_token(token: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, GITHUB_TOKEN_KEY)?;
        entry.set_password(token)?;
        Ok(())
    }

    /// Retrieve the GitHub token
    ///
    /// Priority: environment variable > keyring
    pub fn get_github_token() -> Result<Option<SecretString>> {
        Ok(Self::find_github_token()?.map(|(token, _)| token))
    }

    /// Retrieve the GitHub token together with where it came from
    pub fn find_github_token() -> Result<Option<(SecretString, TokenSource)>> {
        if let Ok(token) = std::env::var(GITHUB_TOKEN_ENV) {
            if !token.is_empty() {
                return Ok(Some((SecretString::from(token), TokenSource::Environment)));
            }
        }

        Ok(Self::fetch_github_token_from_keyring()?.map(|t| (t, TokenSource::Keyring)))
    }

    fn fetch_github_token_from_keyring() -> Result<Option<SecretString>> {
        let entry = Entry::new(SERVICE_NAME, GITHUB_TOKEN_KEY)?;
        match entry.get_password() {
            Ok(password) if password.is_empty() => Ok(None),
            Ok(password) => Ok(Some(SecretString::from(password))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(GilbertError::Credential(format!(
                "Cannot access system keychain. Make sure your keyring is unlocked. ({})",
                e
            ))),
        }
    }

    /// Delete the token from the keyring
    pub fn delete_github_token() -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, GITHUB_TOKEN_KEY)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted
            Err(e) => Err(GilbertError::Credential(e.to_string())),
        }
    }

    /// Get a masked version of a token for display (shows first 4 and last 4 chars)
    pub fn mask_token(token: &SecretString) -> String {
        let exposed = token.expose_secret();
        let chars: Vec<char> = exposed.chars().collect();
        if chars.len() <= 8 {
            "*".repeat(chars.len())
        } else {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}...{}", head, tail)
        }
    }
}

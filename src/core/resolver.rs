//! Per-request credential selection
//!
//! A request is authenticated either with the stored token or with a
//! username/password pair collected on the spot. The token is an explicit
//! constructor value; the resolver never looks it up itself.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};

use crate::core::prompt::Prompter;
use crate::error::{GilbertError, Result};

/// Credential attached to a single request
#[derive(Debug, Clone)]
pub enum Credential {
    /// Pre-issued token, sent as `Authorization: token <value>`
    Token(SecretString),
    /// Interactive login, sent as standard HTTP basic auth
    Basic {
        username: String,
        password: SecretString,
    },
}

impl Credential {
    /// Value of the `Authorization` header for this credential
    pub fn authorization(&self) -> SecretString {
        match self {
            Credential::Token(token) => {
                SecretString::from(format!("token {}", token.expose_secret()))
            }
            Credential::Basic { username, password } => {
                let pair = format!("{}:{}", username, password.expose_secret());
                SecretString::from(format!("Basic {}", STANDARD.encode(pair)))
            }
        }
    }

    /// Scheme name, safe to log
    pub fn scheme(&self) -> &'static str {
        match self {
            Credential::Token(_) => "token",
            Credential::Basic { .. } => "basic",
        }
    }
}

/// Chooses between the stored token and an interactive login
pub struct CredentialResolver<P> {
    token: Option<SecretString>,
    prompter: P,
}

impl<P: Prompter> CredentialResolver<P> {
    /// Create a resolver; an empty token counts as no token
    pub fn new(token: Option<SecretString>, prompter: P) -> Self {
        let token = token.filter(|t| !t.expose_secret().is_empty());
        Self { token, prompter }
    }

    /// Whether a non-empty token was supplied
    pub fn has_stored_token(&self) -> bool {
        self.token.is_some()
    }

    /// The stored token as a credential
    pub fn token_credential(&self) -> Result<Credential> {
        self.token
            .clone()
            .map(Credential::Token)
            .ok_or(GilbertError::NotAuthenticated)
    }

    /// Credential for one request
    ///
    /// With `use_basic_auth` the user is prompted for a username and a
    /// password; otherwise the stored token is used.
    pub fn resolve_for_request(&self, use_basic_auth: bool) -> Result<Credential> {
        if !use_basic_auth {
            return self.token_credential();
        }

        let username = self.prompter.prompt_username()?;
        let password = self.prompter.prompt_password()?;
        tracing::debug!("Collected basic auth credentials for '{}'", username);

        Ok(Credential::Basic { username, password })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::prompt::MockPrompter;

    fn silent_prompter() -> MockPrompter {
        let mut prompter = MockPrompter::new();
        prompter.expect_prompt_username().never();
        prompter.expect_prompt_password().never();
        prompter
    }

    #[test]
    fn test_token_authorization_header() {
        let credential = Credential::Token(SecretString::from("abc123"));
        assert_eq!(credential.authorization().expose_secret(), "token abc123");
        assert_eq!(credential.scheme(), "token");
    }

    #[test]
    fn test_basic_authorization_header() {
        let credential = Credential::Basic {
            username: "octocat".to_string(),
            password: SecretString::from("hunter2"),
        };
        // base64("octocat:hunter2")
        assert_eq!(
            credential.authorization().expose_secret(),
            "Basic b2N0b2NhdDpodW50ZXIy"
        );
    }

    #[test]
    fn test_has_stored_token() {
        let resolver = CredentialResolver::new(Some("abc".into()), silent_prompter());
        assert!(resolver.has_stored_token());

        let resolver = CredentialResolver::new(Some("".into()), silent_prompter());
        assert!(!resolver.has_stored_token());

        let resolver = CredentialResolver::new(None, silent_prompter());
        assert!(!resolver.has_stored_token());
    }

    #[test]
    fn test_resolve_token_without_prompting() {
        let resolver = CredentialResolver::new(Some("abc".into()), silent_prompter());
        let credential = resolver.resolve_for_request(false).unwrap();
        assert!(matches!(credential, Credential::Token(ref t) if t.expose_secret() == "abc"));
    }

    #[test]
    fn test_resolve_without_token_fails() {
        let resolver = CredentialResolver::new(None, silent_prompter());
        let err = resolver.resolve_for_request(false).unwrap_err();
        assert!(matches!(err, GilbertError::NotAuthenticated));
    }

    #[test]
    fn test_resolve_basic_prompts_once_each() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_prompt_username()
            .times(1)
            .returning(|| Ok("octocat".to_string()));
        prompter
            .expect_prompt_password()
            .times(1)
            .returning(|| Ok(SecretString::from("hunter2")));

        // Basic auth wins even when a token exists
        let resolver = CredentialResolver::new(Some("abc".into()), prompter);
        match resolver.resolve_for_request(true).unwrap() {
            Credential::Basic { username, password } => {
                assert_eq!(username, "octocat");
                assert_eq!(password.expose_secret(), "hunter2");
            }
            other => panic!("expected basic credential, got {:?}", other),
        }
    }

    #[test]
    fn test_password_failure_propagates() {
        let mut prompter = MockPrompter::new();
        prompter
            .expect_prompt_username()
            .returning(|| Ok("octocat".to_string()));
        prompter
            .expect_prompt_password()
            .returning(|| Err(GilbertError::AuthInput("not a tty".to_string())));

        let resolver = CredentialResolver::new(None, prompter);
        let err = resolver.resolve_for_request(true).unwrap_err();
        assert!(matches!(err, GilbertError::AuthInput(_)));
    }
}

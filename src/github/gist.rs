//! Gist API client
//!
//! Create, fetch, update and delete over any [`Transport`]. Every operation
//! is exactly one round trip; nothing is retried or cached.

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use url::Url;

use crate::core::config::StatusPolicy;
use crate::core::prompt::Prompter;
use crate::core::resolver::{Credential, CredentialResolver};
use crate::error::{GilbertError, Result};
use crate::github::error_handler::classify_status;
use crate::github::payload::{Gist, GistResponse, Payload};
use crate::github::transport::{ApiRequest, ApiResponse, Transport};

/// Client for the gists endpoint
pub struct GistClient<T> {
    transport: T,
    endpoint: Url,
    token: Option<SecretString>,
    policy: StatusPolicy,
}

impl<T: Transport> GistClient<T> {
    /// Create a client for `endpoint` (the gists collection URL)
    ///
    /// `token` authenticates fetch, update and delete, and token-only
    /// creates. An empty token counts as no token.
    pub fn new(transport: T, endpoint: Url, token: Option<SecretString>) -> Self {
        Self {
            transport,
            endpoint,
            token: token.filter(|t| !t.expose_secret().is_empty()),
            policy: StatusPolicy::default(),
        }
    }

    /// Choose how unexpected status codes are reported
    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Create
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a gist with an explicitly chosen credential
    pub async fn create(&self, payload: &Payload, credential: &Credential) -> Result<GistResponse> {
        if payload.files.is_empty() {
            return Err(GilbertError::InvalidInput(
                "A gist needs at least one file".to_string(),
            ));
        }

        let request = ApiRequest::new(Method::POST, self.endpoint.clone())
            .authorization(credential.authorization())
            .json_body(serde_json::to_string(payload)?);
        let response = self.exchange(request, credential.scheme()).await?;

        match self.policy {
            StatusPolicy::Strict => {
                self.ensure_success(&response)?;
                decode(&response)
            }
            StatusPolicy::Legacy if response.status == StatusCode::CREATED => decode(&response),
            StatusPolicy::Legacy => {
                tracing::warn!(
                    "Gist was not created ({}); returning an empty URL",
                    response.status
                );
                Ok(GistResponse::default())
            }
        }
    }

    /// Create a gist, prompting for a login when `use_basic_auth` is set
    pub async fn create_with_basic_auth_option<P: Prompter>(
        &self,
        payload: &Payload,
        resolver: &CredentialResolver<P>,
        use_basic_auth: bool,
    ) -> Result<GistResponse> {
        let credential = resolver.resolve_for_request(use_basic_auth)?;
        self.create(payload, &credential).await
    }

    /// Create a gist with the stored token
    pub async fn create_with_token(&self, payload: &Payload) -> Result<GistResponse> {
        let credential = self.token_credential()?;
        self.create(payload, &credential).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Fetch / Update / Delete
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch a gist by id
    pub async fn get(&self, id: &str) -> Result<Gist> {
        let request = self.token_request(Method::GET, id)?;
        let response = self.exchange(request, "token").await?;

        if self.policy == StatusPolicy::Strict {
            self.ensure_success(&response)?;
        }
        decode(&response)
    }

    /// Delete a gist by id
    pub async fn delete(&self, id: &str) -> Result<()> {
        let request = self.token_request(Method::DELETE, id)?;
        let response = self.exchange(request, "token").await?;

        match self.policy {
            StatusPolicy::Strict => self.ensure_success(&response),
            StatusPolicy::Legacy => {
                if !response.status.is_success() {
                    tracing::warn!("Ignoring {} from delete", response.status);
                }
                Ok(())
            }
        }
    }

    /// Replace the given files (and optionally the description) of a gist
    pub async fn patch(&self, id: &str, gist: &Gist) -> Result<GistResponse> {
        if gist.files.is_empty() {
            return Err(GilbertError::InvalidInput(
                "Nothing to update: no files given".to_string(),
            ));
        }

        let request = self
            .token_request(Method::PATCH, id)?
            .json_body(serde_json::to_string(gist)?);
        let response = self.exchange(request, "token").await?;

        match self.policy {
            StatusPolicy::Strict => self.ensure_success(&response)?,
            StatusPolicy::Legacy if response.status != StatusCode::OK => {
                return Err(classify_status(&response));
            }
            StatusPolicy::Legacy => {}
        }
        decode(&response)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn token_credential(&self) -> Result<Credential> {
        self.token
            .clone()
            .map(Credential::Token)
            .ok_or(GilbertError::NotAuthenticated)
    }

    /// Token-authenticated request to `{endpoint}/{id}`
    fn token_request(&self, method: Method, id: &str) -> Result<ApiRequest> {
        let credential = self.token_credential()?;
        let url = self.gist_url(id)?;
        Ok(ApiRequest::new(method, url).authorization(credential.authorization()))
    }

    /// `{endpoint}/{id}`, with the id as one percent-encoded segment
    fn gist_url(&self, id: &str) -> Result<Url> {
        if id.is_empty() {
            return Err(GilbertError::InvalidInput("Gist id is empty".to_string()));
        }

        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| {
                GilbertError::Config(format!(
                    "'{}' cannot be used as an API endpoint",
                    self.endpoint
                ))
            })?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    async fn exchange(&self, request: ApiRequest, scheme: &str) -> Result<ApiResponse> {
        tracing::debug!("{} {} ({} auth)", request.method, request.url, scheme);
        let response = self.transport.send(request).await?;
        tracing::debug!("-> {}", response.status);
        Ok(response)
    }

    fn ensure_success(&self, response: &ApiResponse) -> Result<()> {
        if response.status.is_success() {
            Ok(())
        } else {
            Err(classify_status(response))
        }
    }
}

fn decode<D: DeserializeOwned>(response: &ApiResponse) -> Result<D> {
    Ok(serde_json::from_str(&response.body)?)
}

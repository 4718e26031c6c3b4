//! HTTP transport seam
//!
//! The gist client speaks to the network only through [`Transport`], a
//! single request/response call. [`HttpTransport`] is the reqwest-backed
//! implementation used by the binary.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::{GilbertError, Result};

/// Media type GitHub recommends for REST calls
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// How long to wait for a TCP/TLS connection
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// An outgoing API call
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    /// Full `Authorization` header value
    pub authorization: Option<SecretString>,
    /// JSON body
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            authorization: None,
            body: None,
        }
    }

    pub fn authorization(mut self, value: SecretString) -> Self {
        self.authorization = Some(value);
        self
    }

    pub fn json_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }
}

/// A completed round trip; the body has been read in full
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Sends one request and returns the response
///
/// Implementations report connection-level failures as
/// [`GilbertError::Transport`] and must not interpret the status code.
pub trait Transport {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse>> + Send;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("gilbert/{}", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .header(ACCEPT, GITHUB_ACCEPT);

        if let Some(authorization) = &request.authorization {
            builder = builder.header(AUTHORIZATION, authorization.expose_secret());
        }
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GilbertError::Transport(format!("Failed to read response body: {}", e)))?;

        Ok(ApiResponse { status, body })
    }
}

//! HTTP transport for GraphQL requests.
//!
//! [`Transport`] is the seam between request building and the network.
//! [`ReqwestTransport`] posts to `<base>/api/v1/graphql/query`; tests swap in
//! a stub implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{ClientError, Result};
use crate::query::GraphQLQuery;

/// Path of the GraphQL endpoint, relative to the registry base URL.
pub const GRAPHQL_PATH: &str = "api/v1/graphql/query";

/// Default registry base URL.
pub const DEFAULT_URL: &str = "http://localhost:8042";

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Default whole-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends one GraphQL request and returns the decoded response envelope.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute `query` and return the raw JSON envelope.
    async fn execute(&self, query: &GraphQLQuery) -> Result<Value>;
}

/// Connection settings for a registry client.
#[derive(Debug)]
pub struct ClientConfig {
    /// Registry base URL.
    pub url: String,
    /// Bearer token sent in the `Authorization` header.
    pub token: Option<SecretString>,
    /// Extra headers sent with every request.
    pub headers: Vec<(String, String)>,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            token: None,
            headers: Vec::new(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Config for `url` with default timeouts and no credentials.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Add an extra header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Full GraphQL endpoint URL.
    pub fn endpoint(&self) -> Result<reqwest::Url> {
        let invalid = |reason: String| ClientError::InvalidUrl {
            url: self.url.clone(),
            reason,
        };
        let mut base = reqwest::Url::parse(self.url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(GRAPHQL_PATH).map_err(|e| invalid(e.to_string()))
    }

    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| ClientError::InvalidHeader {
                    name: AUTHORIZATION.to_string(),
                    reason: e.to_string(),
                })?;
            value.set_sensitive(true);
            let _ = headers.insert(AUTHORIZATION, value);
        }
        for (name, value) in &self.headers {
            let invalid = |reason: String| ClientError::InvalidHeader {
                name: name.clone(),
                reason,
            };
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
            let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
            let _ = headers.insert(header_name, header_value);
        }
        Ok(headers)
    }
}

/// Production transport backed by `reqwest`.
#[derive(Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    endpoint: reqwest::Url,
    request_timeout: Duration,
}

impl ReqwestTransport {
    /// Build a transport from connection settings.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let endpoint = config.endpoint()?;
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .default_headers(config.default_headers()?)
            .user_agent(concat!("epr/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            request_timeout: config.request_timeout,
        })
    }

    /// Endpoint requests are posted to.
    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }

    fn map_send_error(&self, error: &reqwest::Error) -> ClientError {
        if error.is_timeout() {
            ClientError::Timeout(self.request_timeout)
        } else {
            ClientError::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, query: &GraphQLQuery) -> Result<Value> {
        debug!(endpoint = %self.endpoint, query = %query.query, "sending GraphQL request");
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(query)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.map_send_error(&e))?;
        debug!(status = status.as_u16(), bytes = body.len(), "received GraphQL response");

        match serde_json::from_slice::<Value>(&body) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => {
                let body = String::from_utf8_lossy(&body).into_owned();
                warn!(status = status.as_u16(), "registry returned non-JSON error response");
                Err(ClientError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
            Err(e) => Err(ClientError::Decode(e.to_string())),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

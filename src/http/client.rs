//! HTTP client for the Solr select handler
//!
//! Provides a thin client that handles:
//! - Client-wide timeouts, reported as `Error::Timeout`
//! - Non-200 answers, reported as `Error::Upstream` with the full body
//! - Default headers and user agent
//!
//! Every call makes exactly one attempt. Retrying is left to callers.

use crate::error::{Error, Result};
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout, `None` to wait indefinitely
    pub timeout: Option<Duration>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            default_headers: HashMap::new(),
            user_agent: format!("solr-cursor/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set or clear the request timeout
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Query parameters for a single request, sent in insertion order
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    pub query: Vec<(String, String)>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Look up the first value of a query parameter
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP client making single-attempt requests
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// GET `url` and return the full body of a `200 OK` response
    ///
    /// Any other status becomes `Error::Upstream` carrying the body. A body
    /// that cannot be read in full is a transport error, whatever the status.
    pub async fn get_text(&self, url: &Url, config: RequestConfig) -> Result<String> {
        let timeout = self.config.timeout;

        let mut req = self.client.get(url.clone());

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        let response = req
            .send()
            .await
            .map_err(|e| classify_transport_error(e, timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| classify_transport_error(e, timeout))?;

        if status != StatusCode::OK {
            debug!("Request failed: GET {} -> {}", url, status.as_u16());
            return Err(Error::upstream(status.as_u16(), body));
        }

        debug!("Request succeeded: GET {}", url);
        Ok(body)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Map a reqwest failure to a transport error, singling out timeouts
fn classify_transport_error(error: reqwest::Error, timeout: Option<Duration>) -> Error {
    match timeout {
        Some(timeout) if error.is_timeout() => Error::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        },
        _ => Error::Http(error),
    }
}

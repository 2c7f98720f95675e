//! Cursor configuration
//!
//! Everything needed to walk one Solr collection: where the server lives,
//! which collection to read, how many documents to request per page and the
//! sort that keeps the cursor stable.

use crate::error::{Error, Result};
use crate::types::{DEFAULT_PAGE_SIZE, DEFAULT_PORT, DEFAULT_SORT};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Configuration for a Solr cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorConfig {
    /// Solr host name or address
    pub host: String,

    /// Solr port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Collection (or core) to read
    pub collection: String,

    /// Documents requested per page (`rows`)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Sort expression; must include the collection's unique key
    #[serde(default = "default_sort")]
    pub sort: String,

    /// Fields to return (`fl`); empty means all stored fields
    #[serde(default)]
    pub fields: Vec<String>,

    /// Request timeout in milliseconds; `None` disables the timeout
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: Option<u64>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_sort() -> String {
    DEFAULT_SORT.to_string()
}

#[allow(clippy::unnecessary_wraps)]
fn default_timeout_ms() -> Option<u64> {
    Some(30_000)
}

impl CursorConfig {
    /// Create a config with default page size, sort and timeout
    pub fn new(host: impl Into<String>, port: u16, collection: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            collection: collection.into(),
            page_size: default_page_size(),
            sort: default_sort(),
            fields: Vec::new(),
            timeout_ms: default_timeout_ms(),
        }
    }

    /// Set the page size
    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the sort expression
    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }

    /// Restrict the returned fields
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    /// Disable the request timeout
    #[must_use]
    pub fn no_timeout(mut self) -> Self {
        self.timeout_ms = None;
        self
    }

    /// Request timeout as a duration
    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Check the config for values Solr would reject or that break the cursor
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::invalid_value("host", "must not be empty"));
        }
        if self.collection.trim().is_empty() {
            return Err(Error::invalid_value("collection", "must not be empty"));
        }
        if self.collection.contains('/') {
            return Err(Error::invalid_value(
                "collection",
                format!("'{}' must not contain '/'", self.collection),
            ));
        }
        if self.page_size == 0 {
            return Err(Error::invalid_value(
                "page_size",
                "must be greater than zero",
            ));
        }
        if self.sort.trim().is_empty() {
            return Err(Error::invalid_value("sort", "must not be empty"));
        }
        if self.timeout_ms == Some(0) {
            return Err(Error::invalid_value(
                "timeout_ms",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// URL of the collection's `/select` handler
    pub fn select_url(&self) -> Result<Url> {
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };

        let mut url = Url::parse(&format!("http://{host}:{}/", self.port))?;
        url.path_segments_mut()
            .map_err(|()| Error::config(format!("'{host}' cannot be used as a base URL")))?
            .clear()
            .extend(["solr", self.collection.as_str(), "select"]);
        Ok(url)
    }
}

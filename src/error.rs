//! Error types for solr-cursor
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for solr-cursor
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    // ============================================================================
    // Upstream Errors
    // ============================================================================
    #[error("Solr returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    // ============================================================================
    // Response Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Unexpected Solr response: {message}")]
    Protocol { message: String },

    // ============================================================================
    // Document Errors
    // ============================================================================
    #[error("Field '{field}' {message}")]
    Field { field: String, message: String },

    #[error("Document #{document} (page {page}): {source}")]
    Stream {
        document: u64,
        page: u64,
        #[source]
        source: Box<Error>,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid cursor or client configuration
    Config,
    /// The server could not be reached, or did not answer in time
    Transport,
    /// The server answered with a non-200 status
    Upstream,
    /// The response body is not JSON
    Decode,
    /// The JSON does not have the shape of a cursor page
    Protocol,
    /// A document field is missing or has an unexpected type
    Field,
    /// Local I/O failure
    Io,
    /// Anything else
    Other,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an upstream status error
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a protocol error
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Create a document field error
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Field {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Attach the position of the document being read when `source` occurred
    pub fn stream(document: u64, page: u64, source: Error) -> Self {
        Self::Stream {
            document,
            page,
            source: Box::new(source),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config { .. } | Error::InvalidConfigValue { .. } | Error::InvalidUrl(_) => {
                ErrorKind::Config
            }
            Error::Http(_) | Error::Timeout { .. } => ErrorKind::Transport,
            Error::Upstream { .. } => ErrorKind::Upstream,
            Error::Decode { .. } => ErrorKind::Decode,
            Error::Protocol { .. } => ErrorKind::Protocol,
            Error::Field { .. } => ErrorKind::Field,
            Error::Stream { source, .. } => source.kind(),
            Error::Io(_) => ErrorKind::Io,
            Error::Other(_) => ErrorKind::Other,
        }
    }

    /// Check if the server could not be reached
    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    /// Check if the response did not have the expected shape
    pub fn is_protocol(&self) -> bool {
        self.kind() == ErrorKind::Protocol
    }

    /// Check if this error is retryable
    ///
    /// Nothing in this crate retries; this is for callers wrapping `Cursor::next`.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::Timeout { .. } => true,
            Error::Upstream { status, .. } => is_retryable_status(*status),
            Error::Stream { source, .. } => source.is_retryable(),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for solr-cursor
pub type Result<T> = std::result::Result<T, Error>;

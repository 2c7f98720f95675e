//! HTTP client module
//!
//! Provides the HTTP client used to reach the Solr select handler.
//!
//! # Features
//!
//! - **Timeouts**: Client-wide, surfaced as `Error::Timeout`
//! - **Status Checking**: Anything but `200 OK` becomes `Error::Upstream`
//! - **Ordered Query Parameters**: Parameters are sent in the order they were added

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};

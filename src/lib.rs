//! # solr-cursor
//!
//! Cursor-mark pagination over a Solr collection.
//!
//! ## Features
//!
//! - **Deep Paging**: Walks a whole collection with Solr's `cursorMark`, one page at a time
//! - **Lazy Delivery**: Documents are handed out one by one, as a pull API or a `Stream`
//! - **Typed Field Access**: Schemaless documents with accessors that fail instead of coercing
//! - **Classified Errors**: Transport, upstream status, decode and protocol failures
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solr_cursor::{Cursor, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut cursor = Cursor::new("localhost", 8983, "docs", 100, "id asc")?;
//!
//!     while let Some(doc) = cursor.next().await? {
//!         println!("{}", doc.get_str("id")?);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  Cursor  next() → Option<Document>           │
//! │          documents() / into_stream()         │
//! │  marks (current, previous) · buffer · state  │
//! └──────────────────────┬───────────────────────┘
//!                        │ PageFetcher
//! ┌──────────────────────┴───────────────────────┐
//! │  SolrFetcher   GET /solr/<coll>/select       │
//! ├──────────────┬───────────────────────────────┤
//! │  HttpClient  │  SelectDecoder                │
//! │  timeout     │  response.docs                │
//! │  status      │  nextCursorMark               │
//! └──────────────┴───────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and constants
pub mod types;

/// Schemaless Solr documents
pub mod document;

/// Cursor configuration
pub mod config;

/// HTTP client
pub mod http;

/// Select response decoding
pub mod decode;

/// Page fetching from Solr
pub mod solr;

/// Cursor-mark pagination
pub mod pagination;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::CursorConfig;
pub use decode::Page;
pub use document::Document;
pub use error::{Error, ErrorKind, Result};
pub use pagination::{Cursor, CursorState, SolrCursor};
pub use solr::{PageFetcher, PageRequest, SolrFetcher};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

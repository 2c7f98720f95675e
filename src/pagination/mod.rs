//! Pagination module
//!
//! Cursor-mark pagination over a Solr collection.
//!
//! # Overview
//!
//! A [`Cursor`] buffers one page of documents at a time and hands them out
//! one by one. When the buffer runs dry it asks its [`PageFetcher`] for the
//! next page. Solr signals the end of the walk by answering with the same
//! cursor mark it was sent; from then on the cursor only drains what it
//! already holds and then reports end-of-stream forever.
//!
//! [`PageFetcher`]: crate::solr::PageFetcher

mod cursor;
mod types;

pub use cursor::{Cursor, SolrCursor};
pub use types::{CursorMarks, CursorState, CursorStats};

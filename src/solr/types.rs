//! Fetcher types and traits

use crate::decode::Page;
use crate::error::Result;
use crate::types::START_CURSOR_MARK;
use async_trait::async_trait;

/// Parameters of one cursor-page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<'a> {
    /// Mark returned by the previous page, or `*` for the first one
    pub cursor_mark: &'a str,
    /// Documents per page
    pub rows: u32,
    /// Sort expression, identical for every page of one walk
    pub sort: &'a str,
    /// Fields to return (`fl`), empty for all
    pub fields: &'a [String],
}

impl<'a> PageRequest<'a> {
    /// Request for the first page of a walk
    pub fn first(rows: u32, sort: &'a str) -> Self {
        Self {
            cursor_mark: START_CURSOR_MARK,
            rows,
            sort,
            fields: &[],
        }
    }

    /// Same request at another cursor mark
    #[must_use]
    pub fn at(self, cursor_mark: &'a str) -> Self {
        Self {
            cursor_mark,
            ..self
        }
    }

    /// Restrict the returned fields
    #[must_use]
    pub fn with_fields(self, fields: &'a [String]) -> Self {
        Self { fields, ..self }
    }
}

/// Source of cursor pages
///
/// The cursor only ever has one call in flight; implementations need not
/// support concurrent requests from the same cursor.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page starting at `request.cursor_mark`
    async fn fetch_page(&self, request: &PageRequest<'_>) -> Result<Page>;
}

//! Pagination types
//!
//! State tracked by a cursor between pages.

use crate::types::START_CURSOR_MARK;

/// Lifecycle of a cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorState {
    /// More pages may be fetched
    #[default]
    Active,
    /// The server stopped advancing the mark; no further fetches
    Done,
}

impl CursorState {
    /// Check if no further pages will be fetched
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Current and previous cursor marks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorMarks {
    current: String,
    previous: String,
}

impl Default for CursorMarks {
    fn default() -> Self {
        Self {
            current: START_CURSOR_MARK.to_string(),
            previous: START_CURSOR_MARK.to_string(),
        }
    }
}

impl CursorMarks {
    /// Both marks at the start sentinel
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark to send with the next request
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Mark sent with the last request
    pub fn previous(&self) -> &str {
        &self.previous
    }

    /// Record the mark returned for the page fetched at `current`
    ///
    /// Returns `true` when the server answered with the mark it was sent,
    /// meaning there is nothing after this page.
    pub fn advance(&mut self, next: String) -> bool {
        self.previous = std::mem::replace(&mut self.current, next);
        self.current == self.previous
    }
}

/// Counters describing a walk so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorStats {
    /// Pages fetched successfully
    pub pages_fetched: u64,
    /// Documents handed to the caller
    pub documents_delivered: u64,
    /// `numFound` of the most recent page that reported it
    pub num_found: Option<u64>,
}

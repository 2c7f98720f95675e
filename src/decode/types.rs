//! Decoder types
//!
//! Defines the decoded form of one cursor page.

use crate::document::Document;

/// One page of documents returned by the select handler
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Documents in server order
    pub documents: Vec<Document>,
    /// Mark to send with the following request
    pub next_cursor_mark: String,
    /// Total number of matching documents, when reported
    pub num_found: Option<u64>,
}

impl Page {
    /// Create a page
    pub fn new(documents: Vec<Document>, next_cursor_mark: impl Into<String>) -> Self {
        Self {
            documents,
            next_cursor_mark: next_cursor_mark.into(),
            num_found: None,
        }
    }

    /// Set the reported match count
    #[must_use]
    pub fn with_num_found(mut self, num_found: u64) -> Self {
        self.num_found = Some(num_found);
        self
    }

    /// Number of documents on this page
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if the page carries no documents
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

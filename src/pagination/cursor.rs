//! Buffered cursor over a Solr collection

use super::types::{CursorMarks, CursorState, CursorStats};
use crate::config::CursorConfig;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::solr::{PageFetcher, PageRequest, SolrFetcher};
use futures::stream::{self, Stream};
use std::collections::VecDeque;
use tracing::debug;

/// Cursor backed by HTTP requests to Solr
pub type SolrCursor = Cursor<SolrFetcher>;

/// Pull-based cursor handing out one document at a time
///
/// A cursor is single-owner and single-pass: it is created at the start of
/// the result set and never rewinds.
#[derive(Debug)]
pub struct Cursor<F = SolrFetcher> {
    fetcher: F,
    page_size: u32,
    sort: String,
    fields: Vec<String>,
    marks: CursorMarks,
    buffer: VecDeque<Document>,
    state: CursorState,
    stats: CursorStats,
}

impl Cursor<SolrFetcher> {
    /// Create a cursor over `collection` on `host:port`
    pub fn new(
        host: impl Into<String>,
        port: u16,
        collection: impl Into<String>,
        page_size: u32,
        sort: impl Into<String>,
    ) -> Result<Self> {
        let config = CursorConfig::new(host, port, collection)
            .page_size(page_size)
            .sort(sort);
        Self::from_config(&config)
    }

    /// Create a cursor from a config
    pub fn from_config(config: &CursorConfig) -> Result<Self> {
        let fetcher = SolrFetcher::from_config(config)?;
        let mut cursor = Self::with_fetcher(fetcher, config.page_size, config.sort.clone())?;
        cursor.fields.clone_from(&config.fields);
        Ok(cursor)
    }
}

impl<F: PageFetcher> Cursor<F> {
    /// Create a cursor reading pages from `fetcher`
    pub fn with_fetcher(fetcher: F, page_size: u32, sort: impl Into<String>) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::invalid_value(
                "page_size",
                "must be greater than zero",
            ));
        }

        Ok(Self {
            fetcher,
            page_size,
            sort: sort.into(),
            fields: Vec::new(),
            marks: CursorMarks::new(),
            buffer: VecDeque::new(),
            state: CursorState::Active,
            stats: CursorStats::default(),
        })
    }

    /// Next document, or `None` once the collection is exhausted
    ///
    /// Fetches a page only when the buffer is empty and the cursor is still
    /// active. A failed fetch leaves the cursor untouched, so calling again
    /// repeats the same request.
    pub async fn next(&mut self) -> Result<Option<Document>> {
        if self.buffer.is_empty() {
            if self.state.is_done() {
                return Ok(None);
            }
            self.fill_buffer().await?;
        }

        let document = self.buffer.pop_front();
        if document.is_some() {
            self.stats.documents_delivered += 1;
        }
        Ok(document)
    }

    /// Replace the empty buffer with the page at the current mark
    async fn fill_buffer(&mut self) -> Result<()> {
        let request = PageRequest {
            cursor_mark: self.marks.current(),
            rows: self.page_size,
            sort: &self.sort,
            fields: &self.fields,
        };
        let page = self.fetcher.fetch_page(&request).await?;

        self.stats.pages_fetched += 1;
        if page.num_found.is_some() {
            self.stats.num_found = page.num_found;
        }

        let empty = page.documents.is_empty();
        self.buffer = page.documents.into();

        // The page is still delivered; only further fetches stop.
        if self.marks.advance(page.next_cursor_mark) || empty {
            debug!(
                "Cursor exhausted after {} pages (cursorMark={})",
                self.stats.pages_fetched,
                self.marks.current()
            );
            self.state = CursorState::Done;
        }

        Ok(())
    }

    /// Borrowing stream over the remaining documents
    ///
    /// The stream ends at end-of-stream or right after yielding an error.
    pub fn documents(&mut self) -> impl Stream<Item = Result<Document>> + '_ {
        stream::try_unfold(self, |cursor| async move {
            Ok::<_, Error>(cursor.next().await?.map(|document| (document, cursor)))
        })
    }

    /// Owning stream over the remaining documents
    pub fn into_stream(self) -> impl Stream<Item = Result<Document>> {
        stream::try_unfold(self, |mut cursor| async move {
            Ok::<_, Error>(cursor.next().await?.map(|document| (document, cursor)))
        })
    }

    /// Whether the server has signalled the end of the walk
    ///
    /// Buffered documents may still be pending; see [`Cursor::is_exhausted`].
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Whether `next` will only ever return `None` from now on
    pub fn is_exhausted(&self) -> bool {
        self.state.is_done() && self.buffer.is_empty()
    }

    /// Documents fetched but not yet handed out
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Cursor marks
    pub fn marks(&self) -> &CursorMarks {
        &self.marks
    }

    /// Counters for this walk
    pub fn stats(&self) -> CursorStats {
        self.stats
    }

    /// Documents requested per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Sort expression sent with every page
    pub fn sort(&self) -> &str {
        &self.sort
    }

    /// The underlying page fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}

//! Solr fetcher module
//!
//! Executes one cursor-page request against the `/select` handler of a
//! collection and hands back the decoded [`Page`](crate::decode::Page).
//!
//! Every request repeats the full parameter set (`q=*:*`, `cursorMark`,
//! `rows`, `wt=json`, `sort` and optionally `fl`); only the mark changes
//! between pages.

mod fetcher;
mod types;

pub use fetcher::SolrFetcher;
pub use types::{PageFetcher, PageRequest};

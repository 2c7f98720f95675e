//! HTTP implementation of [`PageFetcher`]

use super::types::{PageFetcher, PageRequest};
use crate::config::CursorConfig;
use crate::decode::{Page, SelectDecoder};
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::types::MATCH_ALL_QUERY;
use async_trait::async_trait;
use tracing::debug;
use url::Url;

/// Fetches cursor pages from a collection's select handler
#[derive(Debug, Clone)]
pub struct SolrFetcher {
    client: HttpClient,
    select_url: Url,
    decoder: SelectDecoder,
}

impl SolrFetcher {
    /// Create a fetcher for `select_url` using `client`
    pub fn new(client: HttpClient, select_url: Url) -> Self {
        Self {
            client,
            select_url,
            decoder: SelectDecoder::new(),
        }
    }

    /// Create a fetcher from a validated cursor config
    pub fn from_config(config: &CursorConfig) -> Result<Self> {
        config.validate()?;

        let http_config = HttpClientConfig::builder()
            .timeout(config.request_timeout())
            .header("Accept", "application/json")
            .build();
        let client = HttpClient::with_config(http_config)?;

        Ok(Self::new(client, config.select_url()?))
    }

    /// URL of the select handler
    pub fn select_url(&self) -> &Url {
        &self.select_url
    }

    /// Query parameters for one page
    pub fn build_request(request: &PageRequest<'_>) -> RequestConfig {
        let mut config = RequestConfig::new()
            .query("q", MATCH_ALL_QUERY)
            .query("cursorMark", request.cursor_mark)
            .query("rows", request.rows.to_string())
            .query("wt", "json")
            .query("sort", request.sort);

        if !request.fields.is_empty() {
            config = config.query("fl", request.fields.join(","));
        }

        config
    }
}

#[async_trait]
impl PageFetcher for SolrFetcher {
    async fn fetch_page(&self, request: &PageRequest<'_>) -> Result<Page> {
        debug!(
            "Fetching page from {} (cursorMark={}, rows={})",
            self.select_url, request.cursor_mark, request.rows
        );

        let body = self
            .client
            .get_text(&self.select_url, Self::build_request(request))
            .await?;
        let page = self.decoder.decode(&body)?;

        debug!(
            "Fetched {} documents (nextCursorMark={})",
            page.len(),
            page.next_cursor_mark
        );
        Ok(page)
    }
}

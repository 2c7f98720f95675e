//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, MissingFieldPolicy, OutputFormat};
use crate::document::Document;
use crate::error::{Error, Result};
use crate::pagination::Cursor;
use crate::solr::{PageFetcher, PageRequest, SolrFetcher};
use futures::StreamExt;
use serde_json::json;
use std::io::Write;
use std::pin::pin;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Outcome of a `read` run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadSummary {
    /// Documents written to the output
    pub documents: u64,
    /// Documents skipped for lacking the requested field
    pub skipped: u64,
    /// Pages fetched
    pub pages: u64,
    /// Wall-clock time of the run
    pub elapsed: Duration,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing results to stdout
    pub async fn run(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_with_output(&mut out).await
    }

    /// Run the CLI command, writing results to `out`
    pub async fn run_with_output<W: Write>(&self, out: &mut W) -> Result<()> {
        match &self.cli.command {
            Commands::Check => self.check(out).await,
            Commands::Read {
                field,
                missing_field,
                max_records,
            } => {
                let summary = self
                    .read(out, field.as_deref(), *missing_field, *max_records)
                    .await?;
                info!(
                    "Read {} documents from {} pages ({} skipped)",
                    summary.documents, summary.pages, summary.skipped
                );
                info!("Total execution time: {:?}", summary.elapsed);
                Ok(())
            }
        }
    }

    /// Fetch one document to prove the collection is reachable
    async fn check<W: Write>(&self, out: &mut W) -> Result<()> {
        let config = self.cli.cursor_config();
        let fetcher = SolrFetcher::from_config(&config)?;
        info!("Checking connection to {}", fetcher.select_url());

        let page = fetcher
            .fetch_page(&PageRequest::first(1, &config.sort))
            .await?;

        self.output_message(
            out,
            &json!({
                "status": "SUCCEEDED",
                "url": fetcher.select_url().as_str(),
                "collection": config.collection,
                "num_found": page.num_found,
            }),
        )
    }

    /// Stream the collection to `out`
    pub async fn read<W: Write>(
        &self,
        out: &mut W,
        field: Option<&str>,
        missing_field: MissingFieldPolicy,
        max_records: Option<u64>,
    ) -> Result<ReadSummary> {
        let start = Instant::now();
        let config = self.cli.cursor_config();
        let page_size = u64::from(config.page_size);
        let mut cursor = Cursor::from_config(&config)?;

        let mut position = 0u64;
        let mut written = 0u64;
        let mut skipped = 0u64;

        {
            let mut documents = pin!(cursor.documents());
            while let Some(next) = documents.next().await {
                position += 1;
                let page = (position - 1) / page_size + 1;
                let document = next.map_err(|e| Error::stream(position, page, e))?;

                match field {
                    Some(field) => match document.display_value(field) {
                        Ok(value) => {
                            writeln!(out, "{written_index}. {value}", written_index = written + 1)?;
                        }
                        Err(e) => match missing_field {
                            MissingFieldPolicy::Fail => {
                                return Err(Error::stream(position, page, e));
                            }
                            MissingFieldPolicy::Skip => {
                                warn!("Skipping document #{position}: {e}");
                                skipped += 1;
                                continue;
                            }
                        },
                    },
                    None => self.write_document(out, &document)?,
                }

                written += 1;
                if max_records.is_some_and(|max| written >= max) {
                    info!("Reached --max-records limit of {written}");
                    break;
                }
            }
        }

        Ok(ReadSummary {
            documents: written,
            skipped,
            pages: cursor.stats().pages_fetched,
            elapsed: start.elapsed(),
        })
    }

    /// Write one document in the selected format
    fn write_document<W: Write>(&self, out: &mut W, document: &Document) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(document),
            OutputFormat::Pretty => serde_json::to_string_pretty(document),
        }
        .map_err(|e| Error::Other(format!("Failed to serialize document: {e}")))?;

        writeln!(out, "{text}")?;
        Ok(())
    }

    /// Write a JSON message in the selected format
    fn output_message<W: Write>(&self, out: &mut W, message: &serde_json::Value) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json => message.to_string(),
            OutputFormat::Pretty => serde_json::to_string_pretty(message)
                .map_err(|e| Error::Other(format!("Failed to serialize message: {e}")))?,
        };

        writeln!(out, "{text}")?;
        Ok(())
    }
}

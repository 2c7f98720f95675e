//! CLI commands and argument parsing

use crate::config::CursorConfig;
use clap::{Parser, Subcommand};
use std::time::Duration;

/// Walk a Solr collection with cursor-mark pagination
#[derive(Parser, Debug)]
#[command(name = "solr-cursor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Solr host
    #[arg(long, global = true, env = "SOLR_HOST", default_value = "localhost")]
    pub host: String,

    /// Solr port
    #[arg(short, long, global = true, env = "SOLR_PORT", default_value = "8983")]
    pub port: u16,

    /// Collection to read
    #[arg(short, long, global = true, env = "SOLR_COLLECTION")]
    pub collection: Option<String>,

    /// Documents per page
    #[arg(long, global = true, env = "SOLR_PAGE_SIZE", default_value = "10")]
    pub page_size: u32,

    /// Sort expression (must include the unique key)
    #[arg(long, global = true, env = "SOLR_SORT", default_value = "id asc")]
    pub sort: String,

    /// Fields to return (comma-separated, empty = all)
    #[arg(long, global = true, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Request timeout in seconds (0 = no timeout)
    #[arg(long, global = true, default_value = "30")]
    pub timeout_secs: u64,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Cursor configuration described by the global flags
    ///
    /// A missing collection is left empty and rejected by validation.
    pub fn cursor_config(&self) -> CursorConfig {
        let config = CursorConfig::new(
            self.host.clone(),
            self.port,
            self.collection.clone().unwrap_or_default(),
        )
        .page_size(self.page_size)
        .sort(self.sort.clone())
        .fields(self.fields.iter().filter(|f| !f.is_empty()).cloned());

        if self.timeout_secs == 0 {
            config.no_timeout()
        } else {
            config.timeout(Duration::from_secs(self.timeout_secs))
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the first page to test the connection and report the match count
    Check,

    /// Read every document of the collection
    Read {
        /// Print only this field, as "<n>. <value>"
        #[arg(long)]
        field: Option<String>,

        /// What to do with a document lacking `--field`
        #[arg(long, default_value = "fail")]
        missing_field: MissingFieldPolicy,

        /// Stop after this many documents
        #[arg(long)]
        max_records: Option<u64>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Indented JSON
    Pretty,
}

/// Handling of documents that lack the requested field
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MissingFieldPolicy {
    /// Abort the run
    Fail,
    /// Log a warning and continue
    Skip,
}

//! CLI module
//!
//! Command-line driver for the cursor.
//!
//! # Commands
//!
//! - `check` - Fetch the first page and report the match count
//! - `read` - Stream every document of the collection

mod commands;
mod runner;

pub use commands::{Cli, Commands, MissingFieldPolicy, OutputFormat};
pub use runner::{ReadSummary, Runner};

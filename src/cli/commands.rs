//! CLI commands and argument parsing

use crate::config::PagingMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Browse datasets page by page
#[derive(Parser, Debug)]
#[command(name = "data-pages")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pagination config file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List built-in datasets
    Datasets,

    /// Fetch a single page
    Page {
        #[command(flatten)]
        query: QueryArgs,

        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: u64,

        /// Continue after this cursor token
        #[arg(long, conflicts_with = "before")]
        after: Option<String>,

        /// Continue before this cursor token
        #[arg(long)]
        before: Option<String>,
    },

    /// Fetch every page from the first to the last
    Walk {
        #[command(flatten)]
        query: QueryArgs,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<u64>,
    },
}

/// Arguments shared by the query commands
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Built-in dataset name
    #[arg(short, long, conflicts_with = "data")]
    pub dataset: Option<String>,

    /// JSON file holding an array of objects
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Page size (defaults to the configured size)
    #[arg(short, long)]
    pub size: Option<u32>,

    /// Ordering, e.g. `numBitsRequired:desc,id:asc`
    #[arg(long, default_value = "")]
    pub sort: String,

    /// Pagination mode (defaults to the configured mode)
    #[arg(short, long)]
    pub mode: Option<ModeArg>,

    /// Skip counting total results
    #[arg(long)]
    pub no_total: bool,
}

/// Pagination mode argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// Page numbers and offsets
    Offset,
    /// Keyset cursors
    Cursor,
}

impl From<ModeArg> for PagingMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Offset => PagingMode::Offset,
            ModeArg::Cursor => PagingMode::Cursor,
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one page per line)
    Json,
    /// Human-readable output
    Pretty,
}

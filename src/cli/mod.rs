//! CLI module
//!
//! Command-line interface for browsing datasets page by page.
//!
//! # Commands
//!
//! - `datasets` - List built-in datasets
//! - `page` - Fetch one page, by number or by cursor token
//! - `walk` - Fetch every page from first to last

mod commands;
mod runner;

pub use commands::{Cli, Commands, ModeArg, OutputFormat, QueryArgs};
pub use runner::Runner;

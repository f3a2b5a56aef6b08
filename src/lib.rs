// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! # data-pages
//!
//! Pagination model for declarative data repositories: the requests callers
//! send to query methods, and the pages providers send back.
//!
//! ## Features
//!
//! - **Page requests**: 1-based page number, size, ordering, optional cursor
//! - **Offset pages**: totals, derived "more results", next/previous requests
//! - **Cursored pages**: keyset navigation that stays stable under writes
//! - **Reference provider**: in-memory repository running both flavors
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use data_pages::{InMemoryRepository, Page, PageRequest, Sort};
//!
//! let repo = InMemoryRepository::new("numbers", data_pages::provider::datasets::positive_integers());
//! let mut request = PageRequest::of_size(10)?.with_order(Sort::asc("id"));
//!
//! loop {
//!     let page = repo.find_cursored(&request)?;
//!     for row in &page {
//!         // Process row
//!     }
//!     if !page.has_next() {
//!         break;
//!     }
//!     request = page.next_page_request()?;
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       Caller code                          │
//! │   PageRequest ──► query method ──► Page / CursoredPage     │
//! │        ▲                                   │               │
//! │        └──── next_page_request() ◄─────────┘               │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//! ┌───────────┬────────────────┴───────────┬───────────────────┐
//! │   Sort    │          Page              │     Provider      │
//! ├───────────┼────────────────────────────┼───────────────────┤
//! │ Sort      │ PageRequest / Mode         │ Keyed             │
//! │ Order     │ PageRecord (offset)        │ InMemoryRepository│
//! │ Direction │ CursoredPageRecord (keyset)│ datasets          │
//! │ Limit     │ Cursor / KeyValue          │                   │
//! └───────────┴────────────────────────────┴───────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Sort criteria and orderings
pub mod sort;

/// Result limits
pub mod limit;

/// Page requests, pages and cursors
pub mod page;

/// Pagination defaults and limits
pub mod config;

/// Reference in-memory query provider
pub mod provider;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{load_config, PaginationConfig, PagingMode};
pub use error::{Error, Result};
pub use limit::Limit;
pub use page::{
    Cursor, CursoredPageRecord, KeyValue, Mode, Page, PageRecord, PageRequest, DEFAULT_PAGE_SIZE,
};
pub use provider::{InMemoryRepository, Keyed};
pub use sort::{Direction, Order, Sort};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

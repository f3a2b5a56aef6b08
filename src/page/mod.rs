//! Page module
//!
//! Supports: Offset pages, Cursored (keyset) pages
//!
//! # Overview
//!
//! A caller builds a [`PageRequest`], hands it to a query, and gets back a
//! type implementing [`Page`]. The page knows whether more results follow
//! and builds the request for the next or previous page. Offset pages
//! ([`PageRecord`]) count rows; cursored pages ([`CursoredPageRecord`])
//! continue from the key of their last or first row, which keeps traversal
//! stable while other writers insert or delete rows.

mod cursor;
mod cursored;
mod record;
mod request;
mod types;

pub use cursor::{Cursor, KeyValue, MAX_CURSOR_TOKEN_LEN};
pub use cursored::CursoredPageRecord;
pub use record::PageRecord;
pub use request::{Mode, PageRequest, DEFAULT_PAGE_SIZE};
pub use types::Page;

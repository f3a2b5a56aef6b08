//! Page trait
//!
//! Defines the read-only contract shared by offset and keyset pages.

use super::request::PageRequest;
use crate::error::{Error, Result};

/// One page of query results plus navigation and total metadata
pub trait Page<T> {
    /// Rows on this page, in query order
    fn content(&self) -> &[T];

    /// Request this page was produced for
    fn page_request(&self) -> &PageRequest<T>;

    /// Total number of results across all pages, when it was counted
    fn known_total(&self) -> Option<u64>;

    /// Whether a nonempty next page exists
    fn has_next(&self) -> bool;

    /// Whether a previous page exists
    fn has_previous(&self) -> bool;

    /// Request for the next page.
    ///
    /// Fails with `NoSuchElement` when `has_next` is false.
    fn next_page_request(&self) -> Result<PageRequest<T>>;

    /// Request for the previous page
    fn previous_page_request(&self) -> Result<PageRequest<T>>;

    /// Whether the page has any rows
    fn has_content(&self) -> bool {
        !self.content().is_empty()
    }

    /// Number of rows on the page
    fn number_of_elements(&self) -> usize {
        self.content().len()
    }

    /// Whether totals were counted
    fn has_totals(&self) -> bool {
        self.known_total().is_some()
    }

    /// Total number of results across all pages.
    ///
    /// Fails with `IllegalState` when totals were not counted.
    fn total_elements(&self) -> Result<u64> {
        self.known_total().ok_or_else(totals_unavailable)
    }

    /// Number of pages needed for all results at this page size.
    ///
    /// Fails with `IllegalState` when totals were not counted.
    fn total_pages(&self) -> Result<u64> {
        let total = self.total_elements()?;
        Ok(pages_for(total, self.page_request().size()))
    }

    /// Iterate over the rows in query order
    fn iter(&self) -> std::slice::Iter<'_, T> {
        self.content().iter()
    }

    /// This page's request, reinterpreted for entity type `E`
    fn page_request_as<E>(&self) -> PageRequest<E>
    where
        Self: Sized,
    {
        self.page_request().clone().unchecked_cast()
    }

    /// The next page's request, reinterpreted for entity type `E`
    fn next_page_request_as<E>(&self) -> Result<PageRequest<E>>
    where
        Self: Sized,
    {
        self.next_page_request().map(PageRequest::unchecked_cast)
    }

    /// The previous page's request, reinterpreted for entity type `E`
    fn previous_page_request_as<E>(&self) -> Result<PageRequest<E>>
    where
        Self: Sized,
    {
        self.previous_page_request().map(PageRequest::unchecked_cast)
    }
}

pub(crate) fn totals_unavailable() -> Error {
    Error::illegal_state("total elements are not available")
}

/// `ceil(total / size)`, computed without overflow
pub(crate) fn pages_for(total: u64, size: u32) -> u64 {
    let size = u128::from(size.max(1));
    ((u128::from(total) + size - 1) / size) as u64
}

/// Check that `content_len` rows fit a page of `request`
pub(crate) fn check_content<T>(request: &PageRequest<T>, content_len: usize) -> Result<()> {
    if request.size() < 1 {
        return Err(Error::invalid_page("page request size must be at least 1"));
    }
    if content_len > request.size() as usize {
        return Err(Error::invalid_page(format!(
            "page holds {content_len} rows but the requested size is {}",
            request.size()
        )));
    }
    Ok(())
}

//! Keyset page record
//!
//! Each row carries the cursor the query layer derived from its sort key.
//! Navigation continues after the last row or before the first one, so
//! page numbers here are advisory counters rather than offsets.

use super::cursor::Cursor;
use super::request::PageRequest;
use super::types::{check_content, Page};
use crate::error::{Error, Result};
use serde::Serialize;

/// Page of results positioned by cursor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CursoredPageRecord<T> {
    page_request: PageRequest<T>,
    content: Vec<T>,
    cursors: Vec<Cursor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_elements: Option<u64>,
    more_results: bool,
    has_previous: bool,
}

impl<T> CursoredPageRecord<T> {
    /// Create a page from rows paired with their cursors.
    ///
    /// A previous page is assumed to exist past page 1; providers that know
    /// better override it with [`CursoredPageRecord::with_has_previous`].
    /// Navigation continues from a row's cursor, so an empty page never has
    /// a previous page and cannot claim more results.
    pub fn new(
        page_request: PageRequest<T>,
        entries: Vec<(T, Cursor)>,
        total_elements: Option<u64>,
        more_results: bool,
    ) -> Result<Self> {
        check_content(&page_request, entries.len())?;
        if more_results && entries.is_empty() {
            return Err(Error::invalid_page(
                "a cursored page without rows has no cursor to continue after",
            ));
        }
        let has_previous = page_request.page() > 1 && !entries.is_empty();
        let (content, cursors): (Vec<T>, Vec<Cursor>) = entries.into_iter().unzip();
        Ok(Self {
            page_request,
            content,
            cursors,
            total_elements,
            more_results,
            has_previous,
        })
    }

    /// Set whether rows exist before the first row of this page.
    ///
    /// Ignored for an empty page.
    #[must_use]
    pub fn with_has_previous(mut self, has_previous: bool) -> Self {
        self.has_previous = has_previous && !self.cursors.is_empty();
        self
    }

    /// Cursor of the row at `index`
    pub fn cursor(&self, index: usize) -> Result<&Cursor> {
        self.cursors.get(index).ok_or_else(|| {
            Error::no_such_element(format!(
                "no row at index {index} (page has {} rows)",
                self.cursors.len()
            ))
        })
    }

    /// Cursors of all rows, in row order
    pub fn cursors(&self) -> &[Cursor] {
        &self.cursors
    }

    /// Rows paired with their cursors
    pub fn entries(&self) -> impl Iterator<Item = (&T, &Cursor)> {
        self.content.iter().zip(self.cursors.iter())
    }

    /// Whether a nonempty next page exists
    pub fn more_results(&self) -> bool {
        self.more_results
    }

    /// Consume the page, keeping only its rows
    pub fn into_content(self) -> Vec<T> {
        self.content
    }
}

impl<T> Page<T> for CursoredPageRecord<T> {
    fn content(&self) -> &[T] {
        &self.content
    }

    fn page_request(&self) -> &PageRequest<T> {
        &self.page_request
    }

    fn known_total(&self) -> Option<u64> {
        self.total_elements
    }

    fn has_next(&self) -> bool {
        self.more_results
    }

    fn has_previous(&self) -> bool {
        self.has_previous
    }

    fn next_page_request(&self) -> Result<PageRequest<T>> {
        if !self.more_results {
            return Err(Error::no_such_element(format!(
                "no page follows {}",
                self.page_request
            )));
        }
        let last = self
            .cursors
            .last()
            .ok_or_else(|| Error::no_such_element("page has no rows to continue after"))?;

        let request = &self.page_request;
        Ok(PageRequest::after_cursor(
            last.clone(),
            request.page().saturating_add(1),
            request.size(),
            request.request_total(),
        )?
        .with_order(request.order().clone()))
    }

    fn previous_page_request(&self) -> Result<PageRequest<T>> {
        if !self.has_previous {
            return Err(Error::no_such_element(format!(
                "no page precedes {}",
                self.page_request
            )));
        }
        let first = self
            .cursors
            .first()
            .ok_or_else(|| Error::no_such_element("page has no rows to continue before"))?;

        // Page numbers are advisory here and never drop below 1.
        let request = &self.page_request;
        Ok(PageRequest::before_cursor(
            first.clone(),
            request.page().saturating_sub(1).max(1),
            request.size(),
            request.request_total(),
        )?
        .with_order(request.order().clone()))
    }
}

impl<T> IntoIterator for CursoredPageRecord<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a CursoredPageRecord<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.iter()
    }
}

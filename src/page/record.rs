//! Offset page record

use super::request::PageRequest;
use super::types::{check_content, Page};
use crate::error::{Error, Result};
use serde::Serialize;

/// Page of results positioned by offset
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord<T> {
    page_request: PageRequest<T>,
    content: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_elements: Option<u64>,
    more_results: bool,
}

impl<T> PageRecord<T> {
    /// Create a page when the provider knows whether more results follow
    pub fn new(
        page_request: PageRequest<T>,
        content: Vec<T>,
        total_elements: Option<u64>,
        more_results: bool,
    ) -> Result<Self> {
        check_content(&page_request, content.len())?;
        Ok(Self {
            page_request,
            content,
            total_elements,
            more_results,
        })
    }

    /// Create a page from a known total, deriving whether more results follow.
    ///
    /// More results exist when this page is full and the total exceeds the
    /// rows covered by this and all earlier pages (`size * page`).
    pub fn with_total(
        page_request: PageRequest<T>,
        content: Vec<T>,
        total_elements: u64,
    ) -> Result<Self> {
        let size = u128::from(page_request.size());
        let covered = size * u128::from(page_request.page());
        let more_results =
            content.len() as u128 == size && u128::from(total_elements) > covered;
        Self::new(page_request, content, Some(total_elements), more_results)
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

impl<T> Page<T> for PageRecord<T> {
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
        self.page_request.page() > 1
    }

    fn next_page_request(&self) -> Result<PageRequest<T>> {
        if self.more_results {
            Ok(self.page_request.next())
        } else {
            Err(Error::no_such_element(format!(
                "no page follows {}",
                self.page_request
            )))
        }
    }

    /// Always succeeds, even on page 1; bounds are checked by the query.
    fn previous_page_request(&self) -> Result<PageRequest<T>> {
        Ok(self.page_request.previous())
    }
}

impl<T> IntoIterator for PageRecord<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PageRecord<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.iter()
    }
}

//! Page requests
//!
//! A `PageRequest` describes which page to fetch: its 1-based number, its
//! size, the ordering, and for keyset pagination the cursor to start from.
//! Requests are values; navigation always yields a new request.

use super::cursor::Cursor;
use crate::error::{Error, Result};
use crate::sort::Order;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Page size used when none is given
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// How a request positions its page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Skip `size * (page - 1)` rows
    #[default]
    Offset,
    /// Rows strictly after the cursor
    CursorNext,
    /// Rows strictly before the cursor
    CursorPrevious,
}

impl Mode {
    /// Whether this mode positions by cursor
    pub fn is_cursor(self) -> bool {
        !matches!(self, Self::Offset)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offset => f.write_str("offset"),
            Self::CursorNext => f.write_str("cursor_next"),
            Self::CursorPrevious => f.write_str("cursor_previous"),
        }
    }
}

/// Request for one page of entities of type `T`.
///
/// Deserialized requests pass the same checks as [`PageRequest::validate`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "", try_from = "PageRequestFields")]
pub struct PageRequest<T> {
    page: u64,
    size: u32,
    order: Order,
    mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    cursor: Option<Cursor>,
    request_total: bool,
    #[serde(skip)]
    entity: PhantomData<fn() -> T>,
}

/// Wire form of a request, checked before it becomes a `PageRequest`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageRequestFields {
    page: u64,
    size: u32,
    #[serde(default)]
    order: Order,
    #[serde(default)]
    mode: Mode,
    #[serde(default)]
    cursor: Option<Cursor>,
    #[serde(default = "default_request_total")]
    request_total: bool,
}

fn default_request_total() -> bool {
    true
}

impl<T> TryFrom<PageRequestFields> for PageRequest<T> {
    type Error = Error;

    fn try_from(fields: PageRequestFields) -> Result<Self> {
        let request = Self::build(
            fields.page,
            fields.size,
            fields.order,
            fields.mode,
            fields.cursor,
            fields.request_total,
        );
        request.validate()?;
        Ok(request)
    }
}

fn check_page(page: u64) -> Result<()> {
    if page < 1 {
        return Err(Error::invalid_request("page", "page number must be at least 1"));
    }
    Ok(())
}

fn check_size(size: u32) -> Result<()> {
    if size < 1 {
        return Err(Error::invalid_request("size", "page size must be at least 1"));
    }
    Ok(())
}

impl<T> PageRequest<T> {
    fn build(
        page: u64,
        size: u32,
        order: Order,
        mode: Mode,
        cursor: Option<Cursor>,
        request_total: bool,
    ) -> Self {
        Self {
            page,
            size,
            order,
            mode,
            cursor,
            request_total,
            entity: PhantomData,
        }
    }

    /// Request page `page` of `size` rows, with totals
    pub fn new(page: u64, size: u32) -> Result<Self> {
        check_page(page)?;
        check_size(size)?;
        Ok(Self::build(page, size, Order::unsorted(), Mode::Offset, None, true))
    }

    /// Request page `page` of the default size
    pub fn of_page(page: u64) -> Result<Self> {
        Self::new(page, DEFAULT_PAGE_SIZE)
    }

    /// Request the first page of `size` rows
    pub fn of_size(size: u32) -> Result<Self> {
        Self::new(1, size)
    }

    /// Request the rows after `cursor`
    pub fn after_cursor(cursor: Cursor, page: u64, size: u32, request_total: bool) -> Result<Self> {
        check_page(page)?;
        check_size(size)?;
        Ok(Self::build(
            page,
            size,
            Order::unsorted(),
            Mode::CursorNext,
            Some(cursor),
            request_total,
        ))
    }

    /// Request the rows before `cursor`
    pub fn before_cursor(cursor: Cursor, page: u64, size: u32, request_total: bool) -> Result<Self> {
        check_page(page)?;
        check_size(size)?;
        Ok(Self::build(
            page,
            size,
            Order::unsorted(),
            Mode::CursorPrevious,
            Some(cursor),
            request_total,
        ))
    }

    /// Same request with a different page number
    pub fn with_page(self, page: u64) -> Result<Self> {
        check_page(page)?;
        Ok(Self { page, ..self })
    }

    /// Same request with a different size
    pub fn with_size(self, size: u32) -> Result<Self> {
        check_size(size)?;
        Ok(Self { size, ..self })
    }

    /// Same request with the given ordering
    #[must_use]
    pub fn with_order(self, order: impl Into<Order>) -> Self {
        Self {
            order: order.into(),
            ..self
        }
    }

    /// Same request, asking the provider to count all results
    #[must_use]
    pub fn with_total(self) -> Self {
        Self {
            request_total: true,
            ..self
        }
    }

    /// Same request, without a total count
    #[must_use]
    pub fn without_total(self) -> Self {
        Self {
            request_total: false,
            ..self
        }
    }

    /// 1-based page number
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Maximum rows per page
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Ordering criteria
    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Positioning mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Cursor for keyset positioning
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// Whether the provider should count all results
    pub fn request_total(&self) -> bool {
        self.request_total
    }

    /// Rows skipped before this page in offset mode
    pub fn offset(&self) -> u64 {
        u64::from(self.size).saturating_mul(self.page.saturating_sub(1))
    }

    /// Request for the following page, positioned by offset
    #[must_use]
    pub fn next(&self) -> Self {
        Self::build(
            self.page.saturating_add(1),
            self.size,
            self.order.clone(),
            Mode::Offset,
            None,
            self.request_total,
        )
    }

    /// Request for the preceding page, positioned by offset.
    ///
    /// Not clamped: the previous of page 1 is page 0, which `validate`
    /// rejects when the request reaches a query.
    #[must_use]
    pub fn previous(&self) -> Self {
        Self::build(
            self.page.saturating_sub(1),
            self.size,
            self.order.clone(),
            Mode::Offset,
            None,
            self.request_total,
        )
    }

    /// Check the request before running it
    pub fn validate(&self) -> Result<()> {
        check_page(self.page)?;
        check_size(self.size)?;
        self.order.validate()?;
        match (self.mode.is_cursor(), &self.cursor) {
            (true, None) => Err(Error::invalid_request(
                "cursor",
                format!("{} mode requires a cursor", self.mode),
            )),
            (false, Some(_)) => Err(Error::invalid_request(
                "cursor",
                "offset mode does not take a cursor",
            )),
            _ => Ok(()),
        }
    }

    /// Reinterpret the entity type of this request.
    ///
    /// No conversion or check happens: the request carries no data of type
    /// `T`, so this only changes the type the compiler sees. Used to hand a
    /// request for a projection back to a query declared on the entity.
    pub fn unchecked_cast<E>(self) -> PageRequest<E> {
        PageRequest {
            page: self.page,
            size: self.size,
            order: self.order,
            mode: self.mode,
            cursor: self.cursor,
            request_total: self.request_total,
            entity: PhantomData,
        }
    }
}

impl<T> Clone for PageRequest<T> {
    fn clone(&self) -> Self {
        Self::build(
            self.page,
            self.size,
            self.order.clone(),
            self.mode,
            self.cursor.clone(),
            self.request_total,
        )
    }
}

impl<T> PartialEq for PageRequest<T> {
    fn eq(&self, other: &Self) -> bool {
        self.page == other.page
            && self.size == other.size
            && self.order == other.order
            && self.mode == other.mode
            && self.cursor == other.cursor
            && self.request_total == other.request_total
    }
}

impl<T> fmt::Debug for PageRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageRequest")
            .field("page", &self.page)
            .field("size", &self.size)
            .field("order", &self.order)
            .field("mode", &self.mode)
            .field("cursor", &self.cursor)
            .field("request_total", &self.request_total)
            .finish()
    }
}

impl<T> fmt::Display for PageRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {} (size {}, {})", self.page, self.size, self.mode)?;
        if !self.order.is_empty() {
            write!(f, " ordered by {}", self.order)?;
        }
        Ok(())
    }
}

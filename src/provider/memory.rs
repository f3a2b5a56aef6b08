//! In-memory repository
//!
//! Runs page requests over a row set held behind a lock. Every query takes
//! its own snapshot, so successive pages see writes made in between, the
//! same way independent queries against a live store do.

use super::keyed::Keyed;
use crate::config::PaginationConfig;
use crate::error::{Error, Result};
use crate::limit::Limit;
use crate::page::{Cursor, CursoredPageRecord, KeyValue, Mode, PageRecord, PageRequest};
use crate::sort::Order;
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::ops::Range;
use tracing::{debug, warn};

/// Repository over rows held in memory
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    /// Name used in log output
    name: String,
    rows: RwLock<Vec<T>>,
    config: PaginationConfig,
}

impl<T: Keyed + Clone> InMemoryRepository<T> {
    /// Create a repository with default limits
    pub fn new(name: impl Into<String>, rows: Vec<T>) -> Self {
        Self {
            name: name.into(),
            rows: RwLock::new(rows),
            config: PaginationConfig::default(),
        }
    }

    /// Replace the pagination limits
    #[must_use]
    pub fn with_config(mut self, config: PaginationConfig) -> Self {
        self.config = config;
        self
    }

    /// Repository name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pagination limits in force
    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Number of rows
    pub fn count(&self) -> u64 {
        self.rows.read().len() as u64
    }

    /// Add a row
    pub fn insert(&self, row: T) {
        self.rows.write().push(row);
    }

    /// Remove every row matching `predicate`, returning how many were removed
    pub fn remove_where(&self, predicate: impl Fn(&T) -> bool) -> usize {
        let mut rows = self.rows.write();
        let before = rows.len();
        rows.retain(|row| !predicate(row));
        before - rows.len()
    }

    /// Run an offset-positioned page request
    pub fn find_page(&self, request: &PageRequest<T>) -> Result<PageRecord<T>> {
        self.check(request)?;
        if request.mode().is_cursor() {
            return self.reject(Error::invalid_request(
                "mode",
                format!("{} requests need a cursored query", request.mode()),
            ));
        }

        let rows = self.sorted(request.order());
        let total = rows.len() as u64;
        let start = to_index(request.offset()).min(rows.len());
        let content: Vec<T> = rows
            .into_iter()
            .skip(start)
            .take(request.size() as usize)
            .collect();

        debug!(
            repository = %self.name,
            page = request.page(),
            size = request.size(),
            rows = content.len(),
            total,
            "offset page"
        );

        if request.request_total() {
            PageRecord::with_total(request.clone(), content, total)
        } else {
            let more_results = (start + content.len()) < total as usize;
            PageRecord::new(request.clone(), content, None, more_results)
        }
    }

    /// Run a keyset page request.
    ///
    /// Offset requests start the traversal at their offset; cursor requests
    /// continue strictly after or before their cursor. The ordering should end
    /// with a unique property, otherwise rows sharing the boundary key are
    /// skipped.
    pub fn find_cursored(&self, request: &PageRequest<T>) -> Result<CursoredPageRecord<T>> {
        self.check(request)?;
        let order = request.order();
        if order.is_empty() {
            return self.reject(Error::invalid_request(
                "order",
                "cursor pagination requires at least one sort criterion",
            ));
        }

        let rows = self.sorted(order);
        let keys: Vec<Vec<KeyValue>> = rows.iter().map(|row| key_of(row, order)).collect();
        let size = request.size() as usize;

        let window = match (request.mode(), request.cursor()) {
            (Mode::Offset, _) => {
                let start = to_index(request.offset()).min(rows.len());
                start..(start + size).min(rows.len())
            }
            (Mode::CursorNext, Some(cursor)) => {
                self.check_cursor(cursor, order)?;
                let start = keys.partition_point(|key| {
                    compare_key(key, cursor.elements(), order) != Ordering::Greater
                });
                start..(start + size).min(rows.len())
            }
            (Mode::CursorPrevious, Some(cursor)) => {
                self.check_cursor(cursor, order)?;
                let end = keys.partition_point(|key| {
                    compare_key(key, cursor.elements(), order) == Ordering::Less
                });
                end.saturating_sub(size)..end
            }
            (mode, None) => {
                return self.reject(Error::invalid_request(
                    "cursor",
                    format!("{mode} mode requires a cursor"),
                ))
            }
        };

        let total = request.request_total().then_some(rows.len() as u64);
        // An empty window has no row to continue from in either direction
        let more_results = !window.is_empty() && window.end < rows.len();
        let has_previous = !window.is_empty() && window.start > 0;
        let entries = entries_in(rows, keys, window)?;

        debug!(
            repository = %self.name,
            page = request.page(),
            mode = %request.mode(),
            rows = entries.len(),
            more_results,
            has_previous,
            "cursored page"
        );

        Ok(
            CursoredPageRecord::new(request.clone(), entries, total, more_results)?
                .with_has_previous(has_previous),
        )
    }

    /// Rows at the positions covered by `limit`, in `order`
    pub fn find_limited(&self, limit: Limit, order: &Order) -> Result<Vec<T>> {
        order.validate()?;
        let rows = self.sorted(order);
        Ok(rows
            .into_iter()
            .skip(to_index(limit.offset()))
            .take(limit.max_results() as usize)
            .collect())
    }

    fn check(&self, request: &PageRequest<T>) -> Result<()> {
        let checked = request
            .validate()
            .and_then(|()| self.config.check_size(request));
        match checked {
            Ok(()) => Ok(()),
            Err(e) => self.reject(e),
        }
    }

    fn check_cursor(&self, cursor: &Cursor, order: &Order) -> Result<()> {
        if cursor.size() == order.len() {
            return Ok(());
        }
        self.reject(Error::invalid_request(
            "cursor",
            format!(
                "cursor has {} key values but the order has {} criteria",
                cursor.size(),
                order.len()
            ),
        ))
    }

    fn reject<R>(&self, error: Error) -> Result<R> {
        warn!(repository = %self.name, "rejected page request: {error}");
        Err(error)
    }

    /// Snapshot of the rows, stably sorted by `order`
    fn sorted(&self, order: &Order) -> Vec<T> {
        let mut rows = self.rows.read().clone();
        if !order.is_empty() {
            rows.sort_by(|a, b| compare_key(&key_of(a, order), &key_of(b, order), order));
        }
        rows
    }
}

fn to_index(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

fn key_of<T: Keyed>(row: &T, order: &Order) -> Vec<KeyValue> {
    order
        .iter()
        .map(|sort| row.key_value(sort.property()).unwrap_or(KeyValue::Null))
        .collect()
}

/// Compare two keys under `order`, most significant criterion first
fn compare_key(a: &[KeyValue], b: &[KeyValue], order: &Order) -> Ordering {
    for ((left, right), sort) in a.iter().zip(b).zip(order) {
        let ordering = sort
            .direction()
            .apply(left.compare(right, sort.ignore_case()));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn entries_in<T>(
    rows: Vec<T>,
    keys: Vec<Vec<KeyValue>>,
    window: Range<usize>,
) -> Result<Vec<(T, Cursor)>> {
    rows.into_iter()
        .zip(keys)
        .skip(window.start)
        .take(window.len())
        .map(|(row, key)| Ok((row, Cursor::for_key(key)?)))
        .collect()
}

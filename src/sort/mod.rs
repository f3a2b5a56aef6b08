//! Sort module
//!
//! Ordering criteria consumed by page requests and by query execution.
//!
//! # Overview
//!
//! - `Sort` - a single property with a direction and case sensitivity
//! - `Order` - an ordered sequence of `Sort` criteria, most significant first
//! - `Direction` - ascending or descending

mod types;

pub use types::{Direction, Order, Sort};

//! Provider module
//!
//! A reference query-execution collaborator that runs page requests against
//! rows held in memory.
//!
//! # Overview
//!
//! - `Keyed` - extracts sort key values from an entity
//! - `InMemoryRepository` - offset, keyset and limited queries over a row set
//! - `datasets` - built-in read-only row sets for demos and conformance runs

pub mod datasets;
mod keyed;
mod memory;

pub use keyed::Keyed;
pub use memory::InMemoryRepository;

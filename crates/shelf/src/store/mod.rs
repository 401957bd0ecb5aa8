//! # Storage Layer
//!
//! This module keeps an in-memory collection in sync with a key/value storage medium.
//!
//! ## Two Layers
//!
//! 1. [`backend::StorageBackend`]: raw text I/O by key. It knows nothing about products.
//! 2. [`collection::CollectionStore`]: decodes, repairs and writes through a typed value.
//!
//! The medium is injected, never global, so the same store runs against
//! [`mem_backend::MemBackend`] in tests and [`fs_backend::FsBackend`] in production.
//!
//! ## Load Pipeline
//!
//! Loading happens once, when the store is constructed:
//!
//! 1. **Read**: fetch the text under the key. Missing or empty → initial value. Medium failure → initial value.
//! 2. **Parse**: decode JSON into the target type. Failure → initial value.
//! 3. **Repair**: entries without an `id` get a fresh one (see [`repair`]).
//!
//! A sequence is decoded one entry at a time. An entry that does not decode is dropped
//! from the loaded value and copied to the `<key>.rejected` slot, so the next write of
//! the collection cannot destroy it. Every other entry loads as usual.
//!
//! None of these branches is fatal. What happened is reported in a [`LoadReport`] and logged.
//!
//! ## Write-Through
//!
//! Every `set`/`update` replaces the in-memory value first, then writes it. A failed write
//! never rolls the value back: the in-memory view is authoritative.
//!
//! ## Storage Layout
//!
//! For `FsBackend`:
//! ```text
//! <data dir>/
//! ├── products.json           # the collection, one JSON array
//! └── products.rejected.json  # entries that could not be decoded, if any
//! ```

use crate::error::ShelfError;
use serde_json::Value;

pub mod backend;
pub mod collection;
pub mod fs_backend;
pub mod key;
pub mod mem_backend;
pub mod repair;

pub use collection::CollectionStore;

/// Where a loaded value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadSource {
    /// Decoded from storage.
    Persisted,
    /// The caller-supplied initial value.
    #[default]
    Default,
}

/// Report from [`CollectionStore::load`].
#[derive(Debug, Default)]
pub struct LoadReport {
    pub source: LoadSource,
    pub backfilled_ids: usize,
    /// The read or decode failure that forced a fallback, if any.
    pub error: Option<ShelfError>,
    /// Stored entries that did not decode and were set aside.
    pub rejected: Vec<Value>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.error.is_none() && self.rejected.is_empty()
    }
}

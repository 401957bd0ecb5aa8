//! # Shelf Architecture
//!
//! Shelf is a **UI-agnostic product catalog library**: a form controller that turns typed
//! text into validated products, and a collection store that keeps those products in
//! sync with a key/value storage medium.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the form, the collection and the edit selection     │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!            │                                   │
//!            ▼                                   ▼
//! ┌──────────────────────────────┐  ┌──────────────────────────┐
//! │  Form (form/)                │  │  Commands (commands/)    │
//! │  - Edit buffer, field errors │  │  - Merge and delete      │
//! │  - Keystroke guards          │  │    products by id        │
//! │  - Whole-record validation   │  │                          │
//! └──────────────────────────────┘  └──────────────────────────┘
//!                                                │
//!                                                ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend trait: FsBackend, MemBackend              │
//! │  - CollectionStore: load, repair ids, write-through         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The form never touches storage and the store never sees form text. They meet only
//! through [`model::Product`] values handed across by the API.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! - **Never** writes to stdout/stderr; diagnostics go through `tracing`
//! - **Never** panics on bad stored data; a damaged slot loads as an empty collection
//! - **Never** rolls back an in-memory change because a write failed
//!
//! ## Testing Strategy
//!
//! 1. **Form and commands**: unit tests next to the code, over plain values.
//! 2. **Store**: unit tests against `MemBackend`, which can simulate read and write failures.
//! 3. **End to end** (`tests/`): `FsBackend` in a temp dir, reopened to prove persistence.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`init`]: Opening a shelf from configuration
//! - [`form`]: Product form controller and validation rules
//! - [`commands`]: Collection changes (submit, delete)
//! - [`store`]: Storage abstraction, implementations and the collection store
//! - [`model`]: Core data types (`Product`, `ProductId`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod init;
pub mod model;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

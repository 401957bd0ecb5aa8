//! # Configuration
//!
//! Shelf configuration is managed by [`confique`], which handles layered loading
//! from a TOML file, environment variables and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `SHELF_STORAGE_KEY`, `SHELF_DATA_DIR`.
//! 2. **Config file**: the TOML file passed to [`ShelfConfig::load`], if it exists.
//! 3. **Compiled Defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `storage_key` | `products` | Storage slot holding the product collection |
//! | `data_dir` | OS data dir | Root directory of the filesystem backend |

use crate::error::Result;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_STORAGE_KEY: &str = "products";

/// Configuration for shelf, stored in `shelf.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ShelfConfig {
    /// Storage slot holding the product collection
    #[config(env = "SHELF_STORAGE_KEY", default = "products")]
    pub storage_key: String,

    /// Root directory for the filesystem backend.
    /// When absent, the OS-appropriate data directory is used.
    #[config(env = "SHELF_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: None,
        }
    }
}

impl ShelfConfig {
    /// Load configuration from the environment, then `file` (if given and present), then defaults.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }
}

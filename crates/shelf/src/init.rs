//! Opening a shelf from configuration.
//!
//! The one place where configuration meets storage: resolve the data directory,
//! build the filesystem backend and load the collection stored under the
//! configured key.

use crate::api::ShelfApi;
use crate::config::ShelfConfig;
use crate::error::{Result, ShelfError};
use crate::store::fs_backend::FsBackend;
use crate::store::key::validate_key;
use crate::store::LoadReport;

pub fn open_with_config(config: &ShelfConfig) -> Result<(ShelfApi<FsBackend>, LoadReport)> {
    validate_key(&config.storage_key).map_err(|reason| ShelfError::InvalidKey {
        key: config.storage_key.clone(),
        reason,
    })?;

    let backend = FsBackend::from_config(config)?;
    tracing::info!(
        root = %backend.root().display(),
        key = %config.storage_key,
        "opening shelf"
    );

    let (api, report) = ShelfApi::open(backend, config.storage_key.clone());
    if let Some(error) = &report.error {
        tracing::warn!(error = %error, "started from an empty collection");
    }
    Ok((api, report))
}

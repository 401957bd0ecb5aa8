use crate::model::ProductId;
use crate::store::key::KeyValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShelfError {
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid storage key '{key}': {reason}")]
    InvalidKey {
        key: String,
        reason: KeyValidationError,
    },

    #[error("Failed to read '{key}' from storage: {source}")]
    StorageRead {
        key: String,
        #[source]
        source: Box<ShelfError>,
    },

    #[error("Failed to write '{key}' to storage: {source}")]
    StorageWrite {
        key: String,
        #[source]
        source: Box<ShelfError>,
    },

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),
}

impl ShelfError {
    pub(crate) fn read(key: &str, source: ShelfError) -> Self {
        ShelfError::StorageRead {
            key: key.to_string(),
            source: Box::new(source),
        }
    }

    pub(crate) fn write(key: &str, source: ShelfError) -> Self {
        ShelfError::StorageWrite {
            key: key.to_string(),
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShelfError>;

use super::backend::StorageBackend;
use super::key::validate_key;
use crate::config::ShelfConfig;
use crate::error::{Result, ShelfError};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem storage backend: one `<key>.json` file per key under a root directory.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Open the backend rooted at the configured data dir, or the OS data dir for shelf.
    pub fn from_config(config: &ShelfConfig) -> Result<Self> {
        let root = match &config.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()?,
        };
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`. Fails for keys that could escape the root.
    pub fn item_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key).map_err(|reason| ShelfError::InvalidKey {
            key: key.to_string(),
            reason,
        })?;
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(ShelfError::Io)?;
        }
        Ok(())
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "shelf", "shelf")
        .ok_or_else(|| ShelfError::Store("Could not determine data dir".to_string()))?;
    Ok(dirs.data_dir().to_path_buf())
}

impl StorageBackend for FsBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(ShelfError::Io)?;
        Ok(Some(content))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let target = self.item_path(key)?;
        self.ensure_dir(&self.root)?;

        // Atomic write
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp, value).map_err(ShelfError::Io)?;
        fs::rename(&tmp, &target).map_err(ShelfError::Io)?;

        Ok(())
    }
}

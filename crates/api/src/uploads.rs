//! On-disk storage for item images.
//!
//! Files live flat under a single storage root and are named by the
//! content-addressed key from [`gearlist_core::uploads::storage_key`]. The key
//! is what gets persisted in `items.image_path`.

use std::io;
use std::path::{Path, PathBuf};

use gearlist_core::uploads::storage_key;

/// Writes uploaded images beneath a fixed storage root.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the storage root if it does not exist yet.
    pub async fn init(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Absolute location of a stored key.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    /// Persist an upload and return its storage key.
    ///
    /// Identical bytes under the same name resolve to the same key; the
    /// existing file is reused instead of being rewritten.
    pub async fn save(&self, original_filename: &str, content: &[u8]) -> io::Result<String> {
        let key = storage_key(content, original_filename);
        let path = self.path_for(&key);

        if tokio::fs::try_exists(&path).await? {
            tracing::debug!(%key, "Image already stored");
            return Ok(key);
        }

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&path, content).await?;
        tracing::info!(%key, bytes = content.len(), "Image stored");
        Ok(key)
    }
}

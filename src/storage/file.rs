use crate::storage::Storage;
use crate::{utils, Result};
use anyhow::{bail, Context};
use std::path::{Path, PathBuf};
use tracing::trace;

/// A `Storage` that keeps each key in its own file, `<dir>/<key>.json`.
///
/// Values are written to a temporary file and renamed into place, so a value is either the old
/// one or the new one, never a mix.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates the directory if it does not exist.
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        utils::make_dir(&dir)
            .await
            .context("Unable to create the storage directory")?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file that holds `key`. Keys are plain names, never paths.
    pub fn path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || key.starts_with('.')
            || key.contains(|c: char| c == '/' || c == '\\')
        {
            bail!("Invalid storage key '{key}'");
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait::async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key)?;
        trace!("Reading '{key}' from {}", path.display());
        utils::read_optional(&path).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path(key)?;
        trace!("Writing '{key}' to {}", path.display());
        utils::write_atomic(&path, value)
            .await
            .with_context(|| format!("Unable to store '{key}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_storage_get_set() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("data")).await.unwrap();
        assert!(storage.get("transactions").await.unwrap().is_none());

        storage.set("transactions", "[]").await.unwrap();
        assert_eq!(
            storage.get("transactions").await.unwrap().as_deref(),
            Some("[]")
        );
        assert!(dir.path().join("data").join("transactions.json").is_file());
    }

    #[tokio::test]
    async fn test_file_storage_rejects_path_keys() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path()).await.unwrap();
        assert!(storage.set("../escape", "x").await.is_err());
        assert!(storage.set("", "x").await.is_err());
        assert!(storage.get(".hidden").await.is_err());
    }
}

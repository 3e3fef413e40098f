use std::collections::BTreeMap;
use std::path::PathBuf;

use tokio::sync::RwLock;

use crate::core::error::{AppError, Result};

/// JSON-file-backed feature list.
///
/// Load-at-start, save-on-change: the file is read once when the
/// process boots and rewritten in full on every mutation.
pub struct FlagStore {
    path: PathBuf,
    flags: RwLock<BTreeMap<String, bool>>,
}

impl FlagStore {
    /// Load the flag file, or start empty if it does not exist yet
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let flags = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::Internal(format!("Corrupt flag file {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(AppError::Internal(format!(
                    "Failed to read flag file {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        tracing::info!("Feature flags loaded from {}", path.display());

        Ok(Self {
            path,
            flags: RwLock::new(flags),
        })
    }

    /// Snapshot of the current feature list
    pub async fn all(&self) -> BTreeMap<String, bool> {
        self.flags.read().await.clone()
    }

    /// Replace the whole feature list and persist it.
    ///
    /// The in-memory map only changes if the write to disk succeeds.
    pub async fn replace(&self, flags: BTreeMap<String, bool>) -> Result<BTreeMap<String, bool>> {
        let mut guard = self.flags.write().await;

        let bytes = serde_json::to_vec_pretty(&flags)
            .map_err(|e| AppError::Internal(format!("Failed to serialize flags: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::Internal(format!(
                        "Failed to create flag directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        tokio::fs::write(&self.path, bytes).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to write flag file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        *guard = flags;
        Ok(guard.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FlagStore::load(dir.path().join("flags.json")).await.unwrap();
        assert!(store.all().await.is_empty());
    }

    #[tokio::test]
    async fn test_replace_persists_across_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flags.json");

        let store = FlagStore::load(&path).await.unwrap();
        let mut flags = BTreeMap::new();
        flags.insert("excel_import".to_string(), true);
        flags.insert("price_on_request".to_string(), false);
        store.replace(flags.clone()).await.unwrap();

        // A fresh store sees what the first one saved
        let reloaded = FlagStore::load(&path).await.unwrap();
        assert_eq!(reloaded.all().await, flags);
    }

    #[tokio::test]
    async fn test_load_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flags.json");
        tokio::fs::write(&path, b"not json").await.unwrap();
        assert!(FlagStore::load(&path).await.is_err());
    }
}

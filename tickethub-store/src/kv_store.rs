use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Durable string key-value storage, the shape of browser local storage
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key` in one write
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Volatile store for tests and throwaway runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// One file per key under a data directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never sees a half-written value.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub async fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|source| StoreError::Io { path: root.clone(), source })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        tokio::fs::write(&tmp, value)
            .await
            .map_err(|source| StoreError::Io { path: tmp.clone(), source })?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|source| StoreError::Io { path: path.clone(), source })?;

        debug!(key, bytes = value.len(), "Stored value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("bookings").await.unwrap(), None);

        store.set("bookings", "[]").await.unwrap();
        assert_eq!(store.get("bookings").await.unwrap().as_deref(), Some("[]"));

        store.remove("bookings").await.unwrap();
        assert_eq!(store.get("bookings").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::open(dir.path()).await.unwrap();
            store.set("bookings", "[1,2]").await.unwrap();
        }

        let store = FileStore::open(dir.path()).await.unwrap();
        assert_eq!(store.get("bookings").await.unwrap().as_deref(), Some("[1,2]"));
        assert!(!dir.path().join("bookings.json.tmp").exists());

        store.remove("bookings").await.unwrap();
        store.remove("bookings").await.unwrap();
        assert_eq!(store.get("bookings").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        assert!(matches!(store.get("../etc/passwd").await, Err(StoreError::InvalidKey(_))));
        assert!(matches!(store.set("", "x").await, Err(StoreError::InvalidKey(_))));
    }
}

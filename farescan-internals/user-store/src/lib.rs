//! Farescan User Store
//! Copyright (c) 2026 Farescan contributors
//! Licensed and distributed under either of
//!   * MIT license (license terms at the root of the package or at http://opensource.org/licenses/MIT).
//!   * Apache v2 license (license terms at the root of the package or at http://www.apache.org/licenses/LICENSE-2.0).
//! at your option. This file may not be copied, modified, or distributed except according to those terms.

//! farescan-internals/user-store
//! A simple file-backed key-value store for per-user JSON state

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::fs;

/// Custom error for the store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid record encoding: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
}

/// A file-backed key-value store holding one JSON document per key.
///
/// Keys are opaque strings such as `favorites:alice`. Each key maps to a
/// single file under the store root; writes replace the record wholesale.
///
/// # Examples
///
/// ```ignore
/// let store = JsonStore::new("/var/lib/farescan");
/// store.put("favorites:alice", &favorites).await?;
/// let loaded: Option<Favorites> = store.get("favorites:alice").await?;
/// ```
#[derive(Clone, Debug)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read and decode the record stored under `key`, or `None` if no
    /// record exists yet.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(key)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No record for key {:?} at {:?}", key, path);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let value = serde_json::from_slice(&bytes)?;
        Ok(Some(value))
    }

    /// Encode `value` and replace the record stored under `key`.
    ///
    /// The document is written to a sibling temp file first and renamed
    /// into place, so a crashed write leaves the previous record intact.
    pub async fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).await?;

        let bytes = serde_json::to_vec(value)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, &path).await?;
        tracing::debug!("Wrote {} bytes for key {:?}", bytes.len(), key);
        Ok(())
    }

    /// Delete the record stored under `key`. Deleting an absent record is
    /// a no-op.
    pub async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Map a key to its backing file. Key segments may contain only
    /// alphanumerics, `:`, `-`, `_` and `.`, which keeps every key a plain
    /// file name with `:` flattened to `_`.
    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, ':' | '-' | '_' | '.'))
        {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        let file_name: String = key
            .chars()
            .map(|c| if c == ':' { '_' } else { c })
            .collect();
        Ok(self.root.join(format!("{file_name}.json")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        user: String,
        count: u32,
    }

    #[tokio::test]
    async fn test_get_missing_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let loaded: Option<Record> = store.get("favorites:nobody").await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let record = Record {
            user: "alice".to_string(),
            count: 3,
        };
        store.put("favorites:alice", &record).await.unwrap();
        let loaded: Option<Record> = store.get("favorites:alice").await.unwrap();
        assert_eq!(loaded, Some(record));
    }

    #[tokio::test]
    async fn test_put_overwrites_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let first = Record {
            user: "alice".to_string(),
            count: 1,
        };
        let second = Record {
            user: "alice".to_string(),
            count: 2,
        };
        store.put("favorites:alice", &first).await.unwrap();
        store.put("favorites:alice", &second).await.unwrap();
        let loaded: Option<Record> = store.get("favorites:alice").await.unwrap();
        assert_eq!(loaded, Some(second));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let record = Record {
            user: "bob".to_string(),
            count: 1,
        };
        store.put("favorites:bob", &record).await.unwrap();
        store.remove("favorites:bob").await.unwrap();
        store.remove("favorites:bob").await.unwrap();
        let loaded: Option<Record> = store.get("favorites:bob").await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_rejects_path_traversal_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let result = store.put("../escape", &1u32).await;
        assert!(matches!(result, Err(StoreError::InvalidKey(_))));
        let result = store.put("", &1u32).await;
        assert!(matches!(result, Err(StoreError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_keys_with_same_flattening_collide_predictably() {
        // "favorites:x" and "favorites_x" map to the same file; callers own
        // the key namespace.
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        store.put("favorites:x", &1u32).await.unwrap();
        let loaded: Option<u32> = store.get("favorites_x").await.unwrap();
        assert_eq!(loaded, Some(1));
    }
}

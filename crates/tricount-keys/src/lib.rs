//! File-backed registry of remembered Tricount keys.
//!
//! One small JSON file holds the full record list; every mutation rewrites
//! the file and returns the resulting list. Each record caches the ledger's
//! display title and emoji so the key list can render without a fetch.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum KeyStoreError {
    #[error("key file io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("key file json error: {0}")]
    Json(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyRecord {
    pub key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    pub added_at: DateTime<Utc>,
}

impl KeyRecord {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: None,
            emoji: None,
            added_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_display(mut self, title: Option<String>, emoji: Option<String>) -> Self {
        self.title = title;
        self.emoji = emoji;
        self
    }
}

#[derive(Debug, Clone)]
pub struct KeyStore {
    path: PathBuf,
    // Serializes read-modify-write cycles across clones of this store, so
    // concurrent mutations cannot drop each other's records.
    write_lock: Arc<Mutex<()>>,
}

impl KeyStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lists all remembered keys. A missing file reads as the empty list so
    /// a fresh deployment works without seeding.
    pub async fn list(&self) -> Result<Vec<KeyRecord>, KeyStoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|error| KeyStoreError::Json(error.to_string()))
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(error) => Err(KeyStoreError::Io(error)),
        }
    }

    /// Adds a record unless its key is already present (the existing record
    /// wins). Returns the resulting list.
    pub async fn add(&self, record: KeyRecord) -> Result<Vec<KeyRecord>, KeyStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.list().await?;
        if !records.iter().any(|existing| existing.key == record.key) {
            debug!(key = %record.key, "remembering tricount key");
            records.push(record);
            self.write(&records).await?;
        }
        Ok(records)
    }

    /// Removes the record with the given key, if any. Returns the resulting
    /// list; removing an unknown key is a no-op.
    pub async fn remove(&self, key: &str) -> Result<Vec<KeyRecord>, KeyStoreError> {
        let _guard = self.write_lock.lock().await;
        let records = self.list().await?;
        let remaining: Vec<KeyRecord> = records
            .into_iter()
            .filter(|record| record.key != key)
            .collect();
        self.write(&remaining).await?;
        Ok(remaining)
    }

    async fn write(&self, records: &[KeyRecord]) -> Result<(), KeyStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let bytes = serde_json::to_vec_pretty(records)
            .map_err(|error| KeyStoreError::Json(error.to_string()))?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

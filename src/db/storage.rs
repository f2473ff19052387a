use super::repo::{self, Pool};
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
#[error("local storage error: {0:#}")]
pub struct StorageError(#[from] anyhow::Error);

/// Durable string key/value entries, the shell's stand-in for browser
/// local storage.
#[async_trait]
pub trait LocalStorage: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes every pair or none of them.
    async fn set_items(&self, items: &[(&str, &str)]) -> Result<(), StorageError>;

    /// Removes every key or none of them. Absent keys are not an error.
    async fn remove_items(&self, keys: &[&str]) -> Result<(), StorageError>;
}

/// SQLite-backed storage; survives restarts when the pool points at a file.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pool: Pool,
}

impl SqliteStorage {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }
}

#[async_trait]
impl LocalStorage for SqliteStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(repo::get_item(&self.pool, key).await?)
    }

    async fn set_items(&self, items: &[(&str, &str)]) -> Result<(), StorageError> {
        Ok(repo::set_items(&self.pool, items).await?)
    }

    async fn remove_items(&self, keys: &[&str]) -> Result<(), StorageError> {
        Ok(repo::remove_items(&self.pool, keys).await?)
    }
}

/// Process-local storage. Entries vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl LocalStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set_items(&self, items: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut guard = self.entries.lock().await;
        for (key, value) in items {
            guard.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    async fn remove_items(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut guard = self.entries.lock().await;
        for key in keys {
            guard.remove(*key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        storage.set_items(&[("k", "v"), ("k2", "v2")]).await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(storage.len().await, 2);
        storage.remove_items(&["k", "k2", "missing"]).await.unwrap();
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn sqlite_storage_roundtrip() {
        let pool = sqlx::SqlitePool::connect("sqlite::memory:").await.unwrap();
        repo::run_migrations(&pool).await.unwrap();
        let storage = SqliteStorage::new(pool);
        storage.set_items(&[("k", "v")]).await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap().as_deref(), Some("v"));
        storage.remove_items(&["k"]).await.unwrap();
        assert!(storage.get_item("k").await.unwrap().is_none());
    }
}

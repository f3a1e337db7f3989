//! The `KvBackend` trait -- the storage seam under the typed local store.
//!
//! Two implementations ship with the crate: [`SqliteKv`] for durable storage
//! and [`MemoryKv`] for tests and throwaway sessions. The trait is
//! object-safe so callers can hold an `Arc<dyn KvBackend>`.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tokio::sync::Mutex;

use crate::queries::kv;

/// Key-value storage with string keys and string values.
#[async_trait]
pub trait KvBackend: Send + Sync {
    /// Human-readable name for this backend (e.g. "sqlite").
    fn name(&self) -> &str;

    /// Fetch the value under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace the value under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

// Compile-time assertion: KvBackend must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn KvBackend) {}
};

/// Durable backend over the `kv_store` SQLite table.
#[derive(Debug, Clone)]
pub struct SqliteKv {
    pool: SqlitePool,
}

impl SqliteKv {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl KvBackend for SqliteKv {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        kv::get_value(&self.pool, key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        kv::put_value(&self.pool, key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        kv::delete_value(&self.pool, key).await?;
        Ok(())
    }
}

/// Volatile backend holding entries in a map.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvBackend for MemoryKv {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_backend_set_get_remove() {
        let backend: Box<dyn KvBackend> = Box::new(MemoryKv::new());
        assert_eq!(backend.name(), "memory");

        assert_eq!(backend.get("missing").await.unwrap(), None);

        backend.set("lang", "zh").await.unwrap();
        assert_eq!(backend.get("lang").await.unwrap().as_deref(), Some("zh"));

        backend.set("lang", "en").await.unwrap();
        assert_eq!(backend.get("lang").await.unwrap().as_deref(), Some("en"));

        backend.remove("lang").await.unwrap();
        assert_eq!(backend.get("lang").await.unwrap(), None);

        // Removing twice is fine.
        backend.remove("lang").await.unwrap();
    }
}

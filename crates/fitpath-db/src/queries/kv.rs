//! Database query functions for the `kv_store` table.

use anyhow::{Context, Result};
use sqlx::SqlitePool;

/// Fetch the raw value stored under `key`.
pub async fn get_value(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv_store WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("failed to fetch value for key {key:?}"))?;

    Ok(row.map(|(value,)| value))
}

/// Insert or replace the value stored under `key`.
pub async fn put_value(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO kv_store (key, value, updated_at) \
         VALUES (?, ?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now')) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await
    .with_context(|| format!("failed to store value for key {key:?}"))?;

    Ok(())
}

/// Delete the value stored under `key`. Returns whether a row was removed.
pub async fn delete_value(pool: &SqlitePool, key: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM kv_store WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await
        .with_context(|| format!("failed to delete key {key:?}"))?;

    Ok(result.rows_affected() > 0)
}

/// List all stored keys with the size of their value in bytes, ordered by key.
pub async fn list_keys(pool: &SqlitePool) -> Result<Vec<(String, i64)>> {
    let rows: Vec<(String, i64)> =
        sqlx::query_as("SELECT key, length(CAST(value AS BLOB)) FROM kv_store ORDER BY key")
            .fetch_all(pool)
            .await
            .context("failed to list keys")?;

    Ok(rows)
}

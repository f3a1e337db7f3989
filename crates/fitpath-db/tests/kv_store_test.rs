//! Integration tests for the `kv_store` queries and the SQLite backend.

use tempfile::TempDir;

use fitpath_db::backend::{KvBackend, SqliteKv};
use fitpath_db::config::DbConfig;
use fitpath_db::pool;
use fitpath_db::queries::kv;

async fn open_temp_db(dir: &TempDir) -> sqlx::SqlitePool {
    let config = DbConfig::new(format!("sqlite://{}", dir.path().join("kv.db").display()));
    pool::open(&config).await.expect("database should open")
}

#[tokio::test]
async fn put_get_and_overwrite() {
    let tmp = TempDir::new().unwrap();
    let db_pool = open_temp_db(&tmp).await;

    assert_eq!(kv::get_value(&db_pool, "fitpath_language").await.unwrap(), None);

    kv::put_value(&db_pool, "fitpath_language", "zh").await.unwrap();
    assert_eq!(
        kv::get_value(&db_pool, "fitpath_language").await.unwrap().as_deref(),
        Some("zh")
    );

    kv::put_value(&db_pool, "fitpath_language", "en").await.unwrap();
    assert_eq!(
        kv::get_value(&db_pool, "fitpath_language").await.unwrap().as_deref(),
        Some("en")
    );

    db_pool.close().await;
}

#[tokio::test]
async fn delete_reports_whether_a_row_was_removed() {
    let tmp = TempDir::new().unwrap();
    let db_pool = open_temp_db(&tmp).await;

    kv::put_value(&db_pool, "fitpath_plan", "[]").await.unwrap();
    assert!(kv::delete_value(&db_pool, "fitpath_plan").await.unwrap());
    assert!(!kv::delete_value(&db_pool, "fitpath_plan").await.unwrap());
    assert_eq!(kv::get_value(&db_pool, "fitpath_plan").await.unwrap(), None);

    db_pool.close().await;
}

#[tokio::test]
async fn list_keys_is_sorted_with_value_sizes() {
    let tmp = TempDir::new().unwrap();
    let db_pool = open_temp_db(&tmp).await;

    kv::put_value(&db_pool, "b", "1234").await.unwrap();
    kv::put_value(&db_pool, "a", "12").await.unwrap();
    // Three UTF-8 bytes per character.
    kv::put_value(&db_pool, "c", "晨间").await.unwrap();

    let keys = kv::list_keys(&db_pool).await.unwrap();
    assert_eq!(
        keys,
        vec![
            ("a".to_string(), 2),
            ("b".to_string(), 4),
            ("c".to_string(), 6)
        ]
    );

    db_pool.close().await;
}

#[tokio::test]
async fn values_survive_reopening_the_file() {
    let tmp = TempDir::new().unwrap();

    let db_pool = open_temp_db(&tmp).await;
    let backend = SqliteKv::new(db_pool.clone());
    backend.set("fitpath_adjustment", "Earlier dinner").await.unwrap();
    db_pool.close().await;

    let reopened = open_temp_db(&tmp).await;
    let backend = SqliteKv::new(reopened.clone());
    assert_eq!(backend.name(), "sqlite");
    assert_eq!(
        backend.get("fitpath_adjustment").await.unwrap().as_deref(),
        Some("Earlier dinner")
    );
    backend.remove("fitpath_adjustment").await.unwrap();
    assert_eq!(backend.get("fitpath_adjustment").await.unwrap(), None);
    reopened.close().await;
}

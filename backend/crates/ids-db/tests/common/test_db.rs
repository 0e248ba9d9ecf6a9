use ids_db::{PoolSettings, connect, connect_in_memory};

use std::time::Duration;

use sqlx::SqlitePool;
use tempfile::TempDir;

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    connect_in_memory()
        .await
        .expect("Failed to create test pool")
}

/// File-backed pool with several connections, for concurrency tests.
/// Keep the TempDir alive for as long as the pool is used.
pub async fn create_file_pool() -> (TempDir, SqlitePool) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let settings = PoolSettings {
        path: temp.path().join("nested").join("users.db"),
        max_connections: 5,
        busy_timeout: Duration::from_secs(5),
    };

    let pool = connect(&settings).await.expect("Failed to create file pool");
    (temp, pool)
}

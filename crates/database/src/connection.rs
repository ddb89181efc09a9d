//! Database connection management

use anyhow::{Context, Result};
use jackfruit_config::DatabaseConfig;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::info;

/// Prepare and establish a database connection
pub async fn prepare_database(config: &DatabaseConfig) -> Result<SqlitePool> {
    ensure_sqlite_path(&config.url).await?;

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.url)
        .await
        .with_context(|| format!("failed to connect to database {}", config.url))?;

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .context("failed to enable foreign keys for sqlite")?;

    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await
        .context("failed to enable WAL mode for sqlite")?;

    // Avoid "database is locked" under concurrent writers
    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await
        .context("failed to set busy timeout for sqlite")?;

    info!(url = %config.url, "database connection established");
    Ok(pool)
}

/// Ensure the SQLite database file and directory exist
async fn ensure_sqlite_path(url: &str) -> Result<()> {
    let Some(sqlite_path) = url.strip_prefix("sqlite://") else {
        return Ok(());
    };

    if sqlite_path == ":memory:" || sqlite_path.is_empty() {
        return Ok(());
    }

    let path = Path::new(sqlite_path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("failed to create sqlite directory {}", parent.display())
            })?;
        }
    }

    if fs::metadata(path).await.is_err() {
        fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)
            .await
            .with_context(|| format!("failed to create sqlite database file {}", path.display()))?;
    }

    Ok(())
}

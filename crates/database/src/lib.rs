//! Jackfruit Database Crate
//!
//! Connection management, embedded migrations, and the [`UserStore`]
//! implementations backing the HTTP layer.

use jackfruit_config::DatabaseConfig;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::prepare_database;
pub use migrations::run_migrations;

pub use entities::{NewUser, User, UserChanges};
pub use repos::{InMemoryUserStore, UserRepository, UserStore};
pub use types::{DatabaseError, DatabaseResult, StoreError, StoreResult};

pub use sqlx::SqlitePool;

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("{e:#}")))?;

    Ok(pool)
}

//! Error types for the database layer

use thiserror::Error;

/// Errors raised while preparing the database
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database migration error: {0}")]
    MigrationError(String),
}

/// Errors raised by user stores
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("User not found")]
    UserNotFound,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::UserNotFound,
            sqlx::Error::Database(db_err) => {
                if db_err.message().contains("UNIQUE constraint failed")
                    && db_err.message().contains("username")
                {
                    StoreError::UsernameTaken
                } else {
                    StoreError::Database(db_err.message().to_string())
                }
            }
            other => StoreError::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(StoreError::UserNotFound.to_string(), "User not found");
        assert_eq!(
            StoreError::UsernameTaken.to_string(),
            "Username already exists"
        );
        assert_eq!(
            DatabaseError::MigrationError("boom".into()).to_string(),
            "Database migration error: boom"
        );
    }

    #[test]
    fn row_not_found_maps_to_user_not_found() {
        assert_eq!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::UserNotFound
        );
    }
}

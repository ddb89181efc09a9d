//! Error types for user operations.

use jackfruit_auth::{AuthError, AuthzError};
use jackfruit_database::StoreError;
use thiserror::Error;

use crate::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("User not found")]
    NotFound,

    #[error(transparent)]
    Forbidden(#[from] AuthzError),

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<FieldErrors> for UserError {
    fn from(errors: FieldErrors) -> Self {
        UserError::Validation(errors)
    }
}

impl From<StoreError> for UserError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UserNotFound => UserError::NotFound,
            other => UserError::Store(other),
        }
    }
}

use jackfruit_database::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authentication credentials were not provided")]
    MissingCredentials,
    #[error("no active account found with the given credentials")]
    InvalidCredentials,
    #[error("token is invalid or expired: {0}")]
    InvalidToken(String),
    #[error("token has wrong type: expected {expected}")]
    WrongTokenType { expected: &'static str },
    #[error("user not found")]
    UserNotFound,
    #[error("user is inactive")]
    InactiveUser,
    #[error("token creation failed: {0}")]
    TokenCreation(String),
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
    #[error("user store error: {0}")]
    Store(#[from] StoreError),
}

impl AuthError {
    /// Whether this error means the caller failed to authenticate, as opposed
    /// to an infrastructure failure while checking.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            AuthError::TokenCreation(_) | AuthError::PasswordHash(_) | AuthError::Store(_)
        )
    }
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(error: argon2::password_hash::Error) -> Self {
        AuthError::PasswordHash(error.to_string())
    }
}

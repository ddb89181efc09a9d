//! Authorization policies evaluated against a resolved identity.

use jackfruit_database::User;
use serde::Serialize;
use thiserror::Error;

/// The caller resolved from a verified credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
        }
    }
}

/// Rule an operation requires before its handler may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Open to every caller, authenticated or not.
    AllowAny,
    /// Any caller holding a valid credential.
    IsAuthenticated,
    /// Only the owner of the record with this id.
    SelfOnly { owner_id: i64 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("authentication credentials were not provided")]
    Unauthenticated,
    #[error("you do not have permission to perform this action")]
    Forbidden,
}

/// Check a (possibly absent) identity against a policy.
///
/// Pure: no IO and no side effects.
pub fn authorize(identity: Option<&Identity>, policy: &Policy) -> Result<(), AuthzError> {
    match (policy, identity) {
        (Policy::AllowAny, _) => Ok(()),
        (_, None) => Err(AuthzError::Unauthenticated),
        (Policy::IsAuthenticated, Some(_)) => Ok(()),
        (Policy::SelfOnly { owner_id }, Some(identity)) if identity.user_id == *owner_id => Ok(()),
        (Policy::SelfOnly { .. }, Some(_)) => Err(AuthzError::Forbidden),
    }
}

//! User operations behind the HTTP handlers and the CLI.

use std::sync::Arc;

use jackfruit_auth::{authorize, hash_password, Identity, Policy};
use jackfruit_database::{NewUser, StoreError, User, UserStore};
use tracing::{debug, info};

use crate::error::{UserError, UserResult};
use crate::types::{ProfileUpdateRequest, RegisterRequest, UserRepresentation};
use crate::validation::{FieldErrors, Validate, USERNAME_TAKEN};

/// Registration and self-service profile management.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    /// Validate the request and create exactly one user.
    pub async fn register(&self, request: RegisterRequest) -> UserResult<UserRepresentation> {
        let valid = request.validate()?;

        if self.store.username_exists(&valid.username).await? {
            return Err(username_taken());
        }

        let password_hash = hash_password(&valid.password)?;
        let user = self
            .store
            .create(NewUser {
                username: valid.username,
                email: valid.email,
                first_name: valid.first_name,
                last_name: valid.last_name,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent registration
                StoreError::UsernameTaken => username_taken(),
                other => other.into(),
            })?;

        info!(user_id = user.id, username = %user.username, "Registered new user");
        Ok(user.into())
    }

    /// The caller's own record.
    pub async fn profile(&self, identity: &Identity) -> UserResult<UserRepresentation> {
        let user = self.owned_record(identity).await?;
        Ok(user.into())
    }

    /// Apply a partial update to the caller's own record.
    pub async fn update_profile(
        &self,
        identity: &Identity,
        request: ProfileUpdateRequest,
    ) -> UserResult<UserRepresentation> {
        let changes = request.validate()?;
        let user = self.owned_record(identity).await?;

        if changes.is_empty() {
            debug!(user_id = user.id, "Empty profile update");
            return Ok(user.into());
        }

        let updated = self.store.update(user.id, &changes).await?;
        info!(user_id = updated.id, "Updated profile");
        Ok(updated.into())
    }

    /// All users ordered by id.
    pub async fn list_users(&self) -> UserResult<Vec<UserRepresentation>> {
        let users = self.store.list().await?;
        Ok(users.into_iter().map(UserRepresentation::from).collect())
    }

    /// The record is looked up by the identity's own id, so the self-only
    /// check below always holds; no request can name another user's record.
    async fn owned_record(&self, identity: &Identity) -> UserResult<User> {
        let user = self
            .store
            .find_by_id(identity.user_id)
            .await?
            .ok_or(UserError::NotFound)?;

        authorize(Some(identity), &Policy::SelfOnly { owner_id: user.id })?;
        Ok(user)
    }
}

fn username_taken() -> UserError {
    UserError::Validation(FieldErrors::single("username", USERNAME_TAKEN))
}

use std::sync::Arc;

use async_trait::async_trait;
use jackfruit_config::AuthConfig;
use jackfruit_database::{User, UserStore};
use tracing::{debug, info};

use crate::jwt::{JwtManager, TokenPair, TokenType};
use crate::password::{verify_against_placeholder, verify_password};
use crate::{AuthError, Identity};

/// Resolves a bearer credential into the caller's identity.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Identity, AuthError>;
}

/// Issues credentials in exchange for a username and password or a refresh token.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn obtain_pair(&self, username: &str, password: &str) -> Result<TokenPair, AuthError>;

    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError>;
}

/// JWT-backed verifier and issuer. The user behind every token is looked up
/// in the store, so deactivating an account revokes its outstanding tokens.
#[derive(Clone)]
pub struct JwtAuthenticator {
    jwt: Arc<JwtManager>,
    store: Arc<dyn UserStore>,
}

impl JwtAuthenticator {
    pub fn new(store: Arc<dyn UserStore>, config: &AuthConfig) -> Self {
        Self::with_manager(store, JwtManager::from_config(config))
    }

    pub fn with_manager(store: Arc<dyn UserStore>, jwt: JwtManager) -> Self {
        Self {
            jwt: Arc::new(jwt),
            store,
        }
    }

    pub fn jwt(&self) -> &JwtManager {
        &self.jwt
    }

    async fn active_user(&self, user_id: i64) -> Result<User, AuthError> {
        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.can_authenticate() {
            return Err(AuthError::InactiveUser);
        }

        Ok(user)
    }
}

#[async_trait]
impl CredentialVerifier for JwtAuthenticator {
    async fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = self.jwt.validate(token, TokenType::Access)?;
        let user = self.active_user(claims.user_id()?).await?;

        debug!(user_id = user.id, "credential verified");
        Ok(Identity::from(&user))
    }
}

#[async_trait]
impl TokenIssuer for JwtAuthenticator {
    async fn obtain_pair(&self, username: &str, password: &str) -> Result<TokenPair, AuthError> {
        let Some(user) = self.store.find_by_username(username).await? else {
            verify_against_placeholder(password);
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash)? || !user.can_authenticate() {
            return Err(AuthError::InvalidCredentials);
        }

        let pair = self.jwt.issue_pair(user.id)?;
        info!(user_id = user.id, "issued token pair");
        Ok(pair)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let claims = self.jwt.validate(refresh_token, TokenType::Refresh)?;
        let user = self.active_user(claims.user_id()?).await?;

        self.jwt.issue(user.id, TokenType::Access)
    }
}

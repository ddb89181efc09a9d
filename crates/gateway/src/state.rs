//! Shared application state for the gateway

use std::sync::Arc;

use jackfruit_auth::{CredentialVerifier, JwtAuthenticator, TokenIssuer};
use jackfruit_config::AuthConfig;
use jackfruit_database::UserStore;
use jackfruit_users::UserService;

/// Collaborators every handler and middleware reaches through.
#[derive(Clone)]
pub struct AppState {
    verifier: Arc<dyn CredentialVerifier>,
    issuer: Arc<dyn TokenIssuer>,
    users: UserService,
}

impl AppState {
    /// Wire the JWT authenticator and user service over one store.
    pub fn new(store: Arc<dyn UserStore>, config: &AuthConfig) -> Self {
        let authenticator = Arc::new(JwtAuthenticator::new(store.clone(), config));
        Self::with_collaborators(authenticator.clone(), authenticator, UserService::new(store))
    }

    pub fn with_collaborators(
        verifier: Arc<dyn CredentialVerifier>,
        issuer: Arc<dyn TokenIssuer>,
        users: UserService,
    ) -> Self {
        Self {
            verifier,
            issuer,
            users,
        }
    }

    pub fn verifier(&self) -> &dyn CredentialVerifier {
        self.verifier.as_ref()
    }

    pub fn issuer(&self) -> &dyn TokenIssuer {
        self.issuer.as_ref()
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }
}

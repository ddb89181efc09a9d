//! Credential verification, token issuing, and access policies.
//!
//! The HTTP layer only talks to the [`CredentialVerifier`] and [`TokenIssuer`]
//! traits and to [`authorize`]; [`JwtAuthenticator`] is the production
//! implementation of both traits.

mod authenticator;
mod error;

pub mod jwt;
pub mod password;
pub mod policy;

pub use authenticator::{CredentialVerifier, JwtAuthenticator, TokenIssuer};
pub use error::AuthError;
pub use jwt::{Claims, JwtManager, TokenPair, TokenType};
pub use password::{hash_password, verify_password};
pub use policy::{authorize, AuthzError, Identity, Policy};

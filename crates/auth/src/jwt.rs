//! JWT (JSON Web Token) issuing and validation.

use jackfruit_config::AuthConfig;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::AuthError;

/// Whether a token grants access or can only be exchanged for a new access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,          // Subject (user ID)
    pub exp: usize,           // Expiration time
    pub iat: usize,           // Issued at
    pub nbf: usize,           // Not before
    pub iss: String,          // Issuer
    pub aud: String,          // Audience
    pub jti: String,          // JWT ID
    pub token_type: TokenType,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64, AuthError> {
        self.sub
            .parse()
            .map_err(|_| AuthError::InvalidToken("subject is not a user id".to_string()))
    }
}

/// An access token together with the refresh token that can renew it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Signs and validates HS256 tokens
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtManager {
    pub fn new(secret: &str, issuer: String, audience: String) -> Self {
        let defaults = AuthConfig::default();
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            access_ttl: Duration::from_secs(defaults.access_ttl_seconds),
            refresh_ttl: Duration::from_secs(defaults.refresh_ttl_seconds),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            &config.jwt_secret,
            config.issuer.clone(),
            config.audience.clone(),
        )
        .with_lifetimes(
            Duration::from_secs(config.access_ttl_seconds),
            Duration::from_secs(config.refresh_ttl_seconds),
        )
    }

    pub fn with_lifetimes(mut self, access: Duration, refresh: Duration) -> Self {
        self.access_ttl = access;
        self.refresh_ttl = refresh;
        self
    }

    pub fn issue(&self, user_id: i64, token_type: TokenType) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::TokenCreation("system time error".to_string()))?;

        let ttl = match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };
        let exp = now.saturating_add(ttl);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: usize::try_from(exp.as_secs()).unwrap_or(usize::MAX),
            iat: now.as_secs() as usize,
            nbf: now.as_secs() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            jti: uuid::Uuid::new_v4().to_string(),
            token_type,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| AuthError::TokenCreation(err.to_string()))
    }

    pub fn issue_pair(&self, user_id: i64) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access: self.issue(user_id, TokenType::Access)?,
            refresh: self.issue(user_id, TokenType::Refresh)?,
        })
    }

    /// Validate signature, issuer, audience and expiry, then check the token type.
    pub fn validate(&self, token: &str, expected: TokenType) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.validate_nbf = true;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|err| AuthError::InvalidToken(err.to_string()))?
            .claims;

        if claims.token_type != expected {
            return Err(AuthError::WrongTokenType {
                expected: expected.as_str(),
            });
        }

        Ok(claims)
    }
}

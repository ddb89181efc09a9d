//! Error types for the gateway layer

use std::collections::BTreeMap;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use jackfruit_auth::{AuthError, AuthzError};
use jackfruit_users::{FieldErrors, UserError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};
use utoipa::ToSchema;

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Per-field messages, present on validation failures only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, Vec<String>>>,
}

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{0}")]
    AuthenticationFailed(String),

    #[error("{0}")]
    AuthorizationFailed(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("validation failed")]
    Validation(FieldErrors),

    #[error("{0}")]
    NotFound(String),

    /// The detail is logged, never sent to the client
    #[error("internal server error")]
    InternalError(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::AuthenticationFailed(_) => StatusCode::UNAUTHORIZED,
            GatewayError::AuthorizationFailed(_) => StatusCode::FORBIDDEN,
            GatewayError::InvalidRequest(_) | GatewayError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn internal(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        error!(error = %detail, "internal error");
        GatewayError::InternalError(detail)
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        let fields = match self {
            GatewayError::Validation(errors) => Some(errors.as_map().clone()),
            _ => None,
        };

        let body = Json(ErrorResponse {
            error: status.as_str().to_string(),
            message,
            fields,
        });

        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Bearer realm=\"api\""),
            );
        }
        response
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<AuthError> for GatewayError {
    fn from(error: AuthError) -> Self {
        if error.is_rejection() {
            debug!(error = %error, "authentication rejected");
            GatewayError::AuthenticationFailed(error.to_string())
        } else {
            GatewayError::internal(error.to_string())
        }
    }
}

impl From<AuthzError> for GatewayError {
    fn from(error: AuthzError) -> Self {
        debug!(error = %error, "authorization denied");
        match error {
            AuthzError::Unauthenticated => GatewayError::AuthenticationFailed(error.to_string()),
            AuthzError::Forbidden => GatewayError::AuthorizationFailed(error.to_string()),
        }
    }
}

impl From<UserError> for GatewayError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::Validation(fields) => GatewayError::Validation(fields),
            UserError::NotFound => GatewayError::NotFound("User not found".to_string()),
            UserError::Forbidden(authz) => authz.into(),
            UserError::Auth(auth) => auth.into(),
            UserError::Store(store) => GatewayError::internal(store.to_string()),
        }
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        GatewayError::InvalidRequest(rejection.body_text())
    }
}

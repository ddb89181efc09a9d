//! Fixed-payload endpoints used to check that a credential works

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ErrorResponse;
use crate::middleware::CurrentUser;

pub const PROTECTED_MESSAGE: &str = "This is a protected endpoint";
pub const HOME_MESSAGE: &str = "Hello, World!";

#[derive(Debug, Serialize, ToSchema)]
pub struct ProtectedResponse {
    pub message: String,
    pub user: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HomeResponse {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/api/protected",
    tag = "Probe",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Credential accepted", body = ProtectedResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    )
)]
pub async fn protected(CurrentUser(identity): CurrentUser) -> Json<ProtectedResponse> {
    Json(ProtectedResponse {
        message: PROTECTED_MESSAGE.to_string(),
        user: identity.username,
    })
}

#[utoipa::path(
    get,
    path = "/api/home",
    tag = "Probe",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Greeting", body = HomeResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    )
)]
pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: HOME_MESSAGE.to_string(),
    })
}

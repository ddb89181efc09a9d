//! Registration and profile endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use jackfruit_users::{ProfileUpdateRequest, RegisterRequest, UserRepresentation};

use crate::error::{ErrorResponse, GatewayResult};
use crate::middleware::CurrentUser;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserRepresentation),
        (status = 400, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> GatewayResult<(StatusCode, Json<UserRepresentation>)> {
    let Json(payload) = payload?;
    let user = state.users().register(payload).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "Users",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Caller's profile", body = UserRepresentation),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> GatewayResult<Json<UserRepresentation>> {
    let user = state.users().profile(&identity).await?;
    Ok(Json(user))
}

/// Serves both PUT and PATCH. Absent fields keep their stored value.
#[utoipa::path(
    patch,
    path = "/api/profile",
    tag = "Users",
    security(("bearerAuth" = [])),
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserRepresentation),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    payload: Result<Json<ProfileUpdateRequest>, JsonRejection>,
) -> GatewayResult<Json<UserRepresentation>> {
    let Json(payload) = payload?;
    let user = state.users().update_profile(&identity, payload).await?;

    Ok(Json(user))
}

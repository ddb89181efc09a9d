//! Token endpoints

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ErrorResponse, GatewayResult};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct TokenObtainRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TokenRefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccessTokenResponse {
    pub access: String,
}

#[utoipa::path(
    post,
    path = "/api/token",
    tag = "Auth",
    request_body = TokenObtainRequest,
    responses(
        (status = 200, description = "Access and refresh token pair", body = TokenPairResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 401, description = "No active account with these credentials", body = ErrorResponse)
    )
)]
pub async fn obtain_token(
    State(state): State<AppState>,
    payload: Result<Json<TokenObtainRequest>, JsonRejection>,
) -> GatewayResult<Json<TokenPairResponse>> {
    let Json(payload) = payload?;
    let pair = state
        .issuer()
        .obtain_pair(&payload.username, &payload.password)
        .await?;

    Ok(Json(TokenPairResponse {
        access: pair.access,
        refresh: pair.refresh,
    }))
}

#[utoipa::path(
    post,
    path = "/api/token/refresh",
    tag = "Auth",
    request_body = TokenRefreshRequest,
    responses(
        (status = 200, description = "Fresh access token", body = AccessTokenResponse),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 401, description = "Refresh token invalid or expired", body = ErrorResponse)
    )
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    payload: Result<Json<TokenRefreshRequest>, JsonRejection>,
) -> GatewayResult<Json<AccessTokenResponse>> {
    let Json(payload) = payload?;
    let access = state.issuer().refresh(&payload.refresh).await?;

    Ok(Json(AccessTokenResponse { access }))
}

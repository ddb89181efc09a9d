//! REST API endpoints for the gateway

pub mod auth;
pub mod health;
pub mod probe;
pub mod users;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Routes open to anonymous callers
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/register", post(users::register))
        .route("/api/token", post(auth::obtain_token))
        .route("/api/token/refresh", post(auth::refresh_token))
}

/// Routes that require a verified bearer token
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/profile",
            get(users::get_profile)
                .put(users::update_profile)
                .patch(users::update_profile),
        )
        .route("/api/protected", get(probe::protected))
        .route("/api/home", get(probe::home))
}

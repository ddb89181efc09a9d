//! # Jackfruit Gateway Crate
//!
//! HTTP surface of the backend. Public routes (health, registration and
//! token issuing) are open; every other route sits behind
//! [`middleware::auth_middleware`], which resolves the caller before any
//! handler runs.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jackfruit_gateway::{create_router, AppState};
//!
//! let state = AppState::new(store, &config.auth);
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod docs;
pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;

pub use error::{ErrorResponse, GatewayError, GatewayResult};
pub use middleware::{auth_middleware, CurrentUser};
pub use state::AppState;

use axum::{middleware as axum_middleware, Router};

/// Create the main application router with all routes
pub fn create_router(state: AppState) -> Router {
    let protected = rest::protected_routes().route_layer(axum_middleware::from_fn_with_state(
        state.clone(),
        middleware::auth_middleware,
    ));

    let router = rest::public_routes()
        .merge(protected)
        .with_state(state)
        .layer(middleware::cors_layer())
        .layer(middleware::create_trace_middleware())
        .layer(axum_middleware::from_fn(middleware::logging_middleware));

    #[cfg(debug_assertions)]
    let router = {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        router.merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
    };

    router
}

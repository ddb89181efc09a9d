//! Middleware for authentication and other cross-cutting concerns

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, Method},
    middleware::Next,
    response::Response,
};
use jackfruit_auth::{authorize, AuthError, AuthzError, Identity, Policy};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::error::GatewayError;
use crate::state::AppState;

/// Pull the bearer token out of the `Authorization` header.
pub fn extract_bearer(headers: &HeaderMap) -> Result<String, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let mut parts = value.split_whitespace();
    let scheme = parts.next().unwrap_or("");
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthError::MissingCredentials);
    }

    match (parts.next(), parts.next()) {
        (Some(token), None) => Ok(token.to_string()),
        (None, _) => Err(AuthError::InvalidToken("no credentials provided".to_string())),
        (Some(_), Some(_)) => Err(AuthError::InvalidToken(
            "credentials string should not contain spaces".to_string(),
        )),
    }
}

/// Gate for every protected route. Resolves the caller from the bearer
/// token and stores the [`Identity`] in request extensions; the handler
/// never runs when this fails.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    let token = extract_bearer(request.headers())?;
    let identity = state.verifier().verify(&token).await?;
    authorize(Some(&identity), &Policy::IsAuthenticated)?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// The identity placed in request extensions by [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AuthzError::Unauthenticated.into())
    }
}

/// Create tracing middleware
pub fn create_trace_middleware() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG))
}

/// Logging middleware for request/response logging
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = std::time::Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}

/// CORS layer for cross-origin requests
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

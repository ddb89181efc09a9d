use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::rest::health::health_check,
        crate::rest::users::register,
        crate::rest::users::get_profile,
        crate::rest::users::update_profile,
        crate::rest::auth::obtain_token,
        crate::rest::auth::refresh_token,
        crate::rest::probe::protected,
        crate::rest::probe::home,
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            crate::rest::health::HealthResponse,
            crate::rest::auth::TokenObtainRequest,
            crate::rest::auth::TokenRefreshRequest,
            crate::rest::auth::TokenPairResponse,
            crate::rest::auth::AccessTokenResponse,
            crate::rest::probe::ProtectedResponse,
            crate::rest::probe::HomeResponse,
            jackfruit_users::RegisterRequest,
            jackfruit_users::ProfileUpdateRequest,
            jackfruit_users::UserRepresentation,
        )
    ),
    tags(
        (name = "Health", description = "Service health endpoints"),
        (name = "Auth", description = "JWT issuing and refresh"),
        (name = "Users", description = "Registration and profile management"),
        (name = "Probe", description = "Credential check endpoints"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        let mut scheme = SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer));
        if let SecurityScheme::Http(http) = &mut scheme {
            http.bearer_format = Some("JWT".to_string());
        }

        components
            .security_schemes
            .insert("bearerAuth".to_string(), scheme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        for expected in [
            "/health",
            "/api/register",
            "/api/profile",
            "/api/token",
            "/api/token/refresh",
            "/api/protected",
            "/api/home",
        ] {
            assert!(paths.iter().any(|p| p == expected), "missing {expected}");
        }
    }
}

//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the engagement REST API: endpoint paths from the inbound layer, the
//! error schema wrappers, and the session cookie security scheme. The
//! generated document backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Idea engagement API",
        description = "Exclusive build claims and per-user interaction statuses for startup ideas."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::current_user,
        crate::inbound::http::claims::get_claim_status,
        crate::inbound::http::claims::claim_idea,
        crate::inbound::http::claims::update_claim_progress,
        crate::inbound::http::claims::release_claim,
        crate::inbound::http::interactions::get_interaction,
        crate::inbound::http::interactions::set_interaction,
        crate::inbound::http::interactions::clear_interaction,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "claims", description = "Exclusive build claims on ideas"),
        (name = "interactions", description = "Per-user interaction statuses"),
        (name = "users", description = "Session identity"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document structure.

    use utoipa::OpenApi;

    use super::*;

    #[test]
    fn document_lists_every_engagement_path() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/v1/login",
            "/api/v1/users/me",
            "/api/v1/ideas/{idea_id}/claim",
            "/api/v1/ideas/{idea_id}/claim/progress",
            "/api/v1/ideas/{idea_id}/interaction",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {expected}, got {paths:?}"
            );
        }
    }

    #[test]
    fn document_registers_the_session_security_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components present");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}

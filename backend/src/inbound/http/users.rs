//! User identity HTTP handlers.
//!
//! ```text
//! POST /api/v1/login {"displayName":"Ada Lovelace"}
//! GET  /api/v1/users/me
//! ```
//!
//! Authentication proper lives outside this service; login here is the thin
//! development surface that resolves a display name to a user row and
//! stores the trusted user id in the cookie session.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{DisplayName, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequestBody {
    pub display_name: Option<String>,
}

/// Authenticated user payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub display_name: Option<String>,
}

fn invalid_display_name_error(err: &crate::domain::UserValidationError, value: &str) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": "displayName",
        "value": value,
        "code": "invalid_display_name",
    }))
}

/// Resolve a display name to a user and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequestBody,
    responses(
        (status = 200, description = "Login success", body = UserResponseBody,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequestBody>,
) -> ApiResult<web::Json<UserResponseBody>> {
    let raw_name = payload
        .into_inner()
        .display_name
        .ok_or_else(|| missing_field_error(FieldName::new("displayName")))?;
    let display_name = DisplayName::new(raw_name.as_str())
        .map_err(|err| invalid_display_name_error(&err, &raw_name))?;

    let user = state.login.login(display_name).await?;
    session.persist_user(user.id())?;

    Ok(web::Json(UserResponseBody {
        id: user.id().to_string(),
        display_name: Some(user.display_name().to_string()),
    }))
}

/// Echo the authenticated user.
///
/// The id always comes from the session; the display name is resolved
/// through the directory and may be absent when no user row exists.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponseBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser",
    security(("SessionCookie" = []))
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;

    let display_name = state
        .users
        .find_by_id(&user_id)
        .await
        .map_err(|err| Error::internal(format!("user lookup failed: {err}")))?
        .map(|user| user.display_name().to_string());

    Ok(HttpResponse::Ok().json(UserResponseBody {
        id: user_id.to_string(),
        display_name,
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use serde_json::Value;
    use std::sync::Arc;

    use crate::domain::ports::{
        FixtureClaimCommand, FixtureClaimQuery, FixtureInteractionCommand,
        FixtureInteractionQuery, FixtureLoginService, FixtureUserRepository, FIXTURE_USER_ID,
    };
    use crate::inbound::http::state::{HttpState, HttpStatePorts};

    use super::*;

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = HttpState::new(HttpStatePorts {
            login: Arc::new(FixtureLoginService),
            users: Arc::new(FixtureUserRepository),
            claims: Arc::new(FixtureClaimCommand),
            claims_query: Arc::new(FixtureClaimQuery),
            interactions: Arc::new(FixtureInteractionCommand),
            interactions_query: Arc::new(FixtureInteractionQuery),
        });
        App::new()
            .app_data(web::Data::new(state))
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .service(web::scope("/api/v1").service(login).service(current_user))
    }

    #[actix_web::test]
    async fn login_sets_session_and_returns_the_user() {
        let app = actix_test::init_service(test_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(serde_json::json!({ "displayName": "Ada Lovelace" }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .response()
                .cookies()
                .any(|cookie| cookie.name() == "session")
        );
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("id").and_then(Value::as_str),
            Some(FIXTURE_USER_ID)
        );
    }

    #[actix_web::test]
    async fn login_rejects_missing_display_name() {
        let app = actix_test::init_service(test_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(serde_json::json!({}))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn login_rejects_invalid_display_name() {
        let app = actix_test::init_service(test_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(serde_json::json!({ "displayName": "!" }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("details")
                .and_then(|d| d.get("code"))
                .and_then(Value::as_str),
            Some("invalid_display_name")
        );
    }

    #[actix_web::test]
    async fn current_user_requires_a_session() {
        let app = actix_test::init_service(test_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/me")
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn current_user_echoes_the_session_identity() {
        let app = actix_test::init_service(test_app()).await;

        let login_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(serde_json::json!({ "displayName": "Ada Lovelace" }))
                .to_request(),
        )
        .await;
        let cookie = login_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned();

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("id").and_then(Value::as_str),
            Some(FIXTURE_USER_ID)
        );
    }
}

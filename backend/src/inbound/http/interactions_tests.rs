//! Tests for interaction HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::Value;

use super::*;
use crate::domain::Error;
use crate::domain::ports::{
    FixtureClaimCommand, FixtureClaimQuery, FixtureInteractionCommand, FixtureInteractionQuery,
    FixtureLoginService, FixtureUserRepository, InteractionCommand, MockInteractionCommand,
};
use crate::inbound::http::state::HttpStatePorts;

const IDEA_ID: &str = "00000000-0000-0000-0000-000000000202";

fn test_state(interactions: Arc<dyn InteractionCommand>) -> HttpState {
    HttpState::new(HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        users: Arc::new(FixtureUserRepository),
        claims: Arc::new(FixtureClaimCommand),
        claims_query: Arc::new(FixtureClaimQuery),
        interactions,
        interactions_query: Arc::new(FixtureInteractionQuery),
    })
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(crate::inbound::http::test_utils::test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(crate::inbound::http::users::login)
                .service(get_interaction)
                .service(set_interaction)
                .service(clear_interaction),
        )
}

async fn login_and_get_cookie(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) -> actix_web::cookie::Cookie<'static> {
    let login_req = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(serde_json::json!({ "displayName": "Ada Lovelace" }))
        .to_request();
    let login_res = actix_test::call_service(app, login_req).await;
    assert!(login_res.status().is_success());
    login_res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

#[actix_web::test]
async fn anonymous_interaction_read_returns_null() {
    let app =
        actix_test::init_service(test_app(test_state(Arc::new(FixtureInteractionCommand)))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/ideas/{IDEA_ID}/interaction"))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("status"), Some(&Value::Null));
}

#[actix_web::test]
async fn set_interaction_requires_a_session() {
    let app =
        actix_test::init_service(test_app(test_state(Arc::new(FixtureInteractionCommand)))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/ideas/{IDEA_ID}/interaction"))
            .set_json(serde_json::json!({ "status": "saved" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn set_interaction_stores_and_echoes_the_status() {
    let app =
        actix_test::init_service(test_app(test_state(Arc::new(FixtureInteractionCommand)))).await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/ideas/{IDEA_ID}/interaction"))
            .cookie(cookie)
            .set_json(serde_json::json!({ "status": "saved" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("status").and_then(Value::as_str), Some("saved"));
    assert!(body.get("updatedAt").and_then(Value::as_str).is_some());
}

#[actix_web::test]
async fn set_interaction_rejects_an_unknown_status() {
    let app =
        actix_test::init_service(test_app(test_state(Arc::new(FixtureInteractionCommand)))).await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/ideas/{IDEA_ID}/interaction"))
            .cookie(cookie)
            .set_json(serde_json::json!({ "status": "liked" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("details")
            .and_then(|d| d.get("code"))
            .and_then(Value::as_str),
        Some("invalid_status")
    );
}

#[actix_web::test]
async fn set_interaction_rejects_a_missing_status() {
    let app =
        actix_test::init_service(test_app(test_state(Arc::new(FixtureInteractionCommand)))).await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/ideas/{IDEA_ID}/interaction"))
            .cookie(cookie)
            .set_json(serde_json::json!({}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn clear_interaction_succeeds_with_matching_expectation() {
    let mut interactions = MockInteractionCommand::new();
    interactions
        .expect_clear_status()
        .times(1)
        .return_once(|_| Ok(()));
    let app = actix_test::init_service(test_app(test_state(Arc::new(interactions)))).await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!(
                "/api/v1/ideas/{IDEA_ID}/interaction?expectedStatus=saved"
            ))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn clear_interaction_mismatch_maps_to_409() {
    let mut interactions = MockInteractionCommand::new();
    interactions.expect_clear_status().times(1).return_once(|_| {
        Err(
            Error::conflict("stored status differs from expectation").with_details(
                serde_json::json!({
                    "code": "status_mismatch",
                    "expected": "saved",
                    "actual": "interested",
                }),
            ),
        )
    });
    let app = actix_test::init_service(test_app(test_state(Arc::new(interactions)))).await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!(
                "/api/v1/ideas/{IDEA_ID}/interaction?expectedStatus=saved"
            ))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("details")
            .and_then(|d| d.get("actual"))
            .and_then(Value::as_str),
        Some("interested")
    );
}

#[actix_web::test]
async fn clear_interaction_requires_the_expectation_parameter() {
    let app =
        actix_test::init_service(test_app(test_state(Arc::new(FixtureInteractionCommand)))).await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/ideas/{IDEA_ID}/interaction"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn clear_interaction_without_stored_status_maps_to_404() {
    let app =
        actix_test::init_service(test_app(test_state(Arc::new(FixtureInteractionCommand)))).await;
    let cookie = login_and_get_cookie(&app).await;

    // The fixture command reports nothing stored.
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!(
                "/api/v1/ideas/{IDEA_ID}/interaction?expectedStatus=saved"
            ))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

//! Interaction status HTTP handlers.
//!
//! ```text
//! GET    /api/v1/ideas/{idea_id}/interaction
//! PUT    /api/v1/ideas/{idea_id}/interaction
//! DELETE /api/v1/ideas/{idea_id}/interaction?expectedStatus=saved
//! ```
//!
//! The DELETE precondition travels as the `expectedStatus` query parameter:
//! the stored status must match or the call fails with 409, so a stale tab
//! can never clear a status another tab just changed.

use actix_web::{HttpResponse, delete, get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    ClearInteractionRequest, GetInteractionRequest, SetInteractionRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_interaction_status, parse_uuid,
};

/// Request payload for setting an interaction status.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetInteractionRequestBody {
    /// One of `interested`, `not_interested`, `saved`, `building`.
    pub status: Option<String>,
}

/// Response payload for reading an interaction status.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InteractionStatusResponseBody {
    /// The stored status, or `null` when nothing is stored.
    pub status: Option<String>,
}

/// Response payload for setting an interaction status.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetInteractionResponseBody {
    pub status: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

/// Query parameters for clearing an interaction status.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearInteractionParams {
    pub expected_status: Option<String>,
}

fn parse_idea_id(raw: &str) -> ApiResult<uuid::Uuid> {
    parse_uuid(raw, FieldName::new("ideaId"))
}

/// Read the caller's stored status for an idea.
///
/// Anonymous callers receive `{"status": null}` — an anonymous caller has
/// no interaction row by definition.
#[utoipa::path(
    get,
    path = "/api/v1/ideas/{idea_id}/interaction",
    params(("idea_id" = String, Path, description = "Idea identifier")),
    responses(
        (status = 200, description = "Stored status or null", body = InteractionStatusResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["interactions"],
    operation_id = "getInteraction",
    security([])
)]
#[get("/ideas/{idea_id}/interaction")]
pub async fn get_interaction(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<InteractionStatusResponseBody>> {
    let idea_id = parse_idea_id(&path.into_inner())?;

    let Some(user_id) = session.user_id()? else {
        return Ok(web::Json(InteractionStatusResponseBody { status: None }));
    };

    let response = state
        .interactions_query
        .get_status(GetInteractionRequest { idea_id, user_id })
        .await?;

    Ok(web::Json(InteractionStatusResponseBody {
        status: response.status.map(|status| status.as_str().to_owned()),
    }))
}

/// Set the caller's status for an idea.
///
/// Upsert semantics: repeating the same status is a no-op, a different
/// status overwrites silently.
#[utoipa::path(
    put,
    path = "/api/v1/ideas/{idea_id}/interaction",
    params(("idea_id" = String, Path, description = "Idea identifier")),
    request_body = SetInteractionRequestBody,
    responses(
        (status = 200, description = "Status stored", body = SetInteractionResponseBody),
        (status = 400, description = "Invalid request or unknown status", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["interactions"],
    operation_id = "setInteraction",
    security(("SessionCookie" = []))
)]
#[put("/ideas/{idea_id}/interaction")]
pub async fn set_interaction(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<SetInteractionRequestBody>,
) -> ApiResult<web::Json<SetInteractionResponseBody>> {
    let user_id = session.require_user_id()?;
    let idea_id = parse_idea_id(&path.into_inner())?;
    let raw_status = payload
        .into_inner()
        .status
        .ok_or_else(|| missing_field_error(FieldName::new("status")))?;
    let status = parse_interaction_status(&raw_status, FieldName::new("status"))?;

    let response = state
        .interactions
        .set_status(SetInteractionRequest {
            idea_id,
            user_id,
            status,
        })
        .await?;

    Ok(web::Json(SetInteractionResponseBody {
        status: response.status.as_str().to_owned(),
        updated_at: response.updated_at.to_rfc3339(),
    }))
}

/// Clear the caller's status for an idea.
///
/// Compare-and-delete: succeeds only when the stored status equals
/// `expectedStatus`.
#[utoipa::path(
    delete,
    path = "/api/v1/ideas/{idea_id}/interaction",
    params(
        ("idea_id" = String, Path, description = "Idea identifier"),
        ("expectedStatus" = String, Query, description = "Status the caller believes is stored")
    ),
    responses(
        (status = 204, description = "Status cleared"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No stored status", body = ErrorSchema),
        (status = 409, description = "Stored status differs", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["interactions"],
    operation_id = "clearInteraction",
    security(("SessionCookie" = []))
)]
#[delete("/ideas/{idea_id}/interaction")]
pub async fn clear_interaction(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    params: web::Query<ClearInteractionParams>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let idea_id = parse_idea_id(&path.into_inner())?;
    let raw_expected = params
        .into_inner()
        .expected_status
        .ok_or_else(|| missing_field_error(FieldName::new("expectedStatus")))?;
    let expected_status = parse_interaction_status(&raw_expected, FieldName::new("expectedStatus"))?;

    state
        .interactions
        .clear_status(ClearInteractionRequest {
            idea_id,
            user_id,
            expected_status,
        })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "interactions_tests.rs"]
mod tests;

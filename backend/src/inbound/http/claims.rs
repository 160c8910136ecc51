//! Claim HTTP handlers.
//!
//! ```text
//! GET    /api/v1/ideas/{idea_id}/claim
//! POST   /api/v1/ideas/{idea_id}/claim
//! PATCH  /api/v1/ideas/{idea_id}/claim/progress
//! DELETE /api/v1/ideas/{idea_id}/claim
//! ```
//!
//! The status read is public; every mutation requires an authenticated
//! session. Conflict (409) responses are legitimate concurrency outcomes —
//! clients should re-read the claim status before resubmitting a claim.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    ClaimIdeaRequest, ClaimIdeaResponse, ClaimPayload, ClaimerSummary, GetClaimStatusRequest,
    GetClaimStatusResponse, ReleaseClaimRequest, UpdateClaimProgressRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_uuid};

/// Claim snapshot returned by mutation endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimBody {
    #[schema(format = "uuid")]
    pub idea_id: String,
    #[schema(format = "uuid")]
    pub user_id: String,
    pub progress: i32,
    #[schema(format = "date-time")]
    pub claimed_at: String,
    #[schema(format = "date-time")]
    pub released_at: Option<String>,
}

impl From<ClaimPayload> for ClaimBody {
    fn from(value: ClaimPayload) -> Self {
        Self {
            idea_id: value.idea_id.to_string(),
            user_id: value.user_id.to_string(),
            progress: value.progress,
            claimed_at: value.claimed_at.to_rfc3339(),
            released_at: value.released_at.map(|at| at.to_rfc3339()),
        }
    }
}

/// Public claimer summary embedded in the status response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimerBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub display_name: String,
}

impl From<ClaimerSummary> for ClaimerBody {
    fn from(value: ClaimerSummary) -> Self {
        Self {
            id: value.id.to_string(),
            display_name: value.display_name,
        }
    }
}

/// Response payload for the public claim status.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimStatusResponseBody {
    pub is_claimed: bool,
    #[schema(format = "uuid")]
    pub claimed_by: Option<String>,
    #[schema(format = "date-time")]
    pub claimed_at: Option<String>,
    pub progress: Option<i32>,
    pub total_claim_count: i64,
    pub claimer: Option<ClaimerBody>,
}

impl From<GetClaimStatusResponse> for ClaimStatusResponseBody {
    fn from(value: GetClaimStatusResponse) -> Self {
        Self {
            is_claimed: value.is_claimed,
            claimed_by: value.claimed_by.map(|id| id.to_string()),
            claimed_at: value.claimed_at.map(|at| at.to_rfc3339()),
            progress: value.progress,
            total_claim_count: value.total_claim_count,
            claimer: value.claimer.map(ClaimerBody::from),
        }
    }
}

/// Response payload for claiming an idea.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimIdeaResponseBody {
    pub claim: ClaimBody,
    /// True when the caller already owned the active claim.
    pub already_owned: bool,
}

impl From<ClaimIdeaResponse> for ClaimIdeaResponseBody {
    fn from(value: ClaimIdeaResponse) -> Self {
        Self {
            claim: value.claim.into(),
            already_owned: value.already_owned,
        }
    }
}

/// Request payload for a progress update.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgressRequestBody {
    /// Completion percentage, 0–100.
    pub progress: Option<i32>,
}

/// Response payload for a progress update.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgressResponseBody {
    pub claim: ClaimBody,
}

/// Response payload for releasing a claim.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseClaimResponseBody {
    #[schema(format = "date-time")]
    pub released_at: String,
}

fn parse_idea_id(raw: &str) -> ApiResult<uuid::Uuid> {
    parse_uuid(raw, FieldName::new("ideaId"))
}

/// Read the public claim status for an idea.
///
/// Callable anonymously; only public claimer metadata is returned.
#[utoipa::path(
    get,
    path = "/api/v1/ideas/{idea_id}/claim",
    params(("idea_id" = String, Path, description = "Idea identifier")),
    responses(
        (status = 200, description = "Claim status", body = ClaimStatusResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["claims"],
    operation_id = "getClaimStatus",
    security([])
)]
#[get("/ideas/{idea_id}/claim")]
pub async fn get_claim_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ClaimStatusResponseBody>> {
    let idea_id = parse_idea_id(&path.into_inner())?;

    let response = state
        .claims_query
        .get_claim_status(GetClaimStatusRequest { idea_id })
        .await?;

    Ok(web::Json(ClaimStatusResponseBody::from(response)))
}

/// Claim an idea for the authenticated user.
///
/// Exactly one concurrent caller wins; the rest receive 409. A repeat call
/// by the current owner is a no-op flagged with `alreadyOwned`. After an
/// ambiguous failure, re-check the claim status before retrying.
#[utoipa::path(
    post,
    path = "/api/v1/ideas/{idea_id}/claim",
    params(("idea_id" = String, Path, description = "Idea identifier")),
    responses(
        (status = 200, description = "Claim created or already owned", body = ClaimIdeaResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Idea already claimed", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["claims"],
    operation_id = "claimIdea",
    security(("SessionCookie" = []))
)]
#[post("/ideas/{idea_id}/claim")]
pub async fn claim_idea(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ClaimIdeaResponseBody>> {
    let user_id = session.require_user_id()?;
    let idea_id = parse_idea_id(&path.into_inner())?;

    let response = state
        .claims
        .claim(ClaimIdeaRequest { idea_id, user_id })
        .await?;

    Ok(web::Json(ClaimIdeaResponseBody::from(response)))
}

/// Update progress on the authenticated user's active claim.
#[utoipa::path(
    patch,
    path = "/api/v1/ideas/{idea_id}/claim/progress",
    params(("idea_id" = String, Path, description = "Idea identifier")),
    request_body = UpdateProgressRequestBody,
    responses(
        (status = 200, description = "Progress updated", body = UpdateProgressResponseBody),
        (status = 400, description = "Invalid request or progress out of range", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Claim owned by another user", body = ErrorSchema),
        (status = 404, description = "No active claim", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["claims"],
    operation_id = "updateClaimProgress",
    security(("SessionCookie" = []))
)]
#[patch("/ideas/{idea_id}/claim/progress")]
pub async fn update_claim_progress(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateProgressRequestBody>,
) -> ApiResult<web::Json<UpdateProgressResponseBody>> {
    let user_id = session.require_user_id()?;
    let idea_id = parse_idea_id(&path.into_inner())?;
    let progress = payload
        .into_inner()
        .progress
        .ok_or_else(|| missing_field_error(FieldName::new("progress")))?;

    let response = state
        .claims
        .update_progress(UpdateClaimProgressRequest {
            idea_id,
            user_id,
            progress,
        })
        .await?;

    Ok(web::Json(UpdateProgressResponseBody {
        claim: response.claim.into(),
    }))
}

/// Release the authenticated user's active claim.
///
/// The claim row is retained for history; the idea becomes claimable
/// immediately.
#[utoipa::path(
    delete,
    path = "/api/v1/ideas/{idea_id}/claim",
    params(("idea_id" = String, Path, description = "Idea identifier")),
    responses(
        (status = 200, description = "Claim released", body = ReleaseClaimResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Claim owned by another user", body = ErrorSchema),
        (status = 404, description = "No active claim", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["claims"],
    operation_id = "releaseClaim",
    security(("SessionCookie" = []))
)]
#[delete("/ideas/{idea_id}/claim")]
pub async fn release_claim(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let idea_id = parse_idea_id(&path.into_inner())?;

    let response = state
        .claims
        .release(ReleaseClaimRequest { idea_id, user_id })
        .await?;

    Ok(HttpResponse::Ok().json(ReleaseClaimResponseBody {
        released_at: response.released_at.to_rfc3339(),
    }))
}

#[cfg(test)]
#[path = "claims_tests.rs"]
mod tests;

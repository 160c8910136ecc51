//! Claim registry domain service.
//!
//! Implements the claim driving ports over the claim repository. The
//! exclusivity decision is always made by the repository's atomic insert;
//! this service only sequences the attempt, translates repository outcomes
//! into typed domain errors, and disambiguates zero-row compare-and-set
//! results with an advisory read. The advisory read can be stale — the
//! write itself is still safe because of its predicate.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{
    ClaimCommand, ClaimIdeaRequest, ClaimIdeaResponse, ClaimQuery, ClaimRepository,
    ClaimRepositoryError, ClaimerSummary, GetClaimStatusRequest, GetClaimStatusResponse,
    ReleaseClaimRequest, ReleaseClaimResponse, UpdateClaimProgressRequest,
    UpdateClaimProgressResponse, UserRepository, UserRepositoryError,
};
use crate::domain::{Claim, Error, Progress, ProgressRangeError};

fn map_repository_error(error: ClaimRepositoryError) -> Error {
    match error {
        ClaimRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("claim repository unavailable: {message}"))
        }
        ClaimRepositoryError::Query { message } => {
            Error::internal(format!("claim repository error: {message}"))
        }
        // try_claim conflicts are handled at the call site; anywhere else
        // this variant is still a legitimate concurrent outcome.
        ClaimRepositoryError::AlreadyClaimed { idea_id } => {
            Error::conflict(format!("idea {idea_id} already has an active claim"))
        }
    }
}

fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn invalid_progress_error(error: ProgressRangeError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": "progress",
        "value": error.value,
        "code": "invalid_progress_range",
    }))
}

fn already_claimed_error(existing: &Claim) -> Error {
    Error::conflict("idea is already being built by another user").with_details(json!({
        "code": "already_claimed",
        "claimedBy": existing.user_id.to_string(),
    }))
}

/// Claim registry implementing the claim command and query ports.
#[derive(Clone)]
pub struct ClaimService<R, U> {
    claim_repo: Arc<R>,
    user_repo: Arc<U>,
}

impl<R, U> ClaimService<R, U> {
    /// Create a new service with the claim and user repositories.
    pub fn new(claim_repo: Arc<R>, user_repo: Arc<U>) -> Self {
        Self {
            claim_repo,
            user_repo,
        }
    }
}

impl<R, U> ClaimService<R, U>
where
    R: ClaimRepository,
    U: UserRepository,
{
    /// Explain a zero-row compare-and-set via an advisory read. The caller's
    /// own write already failed its predicate, so any active claim found here
    /// belongs to someone else (modulo a benign release/reclaim race).
    async fn classify_missing_claim(&self, idea_id: Uuid) -> Error {
        match self.claim_repo.find_active(idea_id).await {
            Ok(None) => Error::not_found("idea has no active claim")
                .with_details(json!({ "code": "not_claimed" })),
            Ok(Some(existing)) => {
                Error::forbidden("the active claim belongs to another user").with_details(json!({
                    "code": "not_owner",
                    "claimedBy": existing.user_id.to_string(),
                }))
            }
            Err(err) => map_repository_error(err),
        }
    }
}

#[async_trait]
impl<R, U> ClaimCommand for ClaimService<R, U>
where
    R: ClaimRepository,
    U: UserRepository,
{
    async fn claim(&self, request: ClaimIdeaRequest) -> Result<ClaimIdeaResponse, Error> {
        // Attempt the atomic insert first; never check-then-insert.
        match self
            .claim_repo
            .try_claim(request.idea_id, &request.user_id)
            .await
        {
            Ok(claim) => Ok(ClaimIdeaResponse {
                claim: claim.into(),
                already_owned: false,
            }),
            Err(ClaimRepositoryError::AlreadyClaimed { .. }) => {
                let active = self
                    .claim_repo
                    .find_active(request.idea_id)
                    .await
                    .map_err(map_repository_error)?;
                match active {
                    Some(existing) if existing.user_id == request.user_id => {
                        // Re-claiming an idea the caller already owns is a
                        // no-op returning the existing claim.
                        Ok(ClaimIdeaResponse {
                            claim: existing.into(),
                            already_owned: true,
                        })
                    }
                    Some(existing) => Err(already_claimed_error(&existing)),
                    // The losing insert raced a release that landed before
                    // our read. Callers re-check status before retrying.
                    None => Err(Error::conflict("claim attempt raced a concurrent release")
                        .with_details(json!({ "code": "already_claimed" }))),
                }
            }
            Err(err) => Err(map_repository_error(err)),
        }
    }

    async fn update_progress(
        &self,
        request: UpdateClaimProgressRequest,
    ) -> Result<UpdateClaimProgressResponse, Error> {
        // Range validation short-circuits before any storage access.
        let progress = Progress::new(request.progress).map_err(invalid_progress_error)?;

        let updated = self
            .claim_repo
            .update_progress(request.idea_id, &request.user_id, progress)
            .await
            .map_err(map_repository_error)?;

        match updated {
            Some(claim) => Ok(UpdateClaimProgressResponse {
                claim: claim.into(),
            }),
            None => Err(self
                .classify_missing_claim(request.idea_id)
                .await),
        }
    }

    async fn release(&self, request: ReleaseClaimRequest) -> Result<ReleaseClaimResponse, Error> {
        let released_at = Utc::now();
        let released = self
            .claim_repo
            .release(request.idea_id, &request.user_id, released_at)
            .await
            .map_err(map_repository_error)?;

        match released {
            Some(claim) => Ok(ReleaseClaimResponse {
                released_at: claim.released_at.unwrap_or(released_at),
            }),
            None => Err(self
                .classify_missing_claim(request.idea_id)
                .await),
        }
    }
}

#[async_trait]
impl<R, U> ClaimQuery for ClaimService<R, U>
where
    R: ClaimRepository,
    U: UserRepository,
{
    async fn get_claim_status(
        &self,
        request: GetClaimStatusRequest,
    ) -> Result<GetClaimStatusResponse, Error> {
        let active = self
            .claim_repo
            .find_active(request.idea_id)
            .await
            .map_err(map_repository_error)?;
        let total_claim_count = self
            .claim_repo
            .count_claims(request.idea_id)
            .await
            .map_err(map_repository_error)?;

        let Some(claim) = active else {
            return Ok(GetClaimStatusResponse::unclaimed(total_claim_count));
        };

        let claimer = self
            .user_repo
            .find_by_id(&claim.user_id)
            .await
            .map_err(map_user_repository_error)?
            .map(ClaimerSummary::from);

        Ok(GetClaimStatusResponse {
            is_claimed: true,
            claimed_by: Some(claim.user_id.clone()),
            claimed_at: Some(claim.claimed_at),
            progress: Some(claim.progress.value()),
            total_claim_count,
            claimer,
        })
    }
}

#[cfg(test)]
#[path = "claim_service_tests.rs"]
mod tests;

//! Driving ports for claim mutations.
//!
//! Inbound adapters call these to create, progress, and release claims
//! without knowing the backing storage. All concurrency outcomes surface as
//! typed domain errors; nothing here retries or blocks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Claim, Error, Progress, UserId};

/// Transport-agnostic claim snapshot returned by command operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimPayload {
    pub idea_id: Uuid,
    pub user_id: UserId,
    pub progress: i32,
    pub claimed_at: DateTime<Utc>,
    pub released_at: Option<DateTime<Utc>>,
}

impl From<Claim> for ClaimPayload {
    fn from(value: Claim) -> Self {
        Self {
            idea_id: value.idea_id,
            user_id: value.user_id,
            progress: value.progress.value(),
            claimed_at: value.claimed_at,
            released_at: value.released_at,
        }
    }
}

/// Request to claim an idea.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimIdeaRequest {
    pub idea_id: Uuid,
    pub user_id: UserId,
}

/// Response from claiming an idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimIdeaResponse {
    /// The active claim after the call.
    pub claim: ClaimPayload,
    /// True when the caller already owned the active claim and the call was
    /// a no-op.
    pub already_owned: bool,
}

/// Request to update progress on an owned claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateClaimProgressRequest {
    pub idea_id: Uuid,
    pub user_id: UserId,
    /// Raw percentage; validated against the 0–100 range before any storage
    /// access.
    pub progress: i32,
}

/// Response from a progress update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClaimProgressResponse {
    pub claim: ClaimPayload,
}

/// Request to release an owned claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseClaimRequest {
    pub idea_id: Uuid,
    pub user_id: UserId,
}

/// Response from releasing a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseClaimResponse {
    pub released_at: DateTime<Utc>,
}

/// Driving port for claim mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClaimCommand: Send + Sync {
    /// Claim an idea for the caller.
    ///
    /// # Errors
    /// - `Conflict` when another user holds the active claim.
    /// - `ServiceUnavailable` / `InternalError` for storage failures.
    async fn claim(&self, request: ClaimIdeaRequest) -> Result<ClaimIdeaResponse, Error>;

    /// Update progress on the caller's active claim.
    ///
    /// # Errors
    /// - `InvalidRequest` when progress is outside 0–100 (checked first).
    /// - `NotFound` when the idea has no active claim.
    /// - `Forbidden` when the active claim belongs to someone else.
    async fn update_progress(
        &self,
        request: UpdateClaimProgressRequest,
    ) -> Result<UpdateClaimProgressResponse, Error>;

    /// Release the caller's active claim.
    ///
    /// # Errors
    /// - `NotFound` when the idea has no active claim.
    /// - `Forbidden` when the active claim belongs to someone else.
    async fn release(&self, request: ReleaseClaimRequest) -> Result<ReleaseClaimResponse, Error>;
}

/// Fixture implementation for tests and fixture wiring.
///
/// Every claim succeeds fresh; progress updates and releases behave as if
/// the caller owns an active claim.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureClaimCommand;

#[async_trait]
impl ClaimCommand for FixtureClaimCommand {
    async fn claim(&self, request: ClaimIdeaRequest) -> Result<ClaimIdeaResponse, Error> {
        let claim = Claim {
            id: Uuid::new_v4(),
            idea_id: request.idea_id,
            user_id: request.user_id,
            progress: Progress::ZERO,
            claimed_at: Utc::now(),
            released_at: None,
        };
        Ok(ClaimIdeaResponse {
            claim: claim.into(),
            already_owned: false,
        })
    }

    async fn update_progress(
        &self,
        request: UpdateClaimProgressRequest,
    ) -> Result<UpdateClaimProgressResponse, Error> {
        let progress = Progress::new(request.progress)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let claim = Claim {
            id: Uuid::new_v4(),
            idea_id: request.idea_id,
            user_id: request.user_id,
            progress,
            claimed_at: Utc::now(),
            released_at: None,
        };
        Ok(UpdateClaimProgressResponse {
            claim: claim.into(),
        })
    }

    async fn release(&self, _request: ReleaseClaimRequest) -> Result<ReleaseClaimResponse, Error> {
        Ok(ReleaseClaimResponse {
            released_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use crate::domain::ErrorCode;

    use super::*;

    #[tokio::test]
    async fn fixture_claim_starts_at_zero() {
        let command = FixtureClaimCommand;
        let response = command
            .claim(ClaimIdeaRequest {
                idea_id: Uuid::new_v4(),
                user_id: UserId::random(),
            })
            .await
            .expect("fixture claim");
        assert_eq!(response.claim.progress, 0);
        assert!(!response.already_owned);
    }

    #[tokio::test]
    async fn fixture_update_still_validates_range() {
        let command = FixtureClaimCommand;
        let error = command
            .update_progress(UpdateClaimProgressRequest {
                idea_id: Uuid::new_v4(),
                user_id: UserId::random(),
                progress: 101,
            })
            .await
            .expect_err("out of range");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }
}

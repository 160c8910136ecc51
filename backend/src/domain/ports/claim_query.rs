//! Driving port for public claim status reads.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, User, UserId};

/// Public summary of the active claimer, when a user row exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimerSummary {
    pub id: UserId,
    pub display_name: String,
}

impl From<User> for ClaimerSummary {
    fn from(value: User) -> Self {
        let display_name = value.display_name().to_string();
        Self {
            id: value.id().clone(),
            display_name,
        }
    }
}

/// Request for an idea's claim status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetClaimStatusRequest {
    pub idea_id: Uuid,
}

/// Public claim status projection.
///
/// Reflects the latest committed state. `total_claim_count` counts every
/// claim row ever recorded for the idea (released included); it feeds
/// social-proof display and plays no part in exclusivity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetClaimStatusResponse {
    pub is_claimed: bool,
    pub claimed_by: Option<UserId>,
    pub claimed_at: Option<DateTime<Utc>>,
    pub progress: Option<i32>,
    pub total_claim_count: i64,
    pub claimer: Option<ClaimerSummary>,
}

impl GetClaimStatusResponse {
    /// Status for an idea with no active claim.
    pub fn unclaimed(total_claim_count: i64) -> Self {
        Self {
            is_claimed: false,
            claimed_by: None,
            claimed_at: None,
            progress: None,
            total_claim_count,
            claimer: None,
        }
    }
}

/// Driving port for claim status reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClaimQuery: Send + Sync {
    /// Read the public claim status for an idea.
    ///
    /// Callable anonymously; the response only ever carries public
    /// metadata about the claimer.
    async fn get_claim_status(
        &self,
        request: GetClaimStatusRequest,
    ) -> Result<GetClaimStatusResponse, Error>;
}

/// Fixture implementation reporting every idea as unclaimed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureClaimQuery;

#[async_trait]
impl ClaimQuery for FixtureClaimQuery {
    async fn get_claim_status(
        &self,
        _request: GetClaimStatusRequest,
    ) -> Result<GetClaimStatusResponse, Error> {
        Ok(GetClaimStatusResponse::unclaimed(0))
    }
}

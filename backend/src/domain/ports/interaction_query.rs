//! Driving port for interaction status reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, InteractionStatus, UserId};

/// Request for one user's stored status on one idea.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetInteractionRequest {
    pub idea_id: Uuid,
    pub user_id: UserId,
}

/// Response carrying the stored status, or `None` when nothing is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetInteractionResponse {
    pub status: Option<InteractionStatus>,
}

/// Driving port for interaction reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InteractionQuery: Send + Sync {
    /// Read the caller's stored status for an idea.
    async fn get_status(
        &self,
        request: GetInteractionRequest,
    ) -> Result<GetInteractionResponse, Error>;
}

/// Fixture implementation reporting no stored status.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureInteractionQuery;

#[async_trait]
impl InteractionQuery for FixtureInteractionQuery {
    async fn get_status(
        &self,
        _request: GetInteractionRequest,
    ) -> Result<GetInteractionResponse, Error> {
        Ok(GetInteractionResponse { status: None })
    }
}

//! Driving ports for interaction status mutations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, InteractionStatus, UserId};

/// Request to set (or overwrite) the caller's status for an idea.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetInteractionRequest {
    pub idea_id: Uuid,
    pub user_id: UserId,
    pub status: InteractionStatus,
}

/// Response from a status write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetInteractionResponse {
    pub status: InteractionStatus,
    pub updated_at: DateTime<Utc>,
}

/// Request to clear the caller's status for an idea.
///
/// `expected_status` is the compare-and-delete precondition: the stored
/// status must match or the call is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearInteractionRequest {
    pub idea_id: Uuid,
    pub user_id: UserId,
    pub expected_status: InteractionStatus,
}

/// Driving port for interaction mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InteractionCommand: Send + Sync {
    /// Upsert the caller's status for an idea. Idempotent: repeating the
    /// same status yields identical observable state.
    async fn set_status(
        &self,
        request: SetInteractionRequest,
    ) -> Result<SetInteractionResponse, Error>;

    /// Clear the caller's status, only if it matches the expectation.
    ///
    /// # Errors
    /// - `NotFound` when no status is stored for the pair.
    /// - `Conflict` when the stored status differs from the expectation.
    async fn clear_status(&self, request: ClearInteractionRequest) -> Result<(), Error>;
}

/// Fixture implementation for tests and fixture wiring.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureInteractionCommand;

#[async_trait]
impl InteractionCommand for FixtureInteractionCommand {
    async fn set_status(
        &self,
        request: SetInteractionRequest,
    ) -> Result<SetInteractionResponse, Error> {
        Ok(SetInteractionResponse {
            status: request.status,
            updated_at: Utc::now(),
        })
    }

    async fn clear_status(&self, _request: ClearInteractionRequest) -> Result<(), Error> {
        Err(Error::not_found("no interaction recorded for this idea"))
    }
}

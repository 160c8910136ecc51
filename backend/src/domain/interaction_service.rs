//! Interaction store domain service.
//!
//! Implements the interaction driving ports over the interaction
//! repository. Writes are upserts; clearing is a compare-and-delete whose
//! failed precondition is explained with an advisory read, mirroring the
//! claim service's zero-row handling.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::Error;
use crate::domain::ports::{
    ClearInteractionRequest, GetInteractionRequest, GetInteractionResponse, InteractionCommand,
    InteractionQuery, InteractionRepository, InteractionRepositoryError, SetInteractionRequest,
    SetInteractionResponse,
};

fn map_repository_error(error: InteractionRepositoryError) -> Error {
    match error {
        InteractionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("interaction repository unavailable: {message}"))
        }
        InteractionRepositoryError::Query { message } => {
            Error::internal(format!("interaction repository error: {message}"))
        }
    }
}

/// Interaction store implementing the interaction command and query ports.
#[derive(Clone)]
pub struct InteractionService<R> {
    interaction_repo: Arc<R>,
}

impl<R> InteractionService<R> {
    /// Create a new service with the interaction repository.
    pub fn new(interaction_repo: Arc<R>) -> Self {
        Self { interaction_repo }
    }
}

#[async_trait]
impl<R> InteractionCommand for InteractionService<R>
where
    R: InteractionRepository,
{
    async fn set_status(
        &self,
        request: SetInteractionRequest,
    ) -> Result<SetInteractionResponse, Error> {
        let interaction = self
            .interaction_repo
            .upsert_status(request.idea_id, &request.user_id, request.status)
            .await
            .map_err(map_repository_error)?;

        Ok(SetInteractionResponse {
            status: interaction.status,
            updated_at: interaction.updated_at,
        })
    }

    async fn clear_status(&self, request: ClearInteractionRequest) -> Result<(), Error> {
        let deleted = self
            .interaction_repo
            .delete_matching(request.idea_id, &request.user_id, request.expected_status)
            .await
            .map_err(map_repository_error)?;
        if deleted {
            return Ok(());
        }

        // The compare-and-delete missed; explain why with an advisory read.
        let stored = self
            .interaction_repo
            .find(request.idea_id, &request.user_id)
            .await
            .map_err(map_repository_error)?;
        match stored {
            None => Err(Error::not_found("no interaction recorded for this idea")
                .with_details(json!({ "code": "interaction_not_found" }))),
            Some(interaction) => {
                Err(Error::conflict("stored status differs from expectation").with_details(json!({
                    "code": "status_mismatch",
                    "expected": request.expected_status.as_str(),
                    "actual": interaction.status.as_str(),
                })))
            }
        }
    }
}

#[async_trait]
impl<R> InteractionQuery for InteractionService<R>
where
    R: InteractionRepository,
{
    async fn get_status(
        &self,
        request: GetInteractionRequest,
    ) -> Result<GetInteractionResponse, Error> {
        let stored = self
            .interaction_repo
            .find(request.idea_id, &request.user_id)
            .await
            .map_err(map_repository_error)?;

        Ok(GetInteractionResponse {
            status: stored.map(|interaction| interaction.status),
        })
    }
}

#[cfg(test)]
#[path = "interaction_service_tests.rs"]
mod tests;

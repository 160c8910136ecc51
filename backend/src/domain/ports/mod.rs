//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (command/query traits) are consumed by inbound adapters;
//! driven ports (repository traits) are implemented by outbound adapters.
//! Every port ships a fixture implementation, and a mockall mock under
//! `#[cfg(test)]`.

mod macros;
pub(crate) use macros::define_port_error;

mod claim_command;
mod claim_query;
mod claim_repository;
mod interaction_command;
mod interaction_query;
mod interaction_repository;
mod login_service;
mod user_repository;

#[cfg(test)]
pub use claim_command::MockClaimCommand;
pub use claim_command::{
    ClaimCommand, ClaimIdeaRequest, ClaimIdeaResponse, ClaimPayload, FixtureClaimCommand,
    ReleaseClaimRequest, ReleaseClaimResponse, UpdateClaimProgressRequest,
    UpdateClaimProgressResponse,
};
#[cfg(test)]
pub use claim_query::MockClaimQuery;
pub use claim_query::{
    ClaimQuery, ClaimerSummary, FixtureClaimQuery, GetClaimStatusRequest, GetClaimStatusResponse,
};
#[cfg(test)]
pub use claim_repository::MockClaimRepository;
pub use claim_repository::{ClaimRepository, ClaimRepositoryError, FixtureClaimRepository};
#[cfg(test)]
pub use interaction_command::MockInteractionCommand;
pub use interaction_command::{
    ClearInteractionRequest, FixtureInteractionCommand, InteractionCommand, SetInteractionRequest,
    SetInteractionResponse,
};
#[cfg(test)]
pub use interaction_query::MockInteractionQuery;
pub use interaction_query::{
    FixtureInteractionQuery, GetInteractionRequest, GetInteractionResponse, InteractionQuery,
};
#[cfg(test)]
pub use interaction_repository::MockInteractionRepository;
pub use interaction_repository::{
    FixtureInteractionRepository, InteractionRepository, InteractionRepositoryError,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FIXTURE_USER_ID, FixtureLoginService, LoginService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};

//! Builders for HTTP state ports.
//!
//! Real Diesel-backed services are wired when a database pool is
//! configured; otherwise fixture implementations keep the server usable
//! without persistence.

use std::sync::Arc;

use actix_web::web;

use backend::domain::ports::{
    ClaimCommand, ClaimQuery, FixtureClaimCommand, FixtureClaimQuery, FixtureInteractionCommand,
    FixtureInteractionQuery, FixtureLoginService, FixtureUserRepository, InteractionCommand,
    InteractionQuery,
};
use backend::domain::{ClaimService, DirectoryLoginService, InteractionService};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::persistence::{
    DbPool, DieselClaimRepository, DieselInteractionRepository, DieselUserRepository,
};

use super::ServerConfig;

fn diesel_ports(pool: &DbPool) -> HttpStatePorts {
    let claim_repo = Arc::new(DieselClaimRepository::new(pool.clone()));
    let interaction_repo = Arc::new(DieselInteractionRepository::new(pool.clone()));
    let user_repo = Arc::new(DieselUserRepository::new(pool.clone()));

    let claim_service = Arc::new(ClaimService::new(claim_repo, Arc::clone(&user_repo)));
    let interaction_service = Arc::new(InteractionService::new(interaction_repo));
    let login_service = Arc::new(DirectoryLoginService::new(Arc::clone(&user_repo)));

    let claims: Arc<dyn ClaimCommand> = claim_service.clone();
    let claims_query: Arc<dyn ClaimQuery> = claim_service;
    let interactions: Arc<dyn InteractionCommand> = interaction_service.clone();
    let interactions_query: Arc<dyn InteractionQuery> = interaction_service;

    HttpStatePorts {
        login: login_service,
        users: user_repo,
        claims,
        claims_query,
        interactions,
        interactions_query,
    }
}

fn fixture_ports() -> HttpStatePorts {
    HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        users: Arc::new(FixtureUserRepository),
        claims: Arc::new(FixtureClaimCommand),
        claims_query: Arc::new(FixtureClaimQuery),
        interactions: Arc::new(FixtureInteractionCommand),
        interactions_query: Arc::new(FixtureInteractionQuery),
    }
}

/// Build the HTTP state for the configured persistence mode.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => diesel_ports(pool),
        None => fixture_ports(),
    };
    web::Data::new(HttpState::new(ports))
}

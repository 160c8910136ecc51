//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ClaimCommand, ClaimQuery, InteractionCommand, InteractionQuery, LoginService, UserRepository,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UserRepository>,
    pub claims: Arc<dyn ClaimCommand>,
    pub claims_query: Arc<dyn ClaimQuery>,
    pub interactions: Arc<dyn InteractionCommand>,
    pub interactions_query: Arc<dyn InteractionQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UserRepository>,
    pub claims: Arc<dyn ClaimCommand>,
    pub claims_query: Arc<dyn ClaimQuery>,
    pub interactions: Arc<dyn InteractionCommand>,
    pub interactions_query: Arc<dyn InteractionQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            users,
            claims,
            claims_query,
            interactions,
            interactions_query,
        } = ports;
        Self {
            login,
            users,
            claims,
            claims_query,
            interactions,
            interactions_query,
        }
    }
}

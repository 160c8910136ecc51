//! Idea engagement backend library.
//!
//! The engagement core of a startup-idea platform: exclusive build claims
//! with progress tracking and release, plus per-user interaction statuses.
//! All exclusivity and compare-and-set guarantees are delegated to the
//! storage engine so correctness holds across any number of stateless
//! server replicas.
//!
//! Layout follows the hexagonal convention:
//! - [`domain`] — validated types, ports, and services.
//! - [`inbound`] — the HTTP adapter.
//! - [`outbound`] — the Diesel/PostgreSQL adapter.
//! - [`middleware`] — request tracing.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request tracing middleware re-exported for server wiring.
pub use middleware::Trace;

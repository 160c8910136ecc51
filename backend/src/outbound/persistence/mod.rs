//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports, backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   validated domain types; no business logic lives here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never cross into the domain layer.
//! - **Atomic writes only**: exclusivity and compare-and-set semantics are
//!   expressed in single SQL statements (guarded insert, predicate update,
//!   predicate delete) so correctness holds across any number of replicas.
//! - **Strongly typed errors**: all database errors map to port error types.

mod diesel_claim_repository;
mod diesel_error_mapping;
mod diesel_interaction_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_claim_repository::DieselClaimRepository;
pub use diesel_interaction_repository::DieselInteractionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

//! Domain primitives, aggregates, and services for idea engagement.
//!
//! Purpose: define the strongly typed engagement model (claims and
//! interaction statuses) and the services implementing the driving ports.
//! Types are immutable where practical; invariants and serialisation
//! contracts are documented on each type.
//!
//! Public surface:
//! - `Error` / `ErrorCode` — transport-agnostic error payload.
//! - `Claim` / `Progress` — exclusive build commitments.
//! - `Interaction` / `InteractionStatus` — per-user idea categorisation.
//! - `UserId` / `DisplayName` / `User` — validated identity types.
//! - `ClaimService`, `InteractionService`, `DirectoryLoginService` — port
//!   implementations consumed by the server wiring.

pub mod claim;
pub mod claim_service;
pub mod error;
pub mod interaction;
pub mod interaction_service;
pub mod login;
pub mod ports;
pub mod user;

pub use self::claim::{
    Claim, PROGRESS_MAX, PROGRESS_MIN, Progress, ProgressRangeError,
};
pub use self::claim_service::ClaimService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::interaction::{
    Interaction, InteractionStatus, InteractionStatusParseError,
};
pub use self::interaction_service::InteractionService;
pub use self::login::DirectoryLoginService;
pub use self::user::{
    DISPLAY_NAME_MAX, DISPLAY_NAME_MIN, DisplayName, User, UserId, UserValidationError,
};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;

//! Claim aggregate: one builder's exclusive commitment to one idea.
//!
//! A claim row is never deleted. Releasing sets `released_at`; a later claim
//! on the same idea is a fresh row. The "at most one active claim per idea"
//! invariant is enforced by the storage engine, not here — this module only
//! defines the validated shapes that cross the port boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

/// Inclusive lower bound for claim progress.
pub const PROGRESS_MIN: i32 = 0;
/// Inclusive upper bound for claim progress.
pub const PROGRESS_MAX: i32 = 100;

/// Validation error for out-of-range progress values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("progress must be between {PROGRESS_MIN} and {PROGRESS_MAX}, got {value}")]
pub struct ProgressRangeError {
    /// The rejected value.
    pub value: i32,
}

/// Claim completion percentage, validated to 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Progress(i32);

impl Progress {
    /// A freshly created claim starts at zero.
    pub const ZERO: Self = Self(0);

    /// Validate and construct a [`Progress`] value.
    pub fn new(value: i32) -> Result<Self, ProgressRangeError> {
        if !(PROGRESS_MIN..=PROGRESS_MAX).contains(&value) {
            return Err(ProgressRangeError { value });
        }
        Ok(Self(value))
    }

    /// The raw percentage.
    pub fn value(self) -> i32 {
        self.0
    }
}

impl From<Progress> for i32 {
    fn from(value: Progress) -> Self {
        value.0
    }
}

impl TryFrom<i32> for Progress {
    type Error = ProgressRangeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One builder's commitment to one idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    /// Row identity; a reclaim after release produces a new id.
    pub id: Uuid,
    /// The idea being built.
    pub idea_id: Uuid,
    /// The builder who owns this claim.
    pub user_id: UserId,
    /// Completion percentage reported by the owner.
    pub progress: Progress,
    /// When the claim was created.
    pub claimed_at: DateTime<Utc>,
    /// When the claim was released; `None` while active.
    pub released_at: Option<DateTime<Utc>>,
}

impl Claim {
    /// Whether this claim is still held.
    pub fn is_active(&self) -> bool {
        self.released_at.is_none()
    }
}

//! Interaction status: a user's personal categorisation of an idea.
//!
//! The status set is closed and mutually exclusive. Every state may move to
//! every other state via an upsert; leaving the set entirely (clearing)
//! requires the caller to name the status it believes is stored, so a stale
//! tab can never clear a status another tab just changed.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

/// Error for status strings outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown interaction status: {value}")]
pub struct InteractionStatusParseError {
    /// The rejected input.
    pub value: String,
}

/// A user's current categorisation of an idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionStatus {
    /// The user wants to follow this idea.
    Interested,
    /// The user asked to stop seeing this idea.
    NotInterested,
    /// The user bookmarked this idea.
    Saved,
    /// The user is building this idea.
    Building,
}

impl InteractionStatus {
    /// All statuses, in display order.
    pub const ALL: [Self; 4] = [
        Self::Interested,
        Self::NotInterested,
        Self::Saved,
        Self::Building,
    ];

    /// Stable wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Interested => "interested",
            Self::NotInterested => "not_interested",
            Self::Saved => "saved",
            Self::Building => "building",
        }
    }
}

impl fmt::Display for InteractionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionStatus {
    type Err = InteractionStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interested" => Ok(Self::Interested),
            "not_interested" => Ok(Self::NotInterested),
            "saved" => Ok(Self::Saved),
            "building" => Ok(Self::Building),
            other => Err(InteractionStatusParseError {
                value: other.to_owned(),
            }),
        }
    }
}

/// One user's stored interaction with one idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    /// The idea being categorised.
    pub idea_id: Uuid,
    /// The user who owns this categorisation.
    pub user_id: UserId,
    /// Current status; overwritten, never appended.
    pub status: InteractionStatus,
    /// Last write timestamp.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("interested", InteractionStatus::Interested)]
    #[case("not_interested", InteractionStatus::NotInterested)]
    #[case("saved", InteractionStatus::Saved)]
    #[case("building", InteractionStatus::Building)]
    fn status_parses_every_member_of_the_set(
        #[case] raw: &str,
        #[case] expected: InteractionStatus,
    ) {
        assert_eq!(raw.parse::<InteractionStatus>().expect("known"), expected);
        assert_eq!(expected.as_str(), raw);
    }

    #[rstest]
    #[case("liked")]
    #[case("Interested")]
    #[case("")]
    fn status_rejects_unknown_values(#[case] raw: &str) {
        let error = raw.parse::<InteractionStatus>().expect_err("unknown");
        assert_eq!(error.value, raw);
    }

    #[rstest]
    fn status_serialises_snake_case() {
        let value = serde_json::to_value(InteractionStatus::NotInterested).expect("serialises");
        assert_eq!(value, serde_json::json!("not_interested"));
    }
}

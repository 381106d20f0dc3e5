//! Moderation status for nominations.

use serde::{Deserialize, Serialize};

/// Moderation status of a nomination.
///
/// Every nomination starts as `Pending`. An admin may move a nomination to any
/// status at any time, including back to `Pending` - there is deliberately no
/// terminal-state enforcement in this workflow.
///
/// Serializes in SCREAMING_SNAKE_CASE to match the persisted record layout
/// (`"PENDING"`, `"APPROVED"`, `"REJECTED"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Error returned when parsing a [`Status`] from a string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid status: {0}")]
pub struct StatusParseError(pub String);

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Approved => write!(f, "APPROVED"),
            Self::Rejected => write!(f, "REJECTED"),
        }
    }
}

impl std::str::FromStr for Status {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(StatusParseError(s.to_owned())),
        }
    }
}

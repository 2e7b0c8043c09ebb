//! Credit application status.

use serde::{Deserialize, Serialize};

/// Status label carried by a credit.
///
/// Every credit starts `IN_PROGRESS`. Nothing in this workspace transitions
/// a credit between statuses; the other values exist so stored rows written
/// by a review process can be read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "credit_status", rename_all = "SCREAMING_SNAKE_CASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditStatus {
    #[default]
    InProgress,
    Approved,
    Reject,
}

impl CreditStatus {
    /// The wire/database label (`IN_PROGRESS`, `APPROVED`, `REJECT`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Approved => "APPROVED",
            Self::Reject => "REJECT",
        }
    }
}

impl std::fmt::Display for CreditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CreditStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN_PROGRESS" => Ok(Self::InProgress),
            "APPROVED" => Ok(Self::Approved),
            "REJECT" => Ok(Self::Reject),
            _ => Err(format!("invalid credit status: {s}")),
        }
    }
}

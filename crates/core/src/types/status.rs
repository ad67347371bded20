//! Status enums shown next to renewable services.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How soon a domain or hosting service must be renewed.
///
/// Renewal screens badge each entry by the days left before expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenewalUrgency {
    /// Expires within a week (or has already expired).
    Urgent,
    /// Expires within a month.
    Soon,
    /// More than a month left.
    Normal,
}

impl RenewalUrgency {
    /// Last day count that still counts as urgent.
    pub const URGENT_WITHIN_DAYS: i64 = 7;

    /// Last day count that still counts as soon.
    pub const SOON_WITHIN_DAYS: i64 = 30;

    /// Classify by the number of days left before expiry.
    #[must_use]
    pub const fn from_days_until_expiration(days: i64) -> Self {
        if days <= Self::URGENT_WITHIN_DAYS {
            Self::Urgent
        } else if days <= Self::SOON_WITHIN_DAYS {
            Self::Soon
        } else {
            Self::Normal
        }
    }

    /// Classify an expiry date relative to `today`.
    #[must_use]
    pub fn for_expiration(expires_on: NaiveDate, today: NaiveDate) -> Self {
        Self::from_days_until_expiration((expires_on - today).num_days())
    }
}

impl std::fmt::Display for RenewalUrgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Urgent => write!(f, "urgent"),
            Self::Soon => write!(f, "soon"),
            Self::Normal => write!(f, "normal"),
        }
    }
}

impl std::str::FromStr for RenewalUrgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "urgent" => Ok(Self::Urgent),
            "soon" => Ok(Self::Soon),
            "normal" => Ok(Self::Normal),
            _ => Err(format!("invalid renewal urgency: {s}")),
        }
    }
}

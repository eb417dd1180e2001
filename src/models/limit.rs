//! Limit scopes and advisory warnings attached to an expense decision

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which limit an expense was checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitScope {
    Daily,
    Monthly,
}

impl fmt::Display for LimitScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitScope::Daily => write!(f, "Daily"),
            LimitScope::Monthly => write!(f, "Monthly"),
        }
    }
}

/// Non-blocking notices surfaced with an accepted expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpendWarning {
    /// Daily remaining is within the near-limit threshold
    DailyNear,
    /// Monthly remaining is within the near-limit threshold
    MonthlyNear,
    /// The rolling daily allowance went negative; tomorrow's allowance shrinks
    DailyExceededRolling,
}

impl SpendWarning {
    /// Message shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            SpendWarning::DailyNear => "You are close to today's limit.",
            SpendWarning::MonthlyNear => "You are close to this month's limit.",
            SpendWarning::DailyExceededRolling => {
                "Daily allowance exceeded. Tomorrow's allowance will adjust."
            }
        }
    }
}

impl fmt::Display for SpendWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

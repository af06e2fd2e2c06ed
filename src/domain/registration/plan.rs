//! Membership plan definitions.
//!
//! Maps each membership type offered at registration to its price and
//! validity duration. There is exactly one plan per type; the registration
//! validator rejects anything outside this table.

use serde::{Deserialize, Serialize};

/// Currency all plans are priced in.
pub const CURRENCY: &str = "SGD";

/// Membership type selected on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MembershipType {
    /// Single trimester - 4 months of access.
    #[serde(rename = "1-trimester")]
    OneTrimester,

    /// Three trimesters - a full academic year.
    #[serde(rename = "3-trimester")]
    ThreeTrimester,

    /// Calendar-year membership.
    #[serde(rename = "1-year")]
    OneYear,
}

impl MembershipType {
    /// Parses the wire value (`1-trimester`, `3-trimester`, `1-year`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "1-trimester" => Some(MembershipType::OneTrimester),
            "3-trimester" => Some(MembershipType::ThreeTrimester),
            "1-year" => Some(MembershipType::OneYear),
            _ => None,
        }
    }

    /// Returns the wire value for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipType::OneTrimester => "1-trimester",
            MembershipType::ThreeTrimester => "3-trimester",
            MembershipType::OneYear => "1-year",
        }
    }

    /// Returns the plan for this membership type.
    ///
    /// Total mapping: every enum value has a plan.
    pub fn plan(&self) -> MembershipPlan {
        match self {
            MembershipType::OneTrimester => MembershipPlan {
                membership_type: *self,
                amount_due_cents: 15_000,
                duration_months: 4,
            },
            MembershipType::ThreeTrimester => MembershipPlan {
                membership_type: *self,
                amount_due_cents: 40_000,
                duration_months: 12,
            },
            MembershipType::OneYear => MembershipPlan {
                membership_type: *self,
                amount_due_cents: 45_000,
                duration_months: 12,
            },
        }
    }
}

impl std::fmt::Display for MembershipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Price and validity for a membership type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipPlan {
    pub membership_type: MembershipType,
    /// Amount owed at registration, in SGD cents.
    pub amount_due_cents: i64,
    /// Membership validity in calendar months.
    pub duration_months: u32,
}

impl MembershipPlan {
    /// Amount owed in whole SGD dollars. All plans are whole-dollar priced.
    pub fn amount_due_dollars(&self) -> i64 {
        self.amount_due_cents / 100
    }
}

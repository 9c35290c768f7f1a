//! Membership status.
//!
//! Status is derived from payment totals, except for explicit manual
//! cancellation. The settlement pass overwrites whatever is stored,
//! including `Cancelled`.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// Fees not yet covered by payments.
    Pending,

    /// Fees fully covered.
    Validated,

    /// Manually cancelled.
    Cancelled,
}

impl MembershipStatus {
    /// Status implied by the paid and due totals of the membership's scope.
    pub fn from_totals(paid: Money, due: Money) -> Self {
        if paid >= due {
            MembershipStatus::Validated
        } else {
            MembershipStatus::Pending
        }
    }

    /// Whether a membership in this status unlocks the sibling discount.
    pub fn counts_for_discount(&self) -> bool {
        matches!(self, MembershipStatus::Pending | MembershipStatus::Validated)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Pending => "pending",
            MembershipStatus::Validated => "validated",
            MembershipStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(MembershipStatus::Pending),
            "validated" => Some(MembershipStatus::Validated),
            "cancelled" => Some(MembershipStatus::Cancelled),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paid_equal_to_due_validates() {
        let status = MembershipStatus::from_totals(Money::from_units(150), Money::from_units(150));
        assert_eq!(status, MembershipStatus::Validated);
    }

    #[test]
    fn paid_below_due_is_pending() {
        let status = MembershipStatus::from_totals(Money::from_units(100), Money::from_units(150));
        assert_eq!(status, MembershipStatus::Pending);
    }

    #[test]
    fn nothing_due_nothing_paid_validates() {
        assert_eq!(
            MembershipStatus::from_totals(Money::ZERO, Money::ZERO),
            MembershipStatus::Validated
        );
    }

    #[test]
    fn only_live_statuses_unlock_discount() {
        assert!(MembershipStatus::Pending.counts_for_discount());
        assert!(MembershipStatus::Validated.counts_for_discount());
        assert!(!MembershipStatus::Cancelled.counts_for_discount());
    }

    #[test]
    fn parse_round_trips_as_str() {
        for status in [
            MembershipStatus::Pending,
            MembershipStatus::Validated,
            MembershipStatus::Cancelled,
        ] {
            assert_eq!(MembershipStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(MembershipStatus::parse("active"), None);
    }
}

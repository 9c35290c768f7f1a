//! Membership aggregate: one member's yearly fee for one season.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::MembershipStatus;
use crate::domain::foundation::{
    DomainError, ErrorCode, MemberId, MembershipId, Money, SeasonId, Timestamp, ValidationError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub id: MembershipId,
    pub member_id: MemberId,
    pub season_id: SeasonId,
    pub amount: Money,
    pub membership_date: NaiveDate,
    pub status: MembershipStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Membership {
    /// Creates a pending membership.
    pub fn create(
        member_id: MemberId,
        season_id: SeasonId,
        amount: Money,
        membership_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        amount.ensure_non_negative("amount")?;
        let now = Timestamp::now();
        Ok(Self {
            id: MembershipId::new(),
            member_id,
            season_id,
            amount,
            membership_date,
            status: MembershipStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Changes the fee and/or date. Status is not writable here.
    pub fn update(
        &mut self,
        amount: Option<Money>,
        membership_date: Option<NaiveDate>,
    ) -> Result<(), ValidationError> {
        if let Some(amount) = amount {
            amount.ensure_non_negative("amount")?;
            self.amount = amount;
        }
        if let Some(date) = membership_date {
            self.membership_date = date;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if self.status == MembershipStatus::Cancelled {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Membership is already cancelled",
            ));
        }
        self.status = MembershipStatus::Cancelled;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn counts_for_discount(&self) -> bool {
        self.status.counts_for_discount()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn membership() -> Membership {
        Membership::create(
            MemberId::new(),
            SeasonId::new(),
            Money::from_units(50),
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn create_starts_pending() {
        let m = membership();
        assert_eq!(m.status, MembershipStatus::Pending);
        assert!(m.counts_for_discount());
    }

    #[test]
    fn create_rejects_negative_amount() {
        let result = Membership::create(
            MemberId::new(),
            SeasonId::new(),
            -Money::from_units(1),
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn cancel_twice_is_a_conflict() {
        let mut m = membership();
        m.cancel().unwrap();
        assert!(!m.counts_for_discount());
        let err = m.cancel().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn update_changes_only_given_fields() {
        let mut m = membership();
        let date = m.membership_date;
        m.update(Some(Money::from_units(60)), None).unwrap();
        assert_eq!(m.amount, Money::from_units(60));
        assert_eq!(m.membership_date, date);
        assert_eq!(m.status, MembershipStatus::Pending);
    }
}

//! Payment aggregate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{PaymentScope, PaymentStatus, PaymentType};
use crate::domain::foundation::{
    normalize_optional, DomainError, Money, PaymentId, SeasonId, StateMachine, Timestamp,
    ValidationError,
};

/// Input for recording a new payment.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub scope: PaymentScope,
    pub season_id: Option<SeasonId>,
    pub amount: Money,
    pub payment_type: PaymentType,
    pub payment_date: NaiveDate,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub scope: PaymentScope,
    pub season_id: Option<SeasonId>,
    pub amount: Money,
    pub payment_type: PaymentType,
    pub payment_date: NaiveDate,
    pub cashing_date: Option<NaiveDate>,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub status: PaymentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Payment {
    /// Records a pending payment.
    ///
    /// Family and member payments must name a season; show-client payments
    /// may omit it.
    pub fn record(input: NewPayment) -> Result<Self, ValidationError> {
        input.amount.ensure_positive("amount")?;
        if input.scope.settlement_scope().is_some() && input.season_id.is_none() {
            return Err(ValidationError::empty_field("season_id"));
        }
        let now = Timestamp::now();
        Ok(Self {
            id: PaymentId::new(),
            scope: input.scope,
            season_id: input.season_id,
            amount: input.amount,
            payment_type: input.payment_type,
            payment_date: input.payment_date,
            cashing_date: None,
            reference: normalize_optional(input.reference),
            notes: normalize_optional(input.notes),
            status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Moves a pending payment to cashed on the given date.
    pub fn mark_cashed(&mut self, cashing_date: NaiveDate) -> Result<(), DomainError> {
        self.status = self.status.transition_to(PaymentStatus::Cashed)?;
        self.cashing_date = Some(cashing_date);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(PaymentStatus::Cancelled)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn is_cashed(&self) -> bool {
        self.status == PaymentStatus::Cashed
    }

    /// A check that has not reached the bank yet.
    pub fn is_uncashed_check(&self) -> bool {
        self.payment_type == PaymentType::Check
            && self.cashing_date.is_none()
            && self.status != PaymentStatus::Cancelled
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::domain::foundation::FamilyId;

    pub fn new_payment(scope: PaymentScope, season: Option<SeasonId>, amount: i64) -> NewPayment {
        NewPayment {
            scope,
            season_id: season,
            amount: Money::from_units(amount),
            payment_type: PaymentType::Check,
            payment_date: NaiveDate::from_ymd_opt(2024, 9, 15).unwrap(),
            reference: Some("CHK-001".to_string()),
            notes: None,
        }
    }

    pub fn family_payment(amount: i64) -> Payment {
        Payment::record(new_payment(
            PaymentScope::Family(FamilyId::new()),
            Some(SeasonId::new()),
            amount,
        ))
        .unwrap()
    }
}

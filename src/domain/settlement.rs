//! Due/paid/balance calculation and membership status reconciliation.
//!
//! A [`ScopeLedger`] holds the memberships, registrations and payments of
//! one family or member (optionally narrowed to one season). Everything in
//! this module is pure; loading the ledger and persisting the outcome are
//! the application layer's job.
//!
//! - `total_due = Σ membership.amount + Σ line.applied_price × line.quantity`
//! - `total_paid = Σ payment.amount` over cashed payments only
//! - `balance = total_due − total_paid` (negative when in credit)
//! - `donation = max(0, total_paid − total_due)`

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MemberId, MembershipId, Money, SeasonId};
use crate::domain::membership::{Membership, MembershipStatus};
use crate::domain::payment::Payment;
use crate::domain::registration::Registration;

/// Read-side status of a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    /// Paid in full (or nothing due).
    Validated,
    /// Something paid, something still due.
    Partial,
    /// Nothing paid and something due.
    Unpaid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSummary {
    pub total_due: Money,
    pub total_paid: Money,
    pub balance: Money,
    pub donation: Money,
    pub is_fully_paid: bool,
    pub status: SettlementStatus,
}

impl SettlementSummary {
    pub fn from_totals(total_due: Money, total_paid: Money) -> Self {
        let is_fully_paid = total_paid >= total_due;
        let status = if is_fully_paid {
            SettlementStatus::Validated
        } else if total_paid.is_positive() {
            SettlementStatus::Partial
        } else {
            SettlementStatus::Unpaid
        };
        Self {
            total_due,
            total_paid,
            balance: total_due - total_paid,
            donation: total_paid.surplus_over(total_due),
            is_fully_paid,
            status,
        }
    }
}

/// Membership status to write to a set of memberships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipStatusUpdate {
    pub membership_ids: Vec<MembershipId>,
    pub status: MembershipStatus,
}

impl MembershipStatusUpdate {
    pub fn is_empty(&self) -> bool {
        self.membership_ids.is_empty()
    }
}

/// Side effects of recording a family or member payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub season_id: SeasonId,
    /// Overpayment to add to the season's donation total. Zero when none.
    pub donation: Money,
    pub status_update: MembershipStatusUpdate,
}

/// Everything owed and paid within one settlement scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeLedger {
    pub member_ids: Vec<MemberId>,
    pub memberships: Vec<Membership>,
    pub registrations: Vec<Registration>,
    pub payments: Vec<Payment>,
}

impl ScopeLedger {
    /// Membership fees plus workshop lines. Cancelled memberships still count.
    pub fn total_due(&self) -> Money {
        let memberships: Money = self.memberships.iter().map(|m| m.amount).sum();
        let workshops: Money = self.registrations.iter().map(Registration::total_amount).sum();
        memberships + workshops
    }

    /// Sum of cashed payments.
    pub fn total_cashed(&self) -> Money {
        self.payments
            .iter()
            .filter(|p| p.is_cashed())
            .map(|p| p.amount)
            .sum()
    }

    pub fn summary(&self) -> SettlementSummary {
        SettlementSummary::from_totals(self.total_due(), self.total_cashed())
    }

    /// Reconciliation for a payment being recorded.
    ///
    /// The new (still pending) amount is counted on top of the cashed
    /// total, both for the donation and for membership status.
    pub fn reconcile_new_payment(&self, season_id: SeasonId, amount: Money) -> Reconciliation {
        let due = self.total_due();
        let paid_with_new = self.total_cashed() + amount;
        Reconciliation {
            season_id,
            donation: paid_with_new.surplus_over(due),
            status_update: self.status_update(paid_with_new, due),
        }
    }

    /// Membership statuses once `cashed` has been cashed.
    ///
    /// Only cashed payments count; `cashed` replaces its stored version so
    /// the just-cashed amount is included.
    pub fn reconcile_cash_in(&self, cashed: &Payment) -> MembershipStatusUpdate {
        let others: Money = self
            .payments
            .iter()
            .filter(|p| p.id != cashed.id && p.is_cashed())
            .map(|p| p.amount)
            .sum();
        let paid = if cashed.is_cashed() {
            others + cashed.amount
        } else {
            others
        };
        self.status_update(paid, self.total_due())
    }

    /// Members whose sibling-discount eligibility flips once `update` is
    /// applied, with the season to reprice. A cancelled membership brought
    /// back to pending or validated is the usual case.
    pub fn eligibility_changes(&self, update: &MembershipStatusUpdate) -> Vec<(MemberId, SeasonId)> {
        let mut changed: Vec<(MemberId, SeasonId)> = Vec::new();
        for membership in &self.memberships {
            if !update.membership_ids.contains(&membership.id) {
                continue;
            }
            if membership.counts_for_discount() == update.status.counts_for_discount() {
                continue;
            }
            let key = (membership.member_id, membership.season_id);
            if !changed.contains(&key) {
                changed.push(key);
            }
        }
        changed
    }

    fn status_update(&self, paid: Money, due: Money) -> MembershipStatusUpdate {
        MembershipStatusUpdate {
            membership_ids: self.memberships.iter().map(|m| m.id).collect(),
            status: MembershipStatus::from_totals(paid, due),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{FamilyId, Percentage, WorkshopId, WorkshopRegistrationId};
    use crate::domain::payment::test_support::new_payment;
    use crate::domain::payment::PaymentScope;
    use crate::domain::registration::{FamilyOrder, WorkshopRegistration};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
    }

    fn membership(season: SeasonId, amount: i64) -> Membership {
        Membership::create(MemberId::new(), season, Money::from_units(amount), date()).unwrap()
    }

    fn payment(scope: PaymentScope, season: SeasonId, amount: i64, cashed: bool) -> Payment {
        let mut p = Payment::record(new_payment(scope, Some(season), amount)).unwrap();
        if cashed {
            p.mark_cashed(date()).unwrap();
        }
        p
    }

    fn registration(season: SeasonId, price: i64, quantity: u32) -> Registration {
        Registration::create(
            MemberId::new(),
            season,
            FamilyOrder::FIRST,
            date(),
            vec![WorkshopRegistration {
                id: WorkshopRegistrationId::new(),
                workshop_id: WorkshopId::new(),
                quantity,
                applied_price: Money::from_units(price),
                discount_percent: Percentage::ZERO,
            }],
        )
        .unwrap()
    }

    #[test]
    fn three_memberships_fully_cashed_are_validated() {
        let season = SeasonId::new();
        let scope = PaymentScope::Family(FamilyId::new());
        let ledger = ScopeLedger {
            memberships: (0..3).map(|_| membership(season, 50)).collect(),
            payments: vec![payment(scope, season, 150, true)],
            ..Default::default()
        };

        let summary = ledger.summary();
        assert_eq!(summary.total_due, Money::from_units(150));
        assert_eq!(summary.balance, Money::ZERO);
        assert_eq!(summary.donation, Money::ZERO);
        assert_eq!(summary.status, SettlementStatus::Validated);
        assert!(summary.is_fully_paid);
    }

    #[test]
    fn reviving_a_cancelled_membership_changes_eligibility() {
        let season = SeasonId::new();
        let live = membership(season, 50);
        let mut cancelled = membership(season, 50);
        cancelled.cancel().unwrap();
        let ledger = ScopeLedger {
            memberships: vec![live.clone(), cancelled.clone()],
            ..Default::default()
        };

        let update = ledger.reconcile_new_payment(season, Money::from_units(100)).status_update;
        assert_eq!(update.status, MembershipStatus::Validated);
        assert_eq!(
            ledger.eligibility_changes(&update),
            vec![(cancelled.member_id, season)]
        );
    }

    #[test]
    fn pending_to_validated_keeps_eligibility() {
        let season = SeasonId::new();
        let ledger = ScopeLedger {
            memberships: vec![membership(season, 50)],
            ..Default::default()
        };
        let update = ledger.reconcile_new_payment(season, Money::from_units(50)).status_update;
        assert!(ledger.eligibility_changes(&update).is_empty());
    }

    #[test]
    fn pending_payments_do_not_count_as_paid() {
        let season = SeasonId::new();
        let scope = PaymentScope::Family(FamilyId::new());
        let ledger = ScopeLedger {
            memberships: vec![membership(season, 100)],
            payments: vec![payment(scope, season, 100, false)],
            ..Default::default()
        };

        let summary = ledger.summary();
        assert_eq!(summary.total_paid, Money::ZERO);
        assert_eq!(summary.status, SettlementStatus::Unpaid);
        assert_eq!(summary.balance, Money::from_units(100));
    }

    #[test]
    fn partial_when_some_cashed() {
        let season = SeasonId::new();
        let scope = PaymentScope::Family(FamilyId::new());
        let ledger = ScopeLedger {
            memberships: vec![membership(season, 100)],
            payments: vec![payment(scope, season, 40, true)],
            ..Default::default()
        };
        assert_eq!(ledger.summary().status, SettlementStatus::Partial);
    }

    #[test]
    fn nothing_due_nothing_paid_is_validated() {
        let summary = ScopeLedger::default().summary();
        assert_eq!(summary.status, SettlementStatus::Validated);
        assert!(summary.is_fully_paid);
    }

    #[test]
    fn workshop_lines_count_quantity() {
        let season = SeasonId::new();
        let ledger = ScopeLedger {
            memberships: vec![membership(season, 50)],
            registrations: vec![registration(season, 90, 2)],
            ..Default::default()
        };
        assert_eq!(ledger.total_due(), Money::from_units(230));
    }

    #[test]
    fn cancelled_memberships_still_count_as_due() {
        let season = SeasonId::new();
        let mut cancelled = membership(season, 50);
        cancelled.cancel().unwrap();
        let ledger = ScopeLedger {
            memberships: vec![cancelled],
            ..Default::default()
        };
        assert_eq!(ledger.total_due(), Money::from_units(50));
    }

    #[test]
    fn overpayment_on_record_becomes_donation() {
        let season = SeasonId::new();
        let ledger = ScopeLedger {
            memberships: (0..3).map(|_| membership(season, 50)).collect(),
            ..Default::default()
        };

        let reconciliation = ledger.reconcile_new_payment(season, Money::from_units(200));
        assert_eq!(reconciliation.donation, Money::from_units(50));
        assert_eq!(reconciliation.status_update.status, MembershipStatus::Validated);
        assert_eq!(reconciliation.status_update.membership_ids.len(), 3);
    }

    #[test]
    fn underpayment_on_record_keeps_pending() {
        let season = SeasonId::new();
        let ledger = ScopeLedger {
            memberships: vec![membership(season, 150)],
            ..Default::default()
        };
        let reconciliation = ledger.reconcile_new_payment(season, Money::from_units(100));
        assert_eq!(reconciliation.donation, Money::ZERO);
        assert_eq!(reconciliation.status_update.status, MembershipStatus::Pending);
    }

    #[test]
    fn cash_in_counts_just_cashed_payment() {
        let season = SeasonId::new();
        let scope = PaymentScope::Family(FamilyId::new());
        let stored = payment(scope, season, 150, false);
        let ledger = ScopeLedger {
            memberships: (0..3).map(|_| membership(season, 50)).collect(),
            payments: vec![stored.clone()],
            ..Default::default()
        };

        let mut cashed = stored;
        cashed.mark_cashed(date()).unwrap();
        let update = ledger.reconcile_cash_in(&cashed);

        assert_eq!(update.status, MembershipStatus::Validated);
        assert_eq!(update.membership_ids.len(), 3);
    }

    #[test]
    fn cash_in_ignores_other_pending_payments() {
        let season = SeasonId::new();
        let scope = PaymentScope::Family(FamilyId::new());
        let first = payment(scope, season, 50, false);
        let second = payment(scope, season, 100, false);
        let ledger = ScopeLedger {
            memberships: vec![membership(season, 150)],
            payments: vec![first.clone(), second],
            ..Default::default()
        };

        let mut cashed = first;
        cashed.mark_cashed(date()).unwrap();
        assert_eq!(ledger.reconcile_cash_in(&cashed).status, MembershipStatus::Pending);
    }

    proptest! {
        #[test]
        fn balance_and_donation_are_consistent(due in 0i64..100_000, paid in 0i64..100_000) {
            let summary = SettlementSummary::from_totals(Money::from_units(due), Money::from_units(paid));
            prop_assert_eq!(summary.balance, Money::from_units(due - paid));
            prop_assert!(summary.donation >= Money::ZERO);
            prop_assert_eq!(summary.donation, Money::from_units((paid - due).max(0)));
            prop_assert_eq!(summary.is_fully_paid, paid >= due);
        }

        #[test]
        fn cash_in_status_matches_cashed_totals(
            fees in proptest::collection::vec(0i64..500, 0..4),
            cashed_amounts in proptest::collection::vec(1i64..500, 0..4),
            new_amount in 1i64..500,
        ) {
            let season = SeasonId::new();
            let scope = PaymentScope::Family(FamilyId::new());
            let mut payments: Vec<Payment> = cashed_amounts
                .iter()
                .map(|a| payment(scope, season, *a, true))
                .collect();
            let pending = payment(scope, season, new_amount, false);
            payments.push(pending.clone());
            let ledger = ScopeLedger {
                memberships: fees.iter().map(|f| membership(season, *f)).collect(),
                payments,
                ..Default::default()
            };

            let mut cashed = pending;
            cashed.mark_cashed(date()).unwrap();
            let update = ledger.reconcile_cash_in(&cashed);

            let paid = Money::from_units(cashed_amounts.iter().sum::<i64>() + new_amount);
            let due = Money::from_units(fees.iter().sum::<i64>());
            prop_assert_eq!(update.status == MembershipStatus::Validated, paid >= due);
        }
    }
}

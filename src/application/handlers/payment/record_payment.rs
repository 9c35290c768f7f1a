//! RecordPaymentHandler - records a payment and reconciles its scope.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::application::handlers::registration::RegistrationRepricer;
use crate::domain::foundation::{DomainError, ErrorCode, Money, SeasonId};
use crate::domain::membership::MembershipStatus;
use crate::domain::payment::{NewPayment, Payment, PaymentScope, PaymentType};
use crate::ports::{PaymentRepository, SeasonRepository, SettlementReader, ShowRepository};

#[derive(Debug, Clone)]
pub struct RecordPaymentCommand {
    pub scope: PaymentScope,
    pub season_id: Option<SeasonId>,
    pub amount: Money,
    pub payment_type: PaymentType,
    pub payment_date: NaiveDate,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RecordPaymentResult {
    pub payment: Payment,
    /// Surplus added to the season's donations (zero for show payments).
    pub donation: Money,
    /// Status written to the scope's memberships, if any were touched.
    pub membership_status: Option<MembershipStatus>,
}

pub struct RecordPaymentHandler {
    payments: Arc<dyn PaymentRepository>,
    seasons: Arc<dyn SeasonRepository>,
    shows: Arc<dyn ShowRepository>,
    settlement: Arc<dyn SettlementReader>,
    repricer: RegistrationRepricer,
}

impl RecordPaymentHandler {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        seasons: Arc<dyn SeasonRepository>,
        shows: Arc<dyn ShowRepository>,
        settlement: Arc<dyn SettlementReader>,
        repricer: RegistrationRepricer,
    ) -> Self {
        Self {
            payments,
            seasons,
            shows,
            settlement,
            repricer,
        }
    }

    pub async fn handle(&self, cmd: RecordPaymentCommand) -> Result<RecordPaymentResult, DomainError> {
        let payment = Payment::record(NewPayment {
            scope: cmd.scope,
            season_id: cmd.season_id,
            amount: cmd.amount,
            payment_type: cmd.payment_type,
            payment_date: cmd.payment_date,
            reference: cmd.reference,
            notes: cmd.notes,
        })?;

        let result = match (payment.scope.settlement_scope(), payment.season_id) {
            (Some(scope), Some(season_id)) => {
                if self.seasons.find_by_id(&season_id).await?.is_none() {
                    return Err(DomainError::new(ErrorCode::SeasonNotFound, "Season not found"));
                }

                let ledger = self.settlement.load_ledger(&scope, Some(&season_id)).await?;
                let reconciliation = ledger.reconcile_new_payment(season_id, payment.amount);
                debug!(
                    payment_id = %payment.id,
                    total_due = %ledger.total_due(),
                    total_cashed = %ledger.total_cashed(),
                    donation = %reconciliation.donation,
                    "Reconciled new payment"
                );

                self.payments.record(&payment, Some(&reconciliation)).await?;
                for (member_id, season_id) in ledger.eligibility_changes(&reconciliation.status_update) {
                    self.repricer.reprice(&member_id, &season_id).await?;
                }

                let membership_status = (!reconciliation.status_update.is_empty())
                    .then_some(reconciliation.status_update.status);
                RecordPaymentResult {
                    payment,
                    donation: reconciliation.donation,
                    membership_status,
                }
            }
            _ => {
                if let Some(client_id) = payment.scope.show_client_id() {
                    if self.shows.find_client(&client_id).await?.is_none() {
                        return Err(DomainError::new(
                            ErrorCode::ShowClientNotFound,
                            "Show client not found",
                        ));
                    }
                }
                if let Some(season_id) = payment.season_id {
                    if self.seasons.find_by_id(&season_id).await?.is_none() {
                        return Err(DomainError::new(
                            ErrorCode::SeasonNotFound,
                            "Season not found",
                        ));
                    }
                }

                self.payments.record(&payment, None).await?;
                RecordPaymentResult {
                    payment,
                    donation: Money::ZERO,
                    membership_status: None,
                }
            }
        };

        info!(
            payment_id = %result.payment.id,
            amount = %result.payment.amount,
            payment_type = result.payment.payment_type.as_str(),
            donation = %result.donation,
            "Payment recorded"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::{FamilyId, ShowClientId};

    #[tokio::test]
    async fn overpayment_is_recorded_as_donation() {
        let fx = Fixture::new().await;
        let family = fx.family().await;
        for _ in 0..3 {
            let member = fx.member(Some(family.id)).await;
            fx.membership(&member).await;
        }

        let result = fx
            .record_payment_handler()
            .handle(fx.payment_command(PaymentScope::Family(family.id), 200))
            .await
            .unwrap();

        assert_eq!(result.donation, Money::from_units(50));
        assert_eq!(result.membership_status, Some(MembershipStatus::Validated));
        assert_eq!(fx.season_donations().await, Money::from_units(50));
    }

    #[tokio::test]
    async fn reviving_cancelled_membership_reprices_registration() {
        let fx = Fixture::new().await;
        let member = fx.member(None).await;
        let workshop = fx.workshop(false, None, 100).await;
        let registration = fx.sibling_registration(&member, &[(workshop.id, 1)]).await;
        let membership = fx.membership(&member).await;
        fx.membership_handlers().cancel(membership.id).await.unwrap();
        assert_eq!(
            fx.registration_by_id(&registration.id).await.lines[0].applied_price,
            Money::from_units(100)
        );

        let result = fx
            .record_payment_handler()
            .handle(fx.payment_command(PaymentScope::Member(member.id), 500))
            .await
            .unwrap();

        assert_eq!(result.membership_status, Some(MembershipStatus::Validated));
        assert_eq!(
            fx.membership_by_id(&membership.id).await.status,
            MembershipStatus::Validated
        );
        assert_eq!(
            fx.registration_by_id(&registration.id).await.lines[0].applied_price,
            Money::from_units(90)
        );
    }

    #[tokio::test]
    async fn partial_payment_keeps_memberships_pending() {
        let fx = Fixture::new().await;
        let family = fx.family().await;
        let member = fx.member(Some(family.id)).await;
        fx.membership(&member).await;

        let result = fx
            .record_payment_handler()
            .handle(fx.payment_command(PaymentScope::Family(family.id), 20))
            .await
            .unwrap();

        assert!(result.donation.is_zero());
        assert_eq!(result.membership_status, Some(MembershipStatus::Pending));
        assert_eq!(fx.season_donations().await, Money::ZERO);
    }

    #[tokio::test]
    async fn unknown_family_is_not_found() {
        let fx = Fixture::new().await;
        let err = fx
            .record_payment_handler()
            .handle(fx.payment_command(PaymentScope::Family(FamilyId::new()), 20))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::FamilyNotFound);
        assert_eq!(fx.store.payment_count().await, 0);
    }

    #[tokio::test]
    async fn family_payment_without_season_is_rejected() {
        let fx = Fixture::new().await;
        let family = fx.family().await;
        let mut cmd = fx.payment_command(PaymentScope::Family(family.id), 20);
        cmd.season_id = None;

        let err = fx.record_payment_handler().handle(cmd).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyField);
    }

    #[tokio::test]
    async fn show_payment_skips_reconciliation() {
        let fx = Fixture::new().await;
        let client = fx.show_client().await;
        let mut cmd = fx.payment_command(PaymentScope::ShowClient(client.id), 400);
        cmd.season_id = None;

        let result = fx.record_payment_handler().handle(cmd).await.unwrap();
        assert!(result.donation.is_zero());
        assert!(result.membership_status.is_none());
        assert_eq!(fx.season_donations().await, Money::ZERO);
    }

    #[tokio::test]
    async fn show_payment_for_unknown_client_is_not_found() {
        let fx = Fixture::new().await;
        let cmd = fx.payment_command(PaymentScope::ShowClient(ShowClientId::new()), 400);
        let err = fx.record_payment_handler().handle(cmd).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ShowClientNotFound);
    }
}

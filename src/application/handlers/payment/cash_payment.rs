//! CashPaymentHandler - marks a payment as cashed and revalidates memberships.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::application::handlers::registration::RegistrationRepricer;
use crate::domain::foundation::{DomainError, ErrorCode, MemberId, PaymentId, SeasonId};
use crate::domain::payment::Payment;
use crate::ports::{PaymentRepository, SettlementReader};

#[derive(Debug, Clone)]
pub struct CashPaymentCommand {
    pub payment_id: PaymentId,
    pub cashing_date: NaiveDate,
}

pub struct CashPaymentHandler {
    payments: Arc<dyn PaymentRepository>,
    settlement: Arc<dyn SettlementReader>,
    repricer: RegistrationRepricer,
}

impl CashPaymentHandler {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        settlement: Arc<dyn SettlementReader>,
        repricer: RegistrationRepricer,
    ) -> Self {
        Self {
            payments,
            settlement,
            repricer,
        }
    }

    pub async fn handle(&self, cmd: CashPaymentCommand) -> Result<Payment, DomainError> {
        let mut payment = self
            .payments
            .find_by_id(&cmd.payment_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::PaymentNotFound, "Payment not found"))?;

        payment.mark_cashed(cmd.cashing_date)?;

        let mut to_reprice: Vec<(MemberId, SeasonId)> = Vec::new();
        let status_update = match payment.scope.settlement_scope() {
            Some(scope) => {
                let ledger = self
                    .settlement
                    .load_ledger(&scope, payment.season_id.as_ref())
                    .await?;
                let update = ledger.reconcile_cash_in(&payment);
                to_reprice = ledger.eligibility_changes(&update);
                Some(update)
            }
            None => None,
        };

        self.payments
            .update_status(&payment, status_update.as_ref())
            .await?;
        for (member_id, season_id) in &to_reprice {
            self.repricer.reprice(member_id, season_id).await?;
        }

        info!(
            payment_id = %payment.id,
            amount = %payment.amount,
            cashing_date = %cmd.cashing_date,
            memberships = status_update.as_ref().map_or(0, |u| u.membership_ids.len()),
            "Payment cashed"
        );

        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::Money;
    use crate::domain::membership::MembershipStatus;
    use crate::domain::payment::{PaymentScope, PaymentStatus};

    fn cashing_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 1).unwrap()
    }

    #[tokio::test]
    async fn cashing_full_payment_validates_memberships() {
        let fx = Fixture::new().await;
        let member = fx.member(None).await;
        let membership = fx.membership(&member).await;
        let recorded = fx
            .record_payment_handler()
            .handle(fx.payment_command(PaymentScope::Member(member.id), 50))
            .await
            .unwrap();

        let cashed = fx
            .cash_payment_handler()
            .handle(CashPaymentCommand {
                payment_id: recorded.payment.id,
                cashing_date: cashing_date(),
            })
            .await
            .unwrap();

        assert_eq!(cashed.status, PaymentStatus::Cashed);
        assert_eq!(cashed.cashing_date, Some(cashing_date()));
        assert_eq!(
            fx.membership_by_id(&membership.id).await.status,
            MembershipStatus::Validated
        );
    }

    #[tokio::test]
    async fn cashing_revives_cancelled_membership_and_reprices() {
        let fx = Fixture::new().await;
        let member = fx.member(None).await;
        let workshop = fx.workshop(false, None, 100).await;
        let registration = fx.sibling_registration(&member, &[(workshop.id, 1)]).await;
        let membership = fx.membership(&member).await;
        let recorded = fx
            .record_payment_handler()
            .handle(fx.payment_command(PaymentScope::Member(member.id), 500))
            .await
            .unwrap();
        fx.membership_handlers().cancel(membership.id).await.unwrap();
        assert_eq!(
            fx.registration_by_id(&registration.id).await.lines[0].applied_price,
            Money::from_units(100)
        );

        fx.cash_payment_handler()
            .handle(CashPaymentCommand {
                payment_id: recorded.payment.id,
                cashing_date: cashing_date(),
            })
            .await
            .unwrap();

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
    async fn cashing_partial_payment_leaves_memberships_pending() {
        let fx = Fixture::new().await;
        let member = fx.member(None).await;
        let membership = fx.membership(&member).await;
        let recorded = fx
            .record_payment_handler()
            .handle(fx.payment_command(PaymentScope::Member(member.id), 30))
            .await
            .unwrap();

        fx.cash_payment_handler()
            .handle(CashPaymentCommand {
                payment_id: recorded.payment.id,
                cashing_date: cashing_date(),
            })
            .await
            .unwrap();

        assert_eq!(
            fx.membership_by_id(&membership.id).await.status,
            MembershipStatus::Pending
        );
    }

    #[tokio::test]
    async fn cashing_twice_is_a_conflict() {
        let fx = Fixture::new().await;
        let member = fx.member(None).await;
        let recorded = fx
            .record_payment_handler()
            .handle(fx.payment_command(PaymentScope::Member(member.id), 30))
            .await
            .unwrap();
        let cmd = CashPaymentCommand {
            payment_id: recorded.payment.id,
            cashing_date: cashing_date(),
        };
        fx.cash_payment_handler().handle(cmd.clone()).await.unwrap();

        let err = fx.cash_payment_handler().handle(cmd).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[tokio::test]
    async fn unknown_payment_is_not_found() {
        let fx = Fixture::new().await;
        let err = fx
            .cash_payment_handler()
            .handle(CashPaymentCommand {
                payment_id: PaymentId::new(),
                cashing_date: cashing_date(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentNotFound);
    }
}

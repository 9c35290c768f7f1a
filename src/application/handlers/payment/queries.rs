//! Payment queries.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, PaymentId};
use crate::domain::payment::Payment;
use crate::ports::{PaymentFilter, PaymentRepository};

pub struct GetPaymentHandler {
    payments: Arc<dyn PaymentRepository>,
}

impl GetPaymentHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }

    pub async fn handle(&self, id: PaymentId) -> Result<Payment, DomainError> {
        self.payments
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::PaymentNotFound, "Payment not found"))
    }
}

pub struct ListPaymentsHandler {
    payments: Arc<dyn PaymentRepository>,
}

impl ListPaymentsHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }

    pub async fn handle(&self, filter: PaymentFilter) -> Result<Vec<Payment>, DomainError> {
        self.payments.list(&filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::payment::PaymentScope;

    #[tokio::test]
    async fn uncashed_only_lists_open_checks() {
        let fx = Fixture::new().await;
        let member = fx.member(None).await;
        fx.membership(&member).await;
        let first = fx
            .record_payment_handler()
            .handle(fx.payment_command(PaymentScope::Member(member.id), 10))
            .await
            .unwrap();
        fx.record_payment_handler()
            .handle(fx.payment_command(PaymentScope::Member(member.id), 20))
            .await
            .unwrap();
        fx.cash_payment_handler()
            .handle(crate::application::handlers::payment::CashPaymentCommand {
                payment_id: first.payment.id,
                cashing_date: chrono::NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
            })
            .await
            .unwrap();

        let handler = ListPaymentsHandler::new(fx.arc());
        let all = handler
            .handle(PaymentFilter {
                member_id: Some(member.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let open = handler
            .handle(PaymentFilter {
                member_id: Some(member.id),
                uncashed_only: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(open.len(), 1);
        assert_ne!(open[0].id, first.payment.id);
    }
}

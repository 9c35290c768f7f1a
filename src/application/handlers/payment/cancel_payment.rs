//! CancelPaymentHandler - pending to cancelled, no reconciliation.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainError, ErrorCode, PaymentId};
use crate::domain::payment::Payment;
use crate::ports::PaymentRepository;

pub struct CancelPaymentHandler {
    payments: Arc<dyn PaymentRepository>,
}

impl CancelPaymentHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }

    pub async fn handle(&self, payment_id: PaymentId) -> Result<Payment, DomainError> {
        let mut payment = self
            .payments
            .find_by_id(&payment_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::PaymentNotFound, "Payment not found"))?;

        payment.cancel()?;
        self.payments.update_status(&payment, None).await?;

        info!(payment_id = %payment.id, "Payment cancelled");
        Ok(payment)
    }
}

use async_trait::async_trait;

use super::{InMemoryStore, StoreState};
use crate::domain::foundation::{DomainError, ErrorCode, PaymentId, Timestamp};
use crate::domain::payment::Payment;
use crate::domain::settlement::{MembershipStatusUpdate, Reconciliation};
use crate::ports::{PaymentFilter, PaymentRepository};

fn apply_status_update(state: &mut StoreState, update: &MembershipStatusUpdate) {
    let now = Timestamp::now();
    for id in &update.membership_ids {
        if let Some(membership) = state.memberships.get_mut(id) {
            membership.status = update.status;
            membership.updated_at = now;
        }
    }
}

#[async_trait]
impl PaymentRepository for InMemoryStore {
    async fn record(
        &self,
        payment: &Payment,
        reconciliation: Option<&Reconciliation>,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if let Some(reconciliation) = reconciliation {
            let season = state
                .seasons
                .get_mut(&reconciliation.season_id)
                .ok_or_else(|| DomainError::new(ErrorCode::SeasonNotFound, "Season not found"))?;
            if reconciliation.donation.is_positive() {
                season.total_donations += reconciliation.donation;
                season.updated_at = Timestamp::now();
            }
            apply_status_update(&mut state, &reconciliation.status_update);
        }
        state.payments.insert(payment.id, payment.clone());
        Ok(())
    }

    async fn update_status(
        &self,
        payment: &Payment,
        status_update: Option<&MembershipStatusUpdate>,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if !state.payments.contains_key(&payment.id) {
            return Err(DomainError::new(ErrorCode::PaymentNotFound, "Payment not found"));
        }
        state.payments.insert(payment.id, payment.clone());
        if let Some(update) = status_update {
            apply_status_update(&mut state, update);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError> {
        Ok(self.state.read().await.payments.get(id).cloned())
    }

    async fn list(&self, filter: &PaymentFilter) -> Result<Vec<Payment>, DomainError> {
        let state = self.state.read().await;
        let mut payments: Vec<Payment> = state
            .payments
            .values()
            .filter(|p| filter.family_id.map_or(true, |id| p.scope.family_id() == Some(id)))
            .filter(|p| filter.member_id.map_or(true, |id| p.scope.member_id() == Some(id)))
            .filter(|p| {
                filter
                    .show_client_id
                    .map_or(true, |id| p.scope.show_client_id() == Some(id))
            })
            .filter(|p| filter.season_id.map_or(true, |id| p.season_id == Some(id)))
            .filter(|p| filter.status.map_or(true, |s| p.status == s))
            .filter(|p| !filter.uncashed_only || p.is_uncashed_check())
            .cloned()
            .collect();
        payments.sort_by(|a, b| b.payment_date.cmp(&a.payment_date));
        Ok(payments)
    }
}

//! Payment repository port.
//!
//! Recording and cashing a payment each write several rows (payment,
//! season donations, membership statuses); implementations perform each
//! call in a single transaction.

use crate::domain::foundation::{DomainError, FamilyId, MemberId, PaymentId, SeasonId, ShowClientId};
use crate::domain::payment::{Payment, PaymentStatus};
use crate::domain::settlement::{MembershipStatusUpdate, Reconciliation};
use async_trait::async_trait;

/// Filters for listing payments.
#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    pub family_id: Option<FamilyId>,
    pub member_id: Option<MemberId>,
    pub show_client_id: Option<ShowClientId>,
    pub season_id: Option<SeasonId>,
    pub status: Option<PaymentStatus>,
    /// Only checks not yet cashed.
    pub uncashed_only: bool,
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Insert a new payment and apply its reconciliation atomically.
    ///
    /// With a reconciliation, the season's `total_donations` is incremented
    /// by `donation` (when positive) and the listed memberships get the
    /// new status.
    async fn record(
        &self,
        payment: &Payment,
        reconciliation: Option<&Reconciliation>,
    ) -> Result<(), DomainError>;

    /// Persist a payment's status change (cash-in or cancellation) and
    /// apply the membership status update, atomically.
    ///
    /// # Errors
    ///
    /// - `PaymentNotFound` if the payment doesn't exist
    async fn update_status(
        &self,
        payment: &Payment,
        status_update: Option<&MembershipStatusUpdate>,
    ) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError>;

    /// Payments matching the filter, newest payment date first.
    async fn list(&self, filter: &PaymentFilter) -> Result<Vec<Payment>, DomainError>;
}

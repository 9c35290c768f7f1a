//! Settlement reader port (read side).
//!
//! Loads everything owed and paid within a family or member scope so the
//! domain can compute dues, balance and membership status.

use crate::domain::foundation::{DomainError, SeasonId};
use crate::domain::payment::SettlementScope;
use crate::domain::settlement::ScopeLedger;
use async_trait::async_trait;

#[async_trait]
pub trait SettlementReader: Send + Sync {
    /// Load the ledger of `scope`, narrowed to `season_id` when given.
    ///
    /// - Family scope: memberships and registrations of every member of
    ///   the family, payments whose family is the scope.
    /// - Member scope: that member's memberships and registrations,
    ///   payments whose member is the scope.
    ///
    /// Payments of every status are returned; the domain decides which
    /// count.
    ///
    /// # Errors
    ///
    /// - `FamilyNotFound` / `MemberNotFound` if the scope doesn't exist
    async fn load_ledger(
        &self,
        scope: &SettlementScope,
        season_id: Option<&SeasonId>,
    ) -> Result<ScopeLedger, DomainError>;
}

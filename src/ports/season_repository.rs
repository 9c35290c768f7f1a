//! Season repository port.
//!
//! Implementations keep at most one season active: persisting an active
//! season deactivates every other season within the same transaction.

use crate::domain::foundation::{DomainError, SeasonId};
use crate::domain::season::Season;
use async_trait::async_trait;

#[async_trait]
pub trait SeasonRepository: Send + Sync {
    /// Insert a new season.
    ///
    /// If `season.is_active`, all other seasons are deactivated atomically.
    async fn save(&self, season: &Season) -> Result<(), DomainError>;

    /// Update an existing season's writable attributes.
    ///
    /// `total_donations` is not written here; see
    /// [`PaymentRepository::record`](super::PaymentRepository::record).
    ///
    /// # Errors
    ///
    /// - `SeasonNotFound` if the season doesn't exist
    async fn update(&self, season: &Season) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &SeasonId) -> Result<Option<Season>, DomainError>;

    async fn find_active(&self) -> Result<Option<Season>, DomainError>;

    /// All seasons, newest start year first.
    async fn list(&self) -> Result<Vec<Season>, DomainError>;

    /// Make `id` the only active season and return it.
    ///
    /// # Errors
    ///
    /// - `SeasonNotFound` if the season doesn't exist
    async fn activate(&self, id: &SeasonId) -> Result<Season, DomainError>;
}

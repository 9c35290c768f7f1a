//! Workshop and workshop price repository port.

use crate::domain::foundation::{DomainError, SeasonId, WorkshopId};
use crate::domain::workshop::{Workshop, WorkshopPrice};
use async_trait::async_trait;

/// Filters for listing workshops.
#[derive(Debug, Clone, Default)]
pub struct WorkshopFilter {
    pub active_only: bool,
    /// Only workshops that have a price for this season.
    pub priced_for_season: Option<SeasonId>,
}

#[async_trait]
pub trait WorkshopRepository: Send + Sync {
    async fn save(&self, workshop: &Workshop) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `WorkshopNotFound` if the workshop doesn't exist
    async fn update(&self, workshop: &Workshop) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &WorkshopId) -> Result<Option<Workshop>, DomainError>;

    /// Workshops matching the filter, ordered by name.
    async fn list(&self, filter: &WorkshopFilter) -> Result<Vec<Workshop>, DomainError>;

    /// Insert or replace the price of (workshop, season).
    ///
    /// Existing registration lines keep their snapshot prices.
    async fn upsert_price(&self, price: &WorkshopPrice) -> Result<(), DomainError>;

    async fn find_price(
        &self,
        workshop_id: &WorkshopId,
        season_id: &SeasonId,
    ) -> Result<Option<WorkshopPrice>, DomainError>;

    /// Every season's price for one workshop.
    async fn prices_for_workshop(
        &self,
        workshop_id: &WorkshopId,
    ) -> Result<Vec<WorkshopPrice>, DomainError>;
}

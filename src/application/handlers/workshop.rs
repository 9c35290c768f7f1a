//! Workshop handlers, including the per-season price table.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainError, ErrorCode, Money, SeasonId, WorkshopId};
use crate::domain::workshop::{Workshop, WorkshopDetails, WorkshopPrice};
use crate::ports::{SeasonRepository, WorkshopFilter, WorkshopRepository};

fn not_found() -> DomainError {
    DomainError::new(ErrorCode::WorkshopNotFound, "Workshop not found")
}

/// A workshop with every season price it has.
#[derive(Debug, Clone)]
pub struct WorkshopWithPrices {
    pub workshop: Workshop,
    pub prices: Vec<WorkshopPrice>,
}

#[derive(Debug, Clone)]
pub struct SetWorkshopPriceCommand {
    pub workshop_id: WorkshopId,
    pub season_id: SeasonId,
    pub amount: Money,
}

pub struct WorkshopHandlers {
    workshops: Arc<dyn WorkshopRepository>,
    seasons: Arc<dyn SeasonRepository>,
}

impl WorkshopHandlers {
    pub fn new(workshops: Arc<dyn WorkshopRepository>, seasons: Arc<dyn SeasonRepository>) -> Self {
        Self { workshops, seasons }
    }

    pub async fn create(&self, details: WorkshopDetails) -> Result<Workshop, DomainError> {
        let workshop = Workshop::create(details)?;
        self.workshops.save(&workshop).await?;
        info!(workshop_id = %workshop.id, name = %workshop.name, "Workshop created");
        Ok(workshop)
    }

    pub async fn update(
        &self,
        id: WorkshopId,
        details: WorkshopDetails,
    ) -> Result<Workshop, DomainError> {
        let mut workshop = self
            .workshops
            .find_by_id(&id)
            .await?
            .ok_or_else(not_found)?;
        workshop.update(details)?;
        self.workshops.update(&workshop).await?;
        info!(workshop_id = %workshop.id, "Workshop updated");
        Ok(workshop)
    }

    /// Inserts or replaces the price for a season.
    ///
    /// Stored registration lines keep their snapshot.
    pub async fn set_price(&self, cmd: SetWorkshopPriceCommand) -> Result<WorkshopPrice, DomainError> {
        if self.workshops.find_by_id(&cmd.workshop_id).await?.is_none() {
            return Err(not_found());
        }
        if self.seasons.find_by_id(&cmd.season_id).await?.is_none() {
            return Err(DomainError::new(ErrorCode::SeasonNotFound, "Season not found"));
        }
        let price = WorkshopPrice::new(cmd.workshop_id, cmd.season_id, cmd.amount)?;
        self.workshops.upsert_price(&price).await?;
        info!(
            workshop_id = %price.workshop_id,
            season_id = %price.season_id,
            amount = %price.amount,
            "Workshop price set"
        );
        Ok(price)
    }

    pub async fn get(&self, id: WorkshopId) -> Result<WorkshopWithPrices, DomainError> {
        let workshop = self
            .workshops
            .find_by_id(&id)
            .await?
            .ok_or_else(not_found)?;
        let prices = self.workshops.prices_for_workshop(&id).await?;
        Ok(WorkshopWithPrices { workshop, prices })
    }

    /// With a season, only active workshops priced for that season.
    pub async fn list(
        &self,
        active_only: bool,
        season_id: Option<SeasonId>,
    ) -> Result<Vec<Workshop>, DomainError> {
        let filter = WorkshopFilter {
            active_only: active_only || season_id.is_some(),
            priced_for_season: season_id,
        };
        self.workshops.list(&filter).await
    }
}

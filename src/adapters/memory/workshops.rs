use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::foundation::{DomainError, ErrorCode, SeasonId, WorkshopId};
use crate::domain::workshop::{Workshop, WorkshopPrice};
use crate::ports::{WorkshopFilter, WorkshopRepository};

#[async_trait]
impl WorkshopRepository for InMemoryStore {
    async fn save(&self, workshop: &Workshop) -> Result<(), DomainError> {
        self.state
            .write()
            .await
            .workshops
            .insert(workshop.id, workshop.clone());
        Ok(())
    }

    async fn update(&self, workshop: &Workshop) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match state.workshops.get_mut(&workshop.id) {
            Some(stored) => {
                *stored = workshop.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::WorkshopNotFound, "Workshop not found")),
        }
    }

    async fn find_by_id(&self, id: &WorkshopId) -> Result<Option<Workshop>, DomainError> {
        Ok(self.state.read().await.workshops.get(id).cloned())
    }

    async fn list(&self, filter: &WorkshopFilter) -> Result<Vec<Workshop>, DomainError> {
        let state = self.state.read().await;
        let mut workshops: Vec<Workshop> = state
            .workshops
            .values()
            .filter(|w| !filter.active_only || w.is_active)
            .filter(|w| {
                filter
                    .priced_for_season
                    .map_or(true, |season| state.prices.contains_key(&(w.id, season)))
            })
            .cloned()
            .collect();
        workshops.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(workshops)
    }

    async fn upsert_price(&self, price: &WorkshopPrice) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if !state.workshops.contains_key(&price.workshop_id) {
            return Err(DomainError::new(ErrorCode::WorkshopNotFound, "Workshop not found"));
        }
        state
            .prices
            .insert((price.workshop_id, price.season_id), price.clone());
        Ok(())
    }

    async fn find_price(
        &self,
        workshop_id: &WorkshopId,
        season_id: &SeasonId,
    ) -> Result<Option<WorkshopPrice>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .prices
            .get(&(*workshop_id, *season_id))
            .cloned())
    }

    async fn prices_for_workshop(
        &self,
        workshop_id: &WorkshopId,
    ) -> Result<Vec<WorkshopPrice>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .prices
            .values()
            .filter(|p| &p.workshop_id == workshop_id)
            .cloned()
            .collect())
    }
}

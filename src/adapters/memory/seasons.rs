use async_trait::async_trait;

use super::{InMemoryStore, StoreState};
use crate::domain::foundation::{DomainError, ErrorCode, SeasonId, Timestamp};
use crate::domain::season::Season;
use crate::ports::SeasonRepository;

fn deactivate_others(state: &mut StoreState, keep: &SeasonId) {
    for season in state.seasons.values_mut() {
        if &season.id != keep && season.is_active {
            season.is_active = false;
            season.updated_at = Timestamp::now();
        }
    }
}

#[async_trait]
impl SeasonRepository for InMemoryStore {
    async fn save(&self, season: &Season) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if season.is_active {
            deactivate_others(&mut state, &season.id);
        }
        state.seasons.insert(season.id, season.clone());
        Ok(())
    }

    async fn update(&self, season: &Season) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let donations = match state.seasons.get(&season.id) {
            Some(existing) => existing.total_donations,
            None => return Err(DomainError::new(ErrorCode::SeasonNotFound, "Season not found")),
        };
        if season.is_active {
            deactivate_others(&mut state, &season.id);
        }
        let mut stored = season.clone();
        stored.total_donations = donations;
        state.seasons.insert(season.id, stored);
        Ok(())
    }

    async fn find_by_id(&self, id: &SeasonId) -> Result<Option<Season>, DomainError> {
        Ok(self.state.read().await.seasons.get(id).cloned())
    }

    async fn find_active(&self) -> Result<Option<Season>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .seasons
            .values()
            .find(|s| s.is_active)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Season>, DomainError> {
        let mut seasons: Vec<Season> = self.state.read().await.seasons.values().cloned().collect();
        seasons.sort_by(|a, b| b.start_year.cmp(&a.start_year));
        Ok(seasons)
    }

    async fn activate(&self, id: &SeasonId) -> Result<Season, DomainError> {
        let mut state = self.state.write().await;
        if !state.seasons.contains_key(id) {
            return Err(DomainError::new(ErrorCode::SeasonNotFound, "Season not found"));
        }
        deactivate_others(&mut state, id);
        let season = state
            .seasons
            .get_mut(id)
            .ok_or_else(|| DomainError::new(ErrorCode::SeasonNotFound, "Season not found"))?;
        season.activate();
        Ok(season.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::season::test_support::season_details;

    #[tokio::test]
    async fn saving_active_season_deactivates_others() {
        let store = InMemoryStore::new();
        let first = Season::create(season_details(10)).unwrap();
        let second = Season::create(season_details(5)).unwrap();
        store.save(&first).await.unwrap();
        store.save(&second).await.unwrap();

        let active = store.find_active().await.unwrap().unwrap();
        assert_eq!(active.id, second.id);
        assert!(!store.find_by_id(&first.id).await.unwrap().unwrap().is_active);
    }

    #[tokio::test]
    async fn activate_switches_active_season() {
        let store = InMemoryStore::new();
        let first = Season::create(season_details(10)).unwrap();
        let second = Season::create(season_details(5)).unwrap();
        store.save(&first).await.unwrap();
        store.save(&second).await.unwrap();

        store.activate(&first.id).await.unwrap();

        let seasons = store.list().await.unwrap();
        assert_eq!(seasons.iter().filter(|s| s.is_active).count(), 1);
        assert_eq!(store.find_active().await.unwrap().unwrap().id, first.id);
    }

    #[tokio::test]
    async fn activate_unknown_season_is_not_found() {
        let store = InMemoryStore::new();
        let err = store.activate(&SeasonId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SeasonNotFound);
    }
}

//! Season handlers.
//!
//! At most one season is active; saving an active season or activating one
//! deactivates every other in the same write.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainError, ErrorCode, SeasonId};
use crate::domain::season::{Season, SeasonDetails};
use crate::ports::SeasonRepository;

fn not_found() -> DomainError {
    DomainError::new(ErrorCode::SeasonNotFound, "Season not found")
}

// ════════════════════════════════════════════════════════════════════════════
// Commands
// ════════════════════════════════════════════════════════════════════════════

pub struct CreateSeasonHandler {
    seasons: Arc<dyn SeasonRepository>,
}

impl CreateSeasonHandler {
    pub fn new(seasons: Arc<dyn SeasonRepository>) -> Self {
        Self { seasons }
    }

    pub async fn handle(&self, details: SeasonDetails) -> Result<Season, DomainError> {
        let season = Season::create(details)?;
        self.seasons.save(&season).await?;
        info!(
            season_id = %season.id,
            label = %season.label,
            is_active = season.is_active,
            "Season created"
        );
        Ok(season)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateSeasonCommand {
    pub season_id: SeasonId,
    pub details: SeasonDetails,
}

pub struct UpdateSeasonHandler {
    seasons: Arc<dyn SeasonRepository>,
}

impl UpdateSeasonHandler {
    pub fn new(seasons: Arc<dyn SeasonRepository>) -> Self {
        Self { seasons }
    }

    pub async fn handle(&self, cmd: UpdateSeasonCommand) -> Result<Season, DomainError> {
        let mut season = self
            .seasons
            .find_by_id(&cmd.season_id)
            .await?
            .ok_or_else(not_found)?;
        season.update(cmd.details)?;
        self.seasons.update(&season).await?;
        info!(season_id = %season.id, is_active = season.is_active, "Season updated");
        Ok(season)
    }
}

pub struct ActivateSeasonHandler {
    seasons: Arc<dyn SeasonRepository>,
}

impl ActivateSeasonHandler {
    pub fn new(seasons: Arc<dyn SeasonRepository>) -> Self {
        Self { seasons }
    }

    pub async fn handle(&self, season_id: SeasonId) -> Result<Season, DomainError> {
        let season = self.seasons.activate(&season_id).await?;
        info!(season_id = %season.id, label = %season.label, "Season activated");
        Ok(season)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Queries
// ════════════════════════════════════════════════════════════════════════════

pub struct SeasonQueries {
    seasons: Arc<dyn SeasonRepository>,
}

impl SeasonQueries {
    pub fn new(seasons: Arc<dyn SeasonRepository>) -> Self {
        Self { seasons }
    }

    pub async fn get(&self, id: SeasonId) -> Result<Season, DomainError> {
        self.seasons.find_by_id(&id).await?.ok_or_else(not_found)
    }

    /// The active season; `SeasonNotFound` when none is active.
    pub async fn active(&self) -> Result<Season, DomainError> {
        self.seasons
            .find_active()
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::SeasonNotFound, "No active season"))
    }

    /// Newest first.
    pub async fn list(&self) -> Result<Vec<Season>, DomainError> {
        self.seasons.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::season::test_support::season_details;

    fn details(start_year: i32, is_active: bool) -> SeasonDetails {
        SeasonDetails {
            start_year,
            end_year: start_year + 1,
            label: format!("{}-{}", start_year, start_year + 1),
            is_active,
            ..season_details(10)
        }
    }

    #[tokio::test]
    async fn activating_a_season_deactivates_the_others() {
        let store = Arc::new(InMemoryStore::new());
        let create = CreateSeasonHandler::new(store.clone());
        let first = create.handle(details(2023, true)).await.unwrap();
        let second = create.handle(details(2024, false)).await.unwrap();

        ActivateSeasonHandler::new(store.clone())
            .handle(second.id)
            .await
            .unwrap();

        let queries = SeasonQueries::new(store);
        assert_eq!(queries.active().await.unwrap().id, second.id);
        assert!(!queries.get(first.id).await.unwrap().is_active);
    }

    #[tokio::test]
    async fn creating_an_active_season_deactivates_the_previous_one() {
        let store = Arc::new(InMemoryStore::new());
        let create = CreateSeasonHandler::new(store.clone());
        let first = create.handle(details(2023, true)).await.unwrap();
        let second = create.handle(details(2024, true)).await.unwrap();

        let queries = SeasonQueries::new(store);
        assert!(!queries.get(first.id).await.unwrap().is_active);
        assert!(queries.get(second.id).await.unwrap().is_active);
        let labels: Vec<_> = queries
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.start_year)
            .collect();
        assert_eq!(labels, vec![2024, 2023]);
    }

    #[tokio::test]
    async fn update_of_unknown_season_is_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let err = UpdateSeasonHandler::new(store)
            .handle(UpdateSeasonCommand {
                season_id: SeasonId::new(),
                details: details(2024, false),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SeasonNotFound);
    }

    #[tokio::test]
    async fn no_active_season_is_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let err = SeasonQueries::new(store).active().await.unwrap_err();
        assert!(err.is_not_found());
    }
}

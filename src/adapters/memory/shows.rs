use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::foundation::{DomainError, ErrorCode, ShowClientId, ShowId};
use crate::domain::show::{Show, ShowClient};
use crate::ports::{ShowFilter, ShowRepository};

#[async_trait]
impl ShowRepository for InMemoryStore {
    async fn save_client(&self, client: &ShowClient) -> Result<(), DomainError> {
        self.state
            .write()
            .await
            .show_clients
            .insert(client.id, client.clone());
        Ok(())
    }

    async fn update_client(&self, client: &ShowClient) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match state.show_clients.get_mut(&client.id) {
            Some(stored) => {
                *stored = client.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ShowClientNotFound,
                "Show client not found",
            )),
        }
    }

    async fn find_client(&self, id: &ShowClientId) -> Result<Option<ShowClient>, DomainError> {
        Ok(self.state.read().await.show_clients.get(id).cloned())
    }

    async fn list_clients(&self) -> Result<Vec<ShowClient>, DomainError> {
        let mut clients: Vec<ShowClient> =
            self.state.read().await.show_clients.values().cloned().collect();
        clients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clients)
    }

    async fn save_show(&self, show: &Show) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if !state.show_clients.contains_key(&show.client_id) {
            return Err(DomainError::new(
                ErrorCode::ShowClientNotFound,
                "Show client not found",
            ));
        }
        state.shows.insert(show.id, show.clone());
        Ok(())
    }

    async fn update_show(&self, show: &Show) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match state.shows.get_mut(&show.id) {
            Some(stored) => {
                *stored = show.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::ShowNotFound, "Show not found")),
        }
    }

    async fn find_show(&self, id: &ShowId) -> Result<Option<Show>, DomainError> {
        Ok(self.state.read().await.shows.get(id).cloned())
    }

    async fn list_shows(&self, filter: &ShowFilter) -> Result<Vec<Show>, DomainError> {
        let state = self.state.read().await;
        let mut shows: Vec<Show> = state
            .shows
            .values()
            .filter(|s| filter.status.map_or(true, |status| s.status == status))
            .filter(|s| filter.client_id.map_or(true, |id| s.client_id == id))
            .cloned()
            .collect();
        shows.sort_by(|a, b| b.proposed_date.cmp(&a.proposed_date));
        Ok(shows)
    }
}

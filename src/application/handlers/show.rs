//! Show ledger handlers: clients and their bookings.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::foundation::{DomainError, ErrorCode, ShowClientId, ShowId};
use crate::domain::show::{Show, ShowClient, ShowClientDetails, ShowDetails};
use crate::ports::{ShowFilter, ShowRepository};

fn client_not_found() -> DomainError {
    DomainError::new(ErrorCode::ShowClientNotFound, "Show client not found")
}

fn show_not_found() -> DomainError {
    DomainError::new(ErrorCode::ShowNotFound, "Show not found")
}

pub struct ShowHandlers {
    shows: Arc<dyn ShowRepository>,
}

impl ShowHandlers {
    pub fn new(shows: Arc<dyn ShowRepository>) -> Self {
        Self { shows }
    }

    // ─── Clients ────────────────────────────────────────────────────────────

    pub async fn create_client(&self, details: ShowClientDetails) -> Result<ShowClient, DomainError> {
        let client = ShowClient::create(details)?;
        self.shows.save_client(&client).await?;
        info!(client_id = %client.id, name = %client.name, "Show client created");
        Ok(client)
    }

    pub async fn update_client(
        &self,
        id: ShowClientId,
        details: ShowClientDetails,
    ) -> Result<ShowClient, DomainError> {
        let mut client = self
            .shows
            .find_client(&id)
            .await?
            .ok_or_else(client_not_found)?;
        client.update(details)?;
        self.shows.update_client(&client).await?;
        info!(client_id = %client.id, "Show client updated");
        Ok(client)
    }

    pub async fn get_client(&self, id: ShowClientId) -> Result<ShowClient, DomainError> {
        self.shows.find_client(&id).await?.ok_or_else(client_not_found)
    }

    pub async fn list_clients(&self) -> Result<Vec<ShowClient>, DomainError> {
        self.shows.list_clients().await
    }

    // ─── Shows ──────────────────────────────────────────────────────────────

    pub async fn create_show(&self, details: ShowDetails) -> Result<Show, DomainError> {
        if self.shows.find_client(&details.client_id).await?.is_none() {
            return Err(client_not_found());
        }
        let show = Show::create(details)?;
        self.shows.save_show(&show).await?;
        info!(
            show_id = %show.id,
            client_id = %show.client_id,
            proposed_price = %show.proposed_price,
            "Show created"
        );
        Ok(show)
    }

    pub async fn update_show(&self, id: ShowId, details: ShowDetails) -> Result<Show, DomainError> {
        let mut show = self.shows.find_show(&id).await?.ok_or_else(show_not_found)?;
        if self.shows.find_client(&details.client_id).await?.is_none() {
            return Err(client_not_found());
        }
        show.update(details)?;
        self.shows.update_show(&show).await?;
        info!(show_id = %show.id, status = show.status.as_str(), "Show updated");
        Ok(show)
    }

    pub async fn get_show(&self, id: ShowId) -> Result<Show, DomainError> {
        self.shows.find_show(&id).await?.ok_or_else(show_not_found)
    }

    pub async fn list_shows(&self, filter: ShowFilter) -> Result<Vec<Show>, DomainError> {
        self.shows.list_shows(&filter).await
    }

    /// Shows scheduled on or after `today` and not cancelled, soonest first.
    pub async fn upcoming(&self, today: NaiveDate) -> Result<Vec<Show>, DomainError> {
        let mut shows: Vec<Show> = self
            .shows
            .list_shows(&ShowFilter::default())
            .await?
            .into_iter()
            .filter(|s| s.is_upcoming(today))
            .collect();
        shows.sort_by_key(Show::scheduled_date);
        Ok(shows)
    }
}

//! Show client and show repository port.

use crate::domain::foundation::{DomainError, ShowClientId, ShowId};
use crate::domain::show::{Show, ShowClient, ShowStatus};
use async_trait::async_trait;

/// Filters for listing shows.
#[derive(Debug, Clone, Default)]
pub struct ShowFilter {
    pub status: Option<ShowStatus>,
    pub client_id: Option<ShowClientId>,
}

#[async_trait]
pub trait ShowRepository: Send + Sync {
    async fn save_client(&self, client: &ShowClient) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `ShowClientNotFound` if the client doesn't exist
    async fn update_client(&self, client: &ShowClient) -> Result<(), DomainError>;

    async fn find_client(&self, id: &ShowClientId) -> Result<Option<ShowClient>, DomainError>;

    /// All clients ordered by name.
    async fn list_clients(&self) -> Result<Vec<ShowClient>, DomainError>;

    async fn save_show(&self, show: &Show) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `ShowNotFound` if the show doesn't exist
    async fn update_show(&self, show: &Show) -> Result<(), DomainError>;

    async fn find_show(&self, id: &ShowId) -> Result<Option<Show>, DomainError>;

    /// Shows matching the filter, most recent proposed date first.
    async fn list_shows(&self, filter: &ShowFilter) -> Result<Vec<Show>, DomainError>;
}

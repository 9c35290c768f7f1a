//! Registration repository port.
//!
//! Registrations are persisted together with their workshop lines. A
//! member holds at most one registration per season.

use crate::domain::foundation::{DomainError, MemberId, RegistrationId, SeasonId};
use crate::domain::registration::Registration;
use async_trait::async_trait;

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Insert a registration and all its lines in one transaction.
    ///
    /// # Errors
    ///
    /// - `RegistrationExists` if the member is already registered for the season
    async fn save(&self, registration: &Registration) -> Result<(), DomainError>;

    /// Replace the stored line set and family order with the registration's.
    ///
    /// Old lines are deleted and the new ones inserted in one transaction;
    /// on failure the previous lines remain.
    ///
    /// # Errors
    ///
    /// - `RegistrationNotFound` if the registration doesn't exist
    async fn replace_workshops(&self, registration: &Registration) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `RegistrationNotFound` if the registration doesn't exist
    async fn delete(&self, id: &RegistrationId) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &RegistrationId) -> Result<Option<Registration>, DomainError>;

    async fn find_by_member_and_season(
        &self,
        member_id: &MemberId,
        season_id: &SeasonId,
    ) -> Result<Option<Registration>, DomainError>;

    /// Registrations, optionally for one season, newest first.
    async fn list(&self, season_id: Option<&SeasonId>) -> Result<Vec<Registration>, DomainError>;
}

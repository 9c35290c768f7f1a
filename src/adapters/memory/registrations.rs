use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::foundation::{DomainError, ErrorCode, MemberId, RegistrationId, SeasonId};
use crate::domain::registration::Registration;
use crate::ports::RegistrationRepository;

#[async_trait]
impl RegistrationRepository for InMemoryStore {
    async fn save(&self, registration: &Registration) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let duplicate = state.registrations.values().any(|r| {
            r.member_id == registration.member_id && r.season_id == registration.season_id
        });
        if duplicate {
            return Err(DomainError::new(
                ErrorCode::RegistrationExists,
                "Member is already registered for this season",
            ));
        }
        state
            .registrations
            .insert(registration.id, registration.clone());
        Ok(())
    }

    async fn replace_workshops(&self, registration: &Registration) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match state.registrations.get_mut(&registration.id) {
            Some(stored) => {
                stored.family_order = registration.family_order;
                stored.lines = registration.lines.clone();
                stored.updated_at = registration.updated_at;
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::RegistrationNotFound,
                "Registration not found",
            )),
        }
    }

    async fn delete(&self, id: &RegistrationId) -> Result<(), DomainError> {
        match self.state.write().await.registrations.remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::new(
                ErrorCode::RegistrationNotFound,
                "Registration not found",
            )),
        }
    }

    async fn find_by_id(&self, id: &RegistrationId) -> Result<Option<Registration>, DomainError> {
        Ok(self.state.read().await.registrations.get(id).cloned())
    }

    async fn find_by_member_and_season(
        &self,
        member_id: &MemberId,
        season_id: &SeasonId,
    ) -> Result<Option<Registration>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .registrations
            .values()
            .find(|r| &r.member_id == member_id && &r.season_id == season_id)
            .cloned())
    }

    async fn list(&self, season_id: Option<&SeasonId>) -> Result<Vec<Registration>, DomainError> {
        let state = self.state.read().await;
        let mut registrations: Vec<Registration> = state
            .registrations
            .values()
            .filter(|r| season_id.map_or(true, |s| &r.season_id == s))
            .cloned()
            .collect();
        registrations.sort_by(|a, b| b.registration_date.cmp(&a.registration_date));
        Ok(registrations)
    }
}

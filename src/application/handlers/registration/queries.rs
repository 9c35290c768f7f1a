//! Registration queries and deletion.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainError, ErrorCode, RegistrationId, SeasonId};
use crate::domain::registration::Registration;
use crate::ports::RegistrationRepository;

fn not_found() -> DomainError {
    DomainError::new(ErrorCode::RegistrationNotFound, "Registration not found")
}

pub struct GetRegistrationHandler {
    registrations: Arc<dyn RegistrationRepository>,
}

impl GetRegistrationHandler {
    pub fn new(registrations: Arc<dyn RegistrationRepository>) -> Self {
        Self { registrations }
    }

    pub async fn handle(&self, id: RegistrationId) -> Result<Registration, DomainError> {
        self.registrations
            .find_by_id(&id)
            .await?
            .ok_or_else(not_found)
    }
}

pub struct ListRegistrationsHandler {
    registrations: Arc<dyn RegistrationRepository>,
}

impl ListRegistrationsHandler {
    pub fn new(registrations: Arc<dyn RegistrationRepository>) -> Self {
        Self { registrations }
    }

    pub async fn handle(&self, season_id: Option<SeasonId>) -> Result<Vec<Registration>, DomainError> {
        self.registrations.list(season_id.as_ref()).await
    }
}

pub struct DeleteRegistrationHandler {
    registrations: Arc<dyn RegistrationRepository>,
}

impl DeleteRegistrationHandler {
    pub fn new(registrations: Arc<dyn RegistrationRepository>) -> Self {
        Self { registrations }
    }

    pub async fn handle(&self, id: RegistrationId) -> Result<(), DomainError> {
        self.registrations.delete(&id).await?;
        info!(registration_id = %id, "Registration deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;

    #[tokio::test]
    async fn deleted_registration_is_gone() {
        let fx = Fixture::new().await;
        let member = fx.member(None).await;
        let registration = fx.registration(&member, &[]).await;

        DeleteRegistrationHandler::new(fx.arc())
            .handle(registration.id)
            .await
            .unwrap();

        let err = GetRegistrationHandler::new(fx.arc())
            .handle(registration.id)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RegistrationNotFound);
    }

    #[tokio::test]
    async fn list_filters_by_season() {
        let fx = Fixture::new().await;
        let member = fx.member(None).await;
        fx.registration(&member, &[]).await;

        let handler = ListRegistrationsHandler::new(fx.arc());
        assert_eq!(handler.handle(Some(fx.season.id)).await.unwrap().len(), 1);
        assert!(handler.handle(Some(SeasonId::new())).await.unwrap().is_empty());
    }
}

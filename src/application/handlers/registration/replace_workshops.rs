//! ReplaceWorkshopsHandler - full replacement of a registration's workshop set.

use std::sync::Arc;

use tracing::info;

use super::{RegistrationPricer, WorkshopQuantity};
use crate::domain::foundation::{DomainError, ErrorCode, RegistrationId};
use crate::domain::registration::{FamilyOrder, Registration};
use crate::ports::{RegistrationRepository, SeasonRepository};

#[derive(Debug, Clone)]
pub struct ReplaceWorkshopsCommand {
    pub registration_id: RegistrationId,
    pub workshops: Vec<WorkshopQuantity>,
    pub family_order: Option<FamilyOrder>,
}

pub struct ReplaceWorkshopsHandler {
    registrations: Arc<dyn RegistrationRepository>,
    seasons: Arc<dyn SeasonRepository>,
    pricer: RegistrationPricer,
}

impl ReplaceWorkshopsHandler {
    pub fn new(
        registrations: Arc<dyn RegistrationRepository>,
        seasons: Arc<dyn SeasonRepository>,
        pricer: RegistrationPricer,
    ) -> Self {
        Self {
            registrations,
            seasons,
            pricer,
        }
    }

    pub async fn handle(&self, cmd: ReplaceWorkshopsCommand) -> Result<Registration, DomainError> {
        let mut registration = self
            .registrations
            .find_by_id(&cmd.registration_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::RegistrationNotFound, "Registration not found")
            })?;
        let season = self
            .seasons
            .find_by_id(&registration.season_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::SeasonNotFound, "Season not found"))?;

        // Lines are priced with the family order being written
        let family_order = cmd.family_order.unwrap_or(registration.family_order);
        let context = self
            .pricer
            .context(&registration.member_id, &season, family_order)
            .await?;
        let lines = self
            .pricer
            .price_lines(&context, &season.id, &cmd.workshops)
            .await?;

        registration.replace_lines(lines, cmd.family_order)?;
        self.registrations.replace_workshops(&registration).await?;

        info!(
            registration_id = %registration.id,
            lines = registration.lines.len(),
            family_order = registration.family_order.value(),
            total = %registration.total_amount(),
            "Registration workshops replaced"
        );

        Ok(registration)
    }
}

//! RegistrationRepricer - recomputes a registration after its member's
//! membership changed.
//!
//! Stored lines are snapshots; this is the explicit recompute that brings
//! them back in line with the current price table and discount eligibility.

use std::sync::Arc;

use tracing::info;

use super::RegistrationPricer;
use crate::domain::foundation::{DomainError, ErrorCode, MemberId, SeasonId};
use crate::domain::registration::Registration;
use crate::ports::{RegistrationRepository, SeasonRepository};

#[derive(Clone)]
pub struct RegistrationRepricer {
    registrations: Arc<dyn RegistrationRepository>,
    seasons: Arc<dyn SeasonRepository>,
    pricer: RegistrationPricer,
}

impl RegistrationRepricer {
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

    /// Reprices the member's registration for the season, if there is one.
    pub async fn reprice(
        &self,
        member_id: &MemberId,
        season_id: &SeasonId,
    ) -> Result<Option<Registration>, DomainError> {
        let Some(mut registration) = self
            .registrations
            .find_by_member_and_season(member_id, season_id)
            .await?
        else {
            return Ok(None);
        };
        let season = self
            .seasons
            .find_by_id(season_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::SeasonNotFound, "Season not found"))?;

        let context = self
            .pricer
            .context(member_id, &season, registration.family_order)
            .await?;
        let lines = self
            .pricer
            .reprice_lines(&context, season_id, &registration.lines)
            .await?;
        if lines == registration.lines {
            return Ok(Some(registration));
        }

        registration.replace_lines(lines, None)?;
        self.registrations.replace_workshops(&registration).await?;

        info!(
            registration_id = %registration.id,
            member_id = %member_id,
            total = %registration.total_amount(),
            "Registration repriced"
        );

        Ok(Some(registration))
    }
}

#[cfg(test)]
mod tests {
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::{MemberId, Money};

    #[tokio::test]
    async fn gaining_membership_applies_sibling_discount() {
        let fx = Fixture::new().await;
        let member = fx.member(None).await;
        let workshop = fx.workshop(false, None, 100).await;
        let registration = fx
            .sibling_registration(&member, &[(workshop.id, 1)])
            .await;
        assert_eq!(registration.lines[0].applied_price, Money::from_units(100));

        fx.membership(&member).await;
        let repriced = fx
            .repricer()
            .reprice(&member.id, &fx.season.id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(repriced.lines[0].applied_price, Money::from_units(90));
        assert_eq!(repriced.lines[0].id, registration.lines[0].id);
    }

    #[tokio::test]
    async fn member_without_registration_is_a_no_op() {
        let fx = Fixture::new().await;
        let result = fx
            .repricer()
            .reprice(&MemberId::new(), &fx.season.id)
            .await
            .unwrap();
        assert!(result.is_none());
    }
}

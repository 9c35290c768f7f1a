//! CreateRegistrationHandler - registers a member for a season's workshops.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use super::{RegistrationPricer, WorkshopQuantity};
use crate::domain::foundation::{today, DomainError, ErrorCode, MemberId, SeasonId};
use crate::domain::registration::{FamilyOrder, Registration};
use crate::ports::{MemberRepository, RegistrationRepository, SeasonRepository};

#[derive(Debug, Clone)]
pub struct CreateRegistrationCommand {
    pub member_id: MemberId,
    pub season_id: SeasonId,
    pub workshops: Vec<WorkshopQuantity>,
    pub family_order: FamilyOrder,
    pub registration_date: Option<NaiveDate>,
}

pub struct CreateRegistrationHandler {
    registrations: Arc<dyn RegistrationRepository>,
    members: Arc<dyn MemberRepository>,
    seasons: Arc<dyn SeasonRepository>,
    pricer: RegistrationPricer,
}

impl CreateRegistrationHandler {
    pub fn new(
        registrations: Arc<dyn RegistrationRepository>,
        members: Arc<dyn MemberRepository>,
        seasons: Arc<dyn SeasonRepository>,
        pricer: RegistrationPricer,
    ) -> Self {
        Self {
            registrations,
            members,
            seasons,
            pricer,
        }
    }

    pub async fn handle(&self, cmd: CreateRegistrationCommand) -> Result<Registration, DomainError> {
        // 1. Member and season must exist
        if self.members.find_by_id(&cmd.member_id).await?.is_none() {
            return Err(DomainError::new(ErrorCode::MemberNotFound, "Member not found"));
        }
        let season = self
            .seasons
            .find_by_id(&cmd.season_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::SeasonNotFound, "Season not found"))?;

        // 2. One registration per member and season
        if self
            .registrations
            .find_by_member_and_season(&cmd.member_id, &cmd.season_id)
            .await?
            .is_some()
        {
            return Err(DomainError::new(
                ErrorCode::RegistrationExists,
                "Member is already registered for this season",
            ));
        }

        // 3. Price every line before writing anything
        let context = self
            .pricer
            .context(&cmd.member_id, &season, cmd.family_order)
            .await?;
        let lines = self
            .pricer
            .price_lines(&context, &season.id, &cmd.workshops)
            .await?;

        // 4. Persist registration with its lines
        let registration = Registration::create(
            cmd.member_id,
            cmd.season_id,
            cmd.family_order,
            cmd.registration_date.unwrap_or_else(today),
            lines,
        )?;
        self.registrations.save(&registration).await?;

        info!(
            registration_id = %registration.id,
            member_id = %registration.member_id,
            season_id = %registration.season_id,
            family_order = registration.family_order.value(),
            total = %registration.total_amount(),
            "Registration created"
        );

        Ok(registration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::{Money, WorkshopId};

    #[tokio::test]
    async fn sibling_with_pending_membership_gets_discount() {
        let fx = Fixture::new().await;
        let member = fx.member(None).await;
        let workshop = fx.workshop(false, None, 100).await;
        fx.membership(&member).await;

        let registration = fx
            .create_registration_handler()
            .handle(CreateRegistrationCommand {
                member_id: member.id,
                season_id: fx.season.id,
                workshops: vec![WorkshopQuantity {
                    workshop_id: workshop.id,
                    quantity: 1,
                }],
                family_order: FamilyOrder::try_new(2).unwrap(),
                registration_date: None,
            })
            .await
            .unwrap();

        assert_eq!(registration.lines[0].applied_price, Money::from_units(90));
        assert_eq!(registration.lines[0].discount_percent.value(), 10);
    }

    #[tokio::test]
    async fn sibling_without_membership_pays_full_price() {
        let fx = Fixture::new().await;
        let member = fx.member(None).await;
        let workshop = fx.workshop(false, None, 100).await;

        let registration = fx
            .create_registration_handler()
            .handle(CreateRegistrationCommand {
                member_id: member.id,
                season_id: fx.season.id,
                workshops: vec![WorkshopQuantity {
                    workshop_id: workshop.id,
                    quantity: 1,
                }],
                family_order: FamilyOrder::try_new(2).unwrap(),
                registration_date: None,
            })
            .await
            .unwrap();

        assert_eq!(registration.lines[0].applied_price, Money::from_units(100));
        assert!(registration.lines[0].discount_percent.is_zero());
    }

    #[tokio::test]
    async fn quantity_above_max_per_member_is_rejected() {
        let fx = Fixture::new().await;
        let member = fx.member(None).await;
        let workshop = fx.workshop(true, Some(2), 30).await;

        let err = fx
            .create_registration_handler()
            .handle(CreateRegistrationCommand {
                member_id: member.id,
                season_id: fx.season.id,
                workshops: vec![WorkshopQuantity {
                    workshop_id: workshop.id,
                    quantity: 3,
                }],
                family_order: FamilyOrder::FIRST,
                registration_date: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::OutOfRange);
    }

    #[tokio::test]
    async fn unknown_workshop_is_not_found() {
        let fx = Fixture::new().await;
        let member = fx.member(None).await;

        let err = fx
            .create_registration_handler()
            .handle(CreateRegistrationCommand {
                member_id: member.id,
                season_id: fx.season.id,
                workshops: vec![WorkshopQuantity {
                    workshop_id: WorkshopId::new(),
                    quantity: 1,
                }],
                family_order: FamilyOrder::FIRST,
                registration_date: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::WorkshopNotFound);
    }

    #[tokio::test]
    async fn second_registration_for_same_season_conflicts() {
        let fx = Fixture::new().await;
        let member = fx.member(None).await;
        let cmd = CreateRegistrationCommand {
            member_id: member.id,
            season_id: fx.season.id,
            workshops: vec![],
            family_order: FamilyOrder::FIRST,
            registration_date: None,
        };
        fx.create_registration_handler()
            .handle(cmd.clone())
            .await
            .unwrap();

        let err = fx.create_registration_handler().handle(cmd).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RegistrationExists);
    }
}

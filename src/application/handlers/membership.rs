//! Membership handlers.
//!
//! Status is never written here except by explicit cancellation; payments
//! drive it otherwise. Every change reprices the member's registration for
//! the season so sibling discounts follow membership eligibility.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use super::registration::RegistrationRepricer;
use crate::domain::foundation::{today, DomainError, ErrorCode, MemberId, MembershipId, Money, SeasonId};
use crate::domain::membership::Membership;
use crate::ports::{MemberRepository, MembershipFilter, MembershipRepository, SeasonRepository};

fn not_found() -> DomainError {
    DomainError::new(ErrorCode::MembershipNotFound, "Membership not found")
}

#[derive(Debug, Clone)]
pub struct CreateMembershipCommand {
    pub member_id: MemberId,
    pub season_id: SeasonId,
    /// Defaults to the season's membership amount.
    pub amount: Option<Money>,
    pub membership_date: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct UpdateMembershipCommand {
    pub membership_id: MembershipId,
    pub amount: Option<Money>,
    pub membership_date: Option<NaiveDate>,
}

pub struct MembershipHandlers {
    memberships: Arc<dyn MembershipRepository>,
    members: Arc<dyn MemberRepository>,
    seasons: Arc<dyn SeasonRepository>,
    repricer: RegistrationRepricer,
}

impl MembershipHandlers {
    pub fn new(
        memberships: Arc<dyn MembershipRepository>,
        members: Arc<dyn MemberRepository>,
        seasons: Arc<dyn SeasonRepository>,
        repricer: RegistrationRepricer,
    ) -> Self {
        Self {
            memberships,
            members,
            seasons,
            repricer,
        }
    }

    async fn load(&self, id: &MembershipId) -> Result<Membership, DomainError> {
        self.memberships.find_by_id(id).await?.ok_or_else(not_found)
    }

    pub async fn create(&self, cmd: CreateMembershipCommand) -> Result<Membership, DomainError> {
        if self.members.find_by_id(&cmd.member_id).await?.is_none() {
            return Err(DomainError::new(ErrorCode::MemberNotFound, "Member not found"));
        }
        let season = self
            .seasons
            .find_by_id(&cmd.season_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::SeasonNotFound, "Season not found"))?;

        let membership = Membership::create(
            cmd.member_id,
            cmd.season_id,
            cmd.amount.unwrap_or(season.membership_amount),
            cmd.membership_date.unwrap_or_else(today),
        )?;
        self.memberships.save(&membership).await?;
        info!(
            membership_id = %membership.id,
            member_id = %membership.member_id,
            season_id = %membership.season_id,
            amount = %membership.amount,
            "Membership created"
        );

        self.repricer
            .reprice(&membership.member_id, &membership.season_id)
            .await?;
        Ok(membership)
    }

    pub async fn update(&self, cmd: UpdateMembershipCommand) -> Result<Membership, DomainError> {
        let mut membership = self.load(&cmd.membership_id).await?;
        membership.update(cmd.amount, cmd.membership_date)?;
        self.memberships.update(&membership).await?;
        info!(
            membership_id = %membership.id,
            amount = %membership.amount,
            "Membership updated"
        );

        self.repricer
            .reprice(&membership.member_id, &membership.season_id)
            .await?;
        Ok(membership)
    }

    pub async fn cancel(&self, id: MembershipId) -> Result<Membership, DomainError> {
        let mut membership = self.load(&id).await?;
        membership.cancel()?;
        self.memberships.update(&membership).await?;
        info!(membership_id = %membership.id, "Membership cancelled");

        self.repricer
            .reprice(&membership.member_id, &membership.season_id)
            .await?;
        Ok(membership)
    }

    pub async fn delete(&self, id: MembershipId) -> Result<(), DomainError> {
        let membership = self.load(&id).await?;
        self.memberships.delete(&id).await?;
        info!(membership_id = %id, "Membership deleted");

        self.repricer
            .reprice(&membership.member_id, &membership.season_id)
            .await?;
        Ok(())
    }

    pub async fn get(&self, id: MembershipId) -> Result<Membership, DomainError> {
        self.load(&id).await
    }

    pub async fn list(&self, filter: MembershipFilter) -> Result<Vec<Membership>, DomainError> {
        self.memberships.list(&filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::membership::MembershipStatus;

    fn create_cmd(fx: &Fixture, member_id: MemberId) -> CreateMembershipCommand {
        CreateMembershipCommand {
            member_id,
            season_id: fx.season.id,
            amount: None,
            membership_date: None,
        }
    }

    #[tokio::test]
    async fn amount_defaults_to_season_fee() {
        let fx = Fixture::new().await;
        let member = fx.member(None).await;
        let membership = fx
            .membership_handlers()
            .create(create_cmd(&fx, member.id))
            .await
            .unwrap();
        assert_eq!(membership.amount, fx.season.membership_amount);
        assert_eq!(membership.status, MembershipStatus::Pending);
    }

    #[tokio::test]
    async fn duplicate_membership_conflicts() {
        let fx = Fixture::new().await;
        let member = fx.member(None).await;
        let handlers = fx.membership_handlers();
        handlers.create(create_cmd(&fx, member.id)).await.unwrap();
        let err = handlers.create(create_cmd(&fx, member.id)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MembershipExists);
    }

    #[tokio::test]
    async fn membership_changes_reprice_sibling_registration() {
        let fx = Fixture::new().await;
        let member = fx.member(None).await;
        let workshop = fx.workshop(false, None, 100).await;
        let registration = fx
            .sibling_registration(&member, &[(workshop.id, 1)])
            .await;
        let handlers = fx.membership_handlers();

        let membership = handlers.create(create_cmd(&fx, member.id)).await.unwrap();
        let discounted = fx.registration_by_id(&registration.id).await;
        assert_eq!(discounted.lines[0].applied_price, Money::from_units(90));

        handlers.cancel(membership.id).await.unwrap();
        let full_price = fx.registration_by_id(&registration.id).await;
        assert_eq!(full_price.lines[0].applied_price, Money::from_units(100));
    }

    #[tokio::test]
    async fn deleting_membership_removes_discount() {
        let fx = Fixture::new().await;
        let member = fx.member(None).await;
        let workshop = fx.workshop(false, None, 100).await;
        let membership = fx.membership(&member).await;
        let registration = fx
            .sibling_registration(&member, &[(workshop.id, 1)])
            .await;
        assert_eq!(registration.lines[0].applied_price, Money::from_units(90));

        fx.membership_handlers().delete(membership.id).await.unwrap();

        let stored = fx.registration_by_id(&registration.id).await;
        assert_eq!(stored.lines[0].applied_price, Money::from_units(100));
        assert!(fx.membership_handlers().get(membership.id).await.is_err());
    }

    #[tokio::test]
    async fn cancelling_twice_is_a_conflict() {
        let fx = Fixture::new().await;
        let member = fx.member(None).await;
        let membership = fx.membership(&member).await;
        let handlers = fx.membership_handlers();
        handlers.cancel(membership.id).await.unwrap();
        let err = handlers.cancel(membership.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }
}

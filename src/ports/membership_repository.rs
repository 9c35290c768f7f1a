//! Membership repository port.
//!
//! A member holds at most one membership per season.

use crate::domain::foundation::{DomainError, MemberId, MembershipId, SeasonId};
use crate::domain::membership::Membership;
use async_trait::async_trait;

/// Filters for listing memberships.
#[derive(Debug, Clone, Default)]
pub struct MembershipFilter {
    pub member_id: Option<MemberId>,
    pub season_id: Option<SeasonId>,
}

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Save a new membership.
    ///
    /// # Errors
    ///
    /// - `MembershipExists` if the member already has one for the season
    /// - `DatabaseError` on persistence failure
    async fn save(&self, membership: &Membership) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `MembershipNotFound` if the membership doesn't exist
    async fn update(&self, membership: &Membership) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `MembershipNotFound` if the membership doesn't exist
    async fn delete(&self, id: &MembershipId) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError>;

    async fn find_by_member_and_season(
        &self,
        member_id: &MemberId,
        season_id: &SeasonId,
    ) -> Result<Option<Membership>, DomainError>;

    /// Memberships matching the filter, newest membership date first.
    async fn list(&self, filter: &MembershipFilter) -> Result<Vec<Membership>, DomainError>;
}

use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::foundation::{DomainError, ErrorCode, MemberId, MembershipId, SeasonId};
use crate::domain::membership::Membership;
use crate::ports::{MembershipFilter, MembershipRepository};

#[async_trait]
impl MembershipRepository for InMemoryStore {
    async fn save(&self, membership: &Membership) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let duplicate = state.memberships.values().any(|m| {
            m.member_id == membership.member_id && m.season_id == membership.season_id
        });
        if duplicate {
            return Err(DomainError::new(
                ErrorCode::MembershipExists,
                "Member already has a membership for this season",
            ));
        }
        state.memberships.insert(membership.id, membership.clone());
        Ok(())
    }

    async fn update(&self, membership: &Membership) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match state.memberships.get_mut(&membership.id) {
            Some(stored) => {
                *stored = membership.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                "Membership not found",
            )),
        }
    }

    async fn delete(&self, id: &MembershipId) -> Result<(), DomainError> {
        match self.state.write().await.memberships.remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                "Membership not found",
            )),
        }
    }

    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError> {
        Ok(self.state.read().await.memberships.get(id).cloned())
    }

    async fn find_by_member_and_season(
        &self,
        member_id: &MemberId,
        season_id: &SeasonId,
    ) -> Result<Option<Membership>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .memberships
            .values()
            .find(|m| &m.member_id == member_id && &m.season_id == season_id)
            .cloned())
    }

    async fn list(&self, filter: &MembershipFilter) -> Result<Vec<Membership>, DomainError> {
        let state = self.state.read().await;
        let mut memberships: Vec<Membership> = state
            .memberships
            .values()
            .filter(|m| filter.member_id.map_or(true, |id| m.member_id == id))
            .filter(|m| filter.season_id.map_or(true, |id| m.season_id == id))
            .cloned()
            .collect();
        memberships.sort_by(|a, b| b.membership_date.cmp(&a.membership_date));
        Ok(memberships)
    }
}

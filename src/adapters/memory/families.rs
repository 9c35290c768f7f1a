use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::family::{Family, Member};
use crate::domain::foundation::{DomainError, ErrorCode, FamilyId, MemberId};
use crate::ports::{FamilyRepository, MemberFilter, MemberRepository};

#[async_trait]
impl FamilyRepository for InMemoryStore {
    async fn save(&self, family: &Family) -> Result<(), DomainError> {
        self.state
            .write()
            .await
            .families
            .insert(family.id, family.clone());
        Ok(())
    }

    async fn update(&self, family: &Family) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match state.families.get_mut(&family.id) {
            Some(stored) => {
                *stored = family.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::FamilyNotFound, "Family not found")),
        }
    }

    async fn find_by_id(&self, id: &FamilyId) -> Result<Option<Family>, DomainError> {
        Ok(self.state.read().await.families.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Family>, DomainError> {
        let mut families: Vec<Family> =
            self.state.read().await.families.values().cloned().collect();
        families.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(families)
    }
}

#[async_trait]
impl MemberRepository for InMemoryStore {
    async fn save(&self, member: &Member) -> Result<(), DomainError> {
        self.state
            .write()
            .await
            .members
            .insert(member.id, member.clone());
        Ok(())
    }

    async fn update(&self, member: &Member) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match state.members.get_mut(&member.id) {
            Some(stored) => {
                *stored = member.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::MemberNotFound, "Member not found")),
        }
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        Ok(self.state.read().await.members.get(id).cloned())
    }

    async fn list(&self, filter: &MemberFilter) -> Result<Vec<Member>, DomainError> {
        let state = self.state.read().await;
        let mut members: Vec<Member> = state
            .members
            .values()
            .filter(|m| filter.family_id.map_or(true, |f| m.family_id == Some(f)))
            .filter(|m| {
                filter
                    .search
                    .as_deref()
                    .map_or(true, |term| m.matches_search(term))
            })
            .cloned()
            .collect();
        members.sort_by(|a, b| {
            (a.last_name.as_str(), a.first_name.as_str())
                .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
        });
        Ok(members)
    }
}

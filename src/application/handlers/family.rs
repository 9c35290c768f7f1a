//! Family and member handlers.

use std::sync::Arc;

use tracing::info;

use crate::domain::family::{Family, FamilyDetails, Member, MemberDetails};
use crate::domain::foundation::{DomainError, ErrorCode, FamilyId, MemberId};
use crate::ports::{FamilyRepository, MemberFilter, MemberRepository};

fn family_not_found() -> DomainError {
    DomainError::new(ErrorCode::FamilyNotFound, "Family not found")
}

fn member_not_found() -> DomainError {
    DomainError::new(ErrorCode::MemberNotFound, "Member not found")
}

/// A family together with its members.
#[derive(Debug, Clone)]
pub struct FamilyWithMembers {
    pub family: Family,
    pub members: Vec<Member>,
}

pub struct FamilyHandlers {
    families: Arc<dyn FamilyRepository>,
    members: Arc<dyn MemberRepository>,
}

impl FamilyHandlers {
    pub fn new(families: Arc<dyn FamilyRepository>, members: Arc<dyn MemberRepository>) -> Self {
        Self { families, members }
    }

    pub async fn create(&self, details: FamilyDetails) -> Result<Family, DomainError> {
        let family = Family::create(details)?;
        self.families.save(&family).await?;
        info!(family_id = %family.id, name = %family.name, "Family created");
        Ok(family)
    }

    pub async fn update(&self, id: FamilyId, details: FamilyDetails) -> Result<Family, DomainError> {
        let mut family = self
            .families
            .find_by_id(&id)
            .await?
            .ok_or_else(family_not_found)?;
        family.update(details)?;
        self.families.update(&family).await?;
        info!(family_id = %family.id, "Family updated");
        Ok(family)
    }

    pub async fn get(&self, id: FamilyId) -> Result<FamilyWithMembers, DomainError> {
        let family = self
            .families
            .find_by_id(&id)
            .await?
            .ok_or_else(family_not_found)?;
        let members = self
            .members
            .list(&MemberFilter {
                family_id: Some(id),
                ..Default::default()
            })
            .await?;
        Ok(FamilyWithMembers { family, members })
    }

    pub async fn list(&self) -> Result<Vec<Family>, DomainError> {
        self.families.list().await
    }
}

pub struct MemberHandlers {
    families: Arc<dyn FamilyRepository>,
    members: Arc<dyn MemberRepository>,
}

impl MemberHandlers {
    pub fn new(families: Arc<dyn FamilyRepository>, members: Arc<dyn MemberRepository>) -> Self {
        Self { families, members }
    }

    async fn ensure_family(&self, family_id: Option<&FamilyId>) -> Result<(), DomainError> {
        if let Some(id) = family_id {
            if self.families.find_by_id(id).await?.is_none() {
                return Err(family_not_found());
            }
        }
        Ok(())
    }

    pub async fn create(&self, details: MemberDetails) -> Result<Member, DomainError> {
        self.ensure_family(details.family_id.as_ref()).await?;
        let member = Member::create(details)?;
        self.members.save(&member).await?;
        info!(
            member_id = %member.id,
            family_id = ?member.family_id,
            is_minor = member.is_minor,
            "Member created"
        );
        Ok(member)
    }

    pub async fn update(&self, id: MemberId, details: MemberDetails) -> Result<Member, DomainError> {
        let mut member = self
            .members
            .find_by_id(&id)
            .await?
            .ok_or_else(member_not_found)?;
        self.ensure_family(details.family_id.as_ref()).await?;
        member.update(details)?;
        self.members.update(&member).await?;
        info!(member_id = %member.id, "Member updated");
        Ok(member)
    }

    pub async fn get(&self, id: MemberId) -> Result<Member, DomainError> {
        self.members
            .find_by_id(&id)
            .await?
            .ok_or_else(member_not_found)
    }

    pub async fn list(&self, filter: MemberFilter) -> Result<Vec<Member>, DomainError> {
        self.members.list(&filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;

    fn member_details(family_id: Option<FamilyId>, first_name: &str) -> MemberDetails {
        MemberDetails {
            family_id,
            first_name: first_name.to_string(),
            last_name: "Martin".to_string(),
            email: None,
            phone: None,
            birth_date: None,
            is_minor: false,
            guardian: None,
        }
    }

    fn handlers() -> (FamilyHandlers, MemberHandlers) {
        let store = Arc::new(InMemoryStore::new());
        (
            FamilyHandlers::new(store.clone(), store.clone()),
            MemberHandlers::new(store.clone(), store),
        )
    }

    #[tokio::test]
    async fn family_view_includes_members() {
        let (families, members) = handlers();
        let family = families
            .create(FamilyDetails {
                name: "Martin".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        members
            .create(member_details(Some(family.id), "Léa"))
            .await
            .unwrap();
        members.create(member_details(None, "Hugo")).await.unwrap();

        let view = families.get(family.id).await.unwrap();
        assert_eq!(view.members.len(), 1);
        assert_eq!(view.members[0].first_name, "Léa");
    }

    #[tokio::test]
    async fn member_with_unknown_family_is_rejected() {
        let (_, members) = handlers();
        let err = members
            .create(member_details(Some(FamilyId::new()), "Léa"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::FamilyNotFound);
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let (_, members) = handlers();
        members.create(member_details(None, "Léa")).await.unwrap();
        members.create(member_details(None, "Hugo")).await.unwrap();

        let found = members
            .list(MemberFilter {
                search: Some("HUG".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first_name, "Hugo");
    }

    #[tokio::test]
    async fn minor_without_guardian_is_rejected() {
        let (_, members) = handlers();
        let mut details = member_details(None, "Léa");
        details.is_minor = true;
        let err = members.create(details).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyField);
    }
}

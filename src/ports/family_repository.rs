//! Family and member repository ports.

use crate::domain::family::{Family, Member};
use crate::domain::foundation::{DomainError, FamilyId, MemberId};
use async_trait::async_trait;

#[async_trait]
pub trait FamilyRepository: Send + Sync {
    async fn save(&self, family: &Family) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `FamilyNotFound` if the family doesn't exist
    async fn update(&self, family: &Family) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &FamilyId) -> Result<Option<Family>, DomainError>;

    /// All families ordered by name.
    async fn list(&self) -> Result<Vec<Family>, DomainError>;
}

/// Filters for listing members.
#[derive(Debug, Clone, Default)]
pub struct MemberFilter {
    /// Case-insensitive match on first name, last name or email.
    pub search: Option<String>,
    pub family_id: Option<FamilyId>,
}

#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn save(&self, member: &Member) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `MemberNotFound` if the member doesn't exist
    async fn update(&self, member: &Member) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError>;

    /// Members matching the filter, ordered by last then first name.
    async fn list(&self, filter: &MemberFilter) -> Result<Vec<Member>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn FamilyRepository) {}
    }

    #[test]
    fn member_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn MemberRepository) {}
    }
}

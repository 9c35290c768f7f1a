//! Who a payment is for.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{FamilyId, MemberId, ShowClientId, ValidationError};

/// The single party a payment is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum PaymentScope {
    Family(FamilyId),
    Member(MemberId),
    ShowClient(ShowClientId),
}

/// Scopes over which dues and payments are settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettlementScope {
    Family(FamilyId),
    Member(MemberId),
}

impl PaymentScope {
    /// Builds a scope from the three optional ids of a request.
    ///
    /// Exactly one id must be present.
    pub fn from_parts(
        family_id: Option<FamilyId>,
        member_id: Option<MemberId>,
        show_client_id: Option<ShowClientId>,
    ) -> Result<Self, ValidationError> {
        match (family_id, member_id, show_client_id) {
            (Some(id), None, None) => Ok(PaymentScope::Family(id)),
            (None, Some(id), None) => Ok(PaymentScope::Member(id)),
            (None, None, Some(id)) => Ok(PaymentScope::ShowClient(id)),
            (None, None, None) => Err(ValidationError::empty_field("family_id|member_id|show_client_id")),
            _ => Err(ValidationError::invalid_format(
                "scope",
                "exactly one of family_id, member_id or show_client_id must be given",
            )),
        }
    }

    /// The settlement scope of a membership-related payment, if any.
    pub fn settlement_scope(&self) -> Option<SettlementScope> {
        match self {
            PaymentScope::Family(id) => Some(SettlementScope::Family(*id)),
            PaymentScope::Member(id) => Some(SettlementScope::Member(*id)),
            PaymentScope::ShowClient(_) => None,
        }
    }

    pub fn family_id(&self) -> Option<FamilyId> {
        match self {
            PaymentScope::Family(id) => Some(*id),
            _ => None,
        }
    }

    pub fn member_id(&self) -> Option<MemberId> {
        match self {
            PaymentScope::Member(id) => Some(*id),
            _ => None,
        }
    }

    pub fn show_client_id(&self) -> Option<ShowClientId> {
        match self {
            PaymentScope::ShowClient(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<SettlementScope> for PaymentScope {
    fn from(scope: SettlementScope) -> Self {
        match scope {
            SettlementScope::Family(id) => PaymentScope::Family(id),
            SettlementScope::Member(id) => PaymentScope::Member(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_id_required() {
        assert!(PaymentScope::from_parts(None, None, None).is_err());
        assert!(PaymentScope::from_parts(Some(FamilyId::new()), Some(MemberId::new()), None).is_err());
        assert!(
            PaymentScope::from_parts(Some(FamilyId::new()), None, Some(ShowClientId::new())).is_err()
        );
    }

    #[test]
    fn single_id_builds_scope() {
        let member = MemberId::new();
        let scope = PaymentScope::from_parts(None, Some(member), None).unwrap();
        assert_eq!(scope, PaymentScope::Member(member));
        assert_eq!(scope.member_id(), Some(member));
        assert_eq!(scope.family_id(), None);
    }

    #[test]
    fn show_client_payments_are_not_settled() {
        let scope = PaymentScope::ShowClient(ShowClientId::new());
        assert!(scope.settlement_scope().is_none());
    }

    #[test]
    fn family_scope_settles_as_family() {
        let family = FamilyId::new();
        assert_eq!(
            PaymentScope::Family(family).settlement_scope(),
            Some(SettlementScope::Family(family))
        );
    }
}

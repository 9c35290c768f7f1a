use async_trait::async_trait;

use super::InMemoryStore;
use crate::domain::foundation::{DomainError, ErrorCode, MemberId, SeasonId};
use crate::domain::payment::{PaymentScope, SettlementScope};
use crate::domain::settlement::ScopeLedger;
use crate::ports::SettlementReader;

#[async_trait]
impl SettlementReader for InMemoryStore {
    async fn load_ledger(
        &self,
        scope: &SettlementScope,
        season_id: Option<&SeasonId>,
    ) -> Result<ScopeLedger, DomainError> {
        let state = self.state.read().await;

        let member_ids: Vec<MemberId> = match scope {
            SettlementScope::Family(family_id) => {
                if !state.families.contains_key(family_id) {
                    return Err(DomainError::new(ErrorCode::FamilyNotFound, "Family not found"));
                }
                state
                    .members
                    .values()
                    .filter(|m| m.family_id == Some(*family_id))
                    .map(|m| m.id)
                    .collect()
            }
            SettlementScope::Member(member_id) => {
                if !state.members.contains_key(member_id) {
                    return Err(DomainError::new(ErrorCode::MemberNotFound, "Member not found"));
                }
                vec![*member_id]
            }
        };

        let in_season = |s: &SeasonId| season_id.map_or(true, |wanted| s == wanted);
        let payment_scope = PaymentScope::from(*scope);

        Ok(ScopeLedger {
            memberships: state
                .memberships
                .values()
                .filter(|m| member_ids.contains(&m.member_id) && in_season(&m.season_id))
                .cloned()
                .collect(),
            registrations: state
                .registrations
                .values()
                .filter(|r| member_ids.contains(&r.member_id) && in_season(&r.season_id))
                .cloned()
                .collect(),
            payments: state
                .payments
                .values()
                .filter(|p| p.scope == payment_scope)
                .filter(|p| season_id.map_or(true, |wanted| p.season_id.as_ref() == Some(wanted)))
                .cloned()
                .collect(),
            member_ids,
        })
    }
}

//! PostgreSQL implementation of SettlementReader.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::membership_repository::{MembershipRow, SELECT_MEMBERSHIP};
use super::payment_repository::{PaymentRow, SELECT_PAYMENT};
use super::registration_repository::{with_lines, RegistrationRow, SELECT_REGISTRATION};
use crate::domain::foundation::{DomainError, ErrorCode, MemberId, SeasonId};
use crate::domain::membership::Membership;
use crate::domain::payment::{Payment, SettlementScope};
use crate::domain::settlement::ScopeLedger;
use crate::ports::SettlementReader;

pub struct PostgresSettlementReader {
    pool: PgPool,
}

impl PostgresSettlementReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn member_ids(&self, scope: &SettlementScope) -> Result<Vec<Uuid>, DomainError> {
        match scope {
            SettlementScope::Family(family_id) => {
                let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM families WHERE id = $1")
                    .bind(family_id.as_uuid())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| DomainError::database("Failed to fetch family", e))?;
                if exists.is_none() {
                    return Err(DomainError::new(ErrorCode::FamilyNotFound, "Family not found"));
                }

                let rows: Vec<(Uuid,)> = sqlx::query_as("SELECT id FROM members WHERE family_id = $1")
                    .bind(family_id.as_uuid())
                    .fetch_all(&self.pool)
                    .await
                    .map_err(|e| DomainError::database("Failed to fetch family members", e))?;
                Ok(rows.into_iter().map(|(id,)| id).collect())
            }
            SettlementScope::Member(member_id) => {
                let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM members WHERE id = $1")
                    .bind(member_id.as_uuid())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| DomainError::database("Failed to fetch member", e))?;
                match exists {
                    Some((id,)) => Ok(vec![id]),
                    None => Err(DomainError::new(ErrorCode::MemberNotFound, "Member not found")),
                }
            }
        }
    }
}

#[async_trait]
impl SettlementReader for PostgresSettlementReader {
    async fn load_ledger(
        &self,
        scope: &SettlementScope,
        season_id: Option<&SeasonId>,
    ) -> Result<ScopeLedger, DomainError> {
        let member_ids = self.member_ids(scope).await?;
        let season = season_id.map(SeasonId::as_uuid);

        let membership_rows: Vec<MembershipRow> = sqlx::query_as(&format!(
            "{SELECT_MEMBERSHIP} WHERE m.member_id = ANY($1) AND ($2::uuid IS NULL OR m.season_id = $2)"
        ))
        .bind(&member_ids)
        .bind(season)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load memberships", e))?;

        let registration_rows: Vec<RegistrationRow> = sqlx::query_as(&format!(
            "{SELECT_REGISTRATION} WHERE r.member_id = ANY($1) AND ($2::uuid IS NULL OR r.season_id = $2)"
        ))
        .bind(&member_ids)
        .bind(season)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load registrations", e))?;

        let scope_column = match scope {
            SettlementScope::Family(_) => "p.family_id",
            SettlementScope::Member(_) => "p.member_id",
        };
        let scope_id = match scope {
            SettlementScope::Family(id) => id.as_uuid(),
            SettlementScope::Member(id) => id.as_uuid(),
        };
        let payment_rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            "{SELECT_PAYMENT} WHERE {scope_column} = $1 AND ($2::uuid IS NULL OR p.season_id = $2)"
        ))
        .bind(scope_id)
        .bind(season)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load payments", e))?;

        Ok(ScopeLedger {
            member_ids: member_ids.into_iter().map(MemberId::from_uuid).collect(),
            memberships: membership_rows
                .into_iter()
                .map(Membership::try_from)
                .collect::<Result<_, _>>()?,
            registrations: with_lines(&self.pool, registration_rows).await?,
            payments: payment_rows
                .into_iter()
                .map(Payment::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

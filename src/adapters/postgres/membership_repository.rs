//! PostgreSQL implementation of MembershipRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::{invalid_column, violates};
use crate::domain::foundation::{
    DomainError, ErrorCode, MemberId, MembershipId, Money, SeasonId, Timestamp,
};
use crate::domain::membership::{Membership, MembershipStatus};
use crate::ports::{MembershipFilter, MembershipRepository};

pub(super) const SELECT_MEMBERSHIP: &str = r#"
    SELECT m.id, m.member_id, m.season_id, m.amount, m.membership_date, m.status,
           m.created_at, m.updated_at
    FROM memberships m
"#;

pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct MembershipRow {
    id: Uuid,
    member_id: Uuid,
    season_id: Uuid,
    amount: Decimal,
    membership_date: NaiveDate,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MembershipRow> for Membership {
    type Error = DomainError;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        let status = MembershipStatus::parse(&row.status)
            .ok_or_else(|| invalid_column("membership status", &row.status))?;
        Ok(Membership {
            id: MembershipId::from_uuid(row.id),
            member_id: MemberId::from_uuid(row.member_id),
            season_id: SeasonId::from_uuid(row.season_id),
            amount: Money::new(row.amount),
            membership_date: row.membership_date,
            status,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn save(&self, membership: &Membership) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO memberships (
                id, member_id, season_id, amount, membership_date, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(membership.id.as_uuid())
        .bind(membership.member_id.as_uuid())
        .bind(membership.season_id.as_uuid())
        .bind(membership.amount.amount())
        .bind(membership.membership_date)
        .bind(membership.status.as_str())
        .bind(membership.created_at.as_datetime())
        .bind(membership.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "memberships_member_id_season_id_key") {
                return DomainError::new(
                    ErrorCode::MembershipExists,
                    "Member already has a membership for this season",
                );
            }
            DomainError::database("Failed to save membership", e)
        })?;

        Ok(())
    }

    async fn update(&self, membership: &Membership) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE memberships SET amount = $2, membership_date = $3, status = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(membership.id.as_uuid())
        .bind(membership.amount.amount())
        .bind(membership.membership_date)
        .bind(membership.status.as_str())
        .bind(membership.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update membership", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                "Membership not found",
            ));
        }
        Ok(())
    }

    async fn delete(&self, id: &MembershipId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM memberships WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete membership", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                "Membership not found",
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError> {
        let row: Option<MembershipRow> =
            sqlx::query_as(&format!("{SELECT_MEMBERSHIP} WHERE m.id = $1"))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to fetch membership", e))?;

        row.map(Membership::try_from).transpose()
    }

    async fn find_by_member_and_season(
        &self,
        member_id: &MemberId,
        season_id: &SeasonId,
    ) -> Result<Option<Membership>, DomainError> {
        let row: Option<MembershipRow> = sqlx::query_as(&format!(
            "{SELECT_MEMBERSHIP} WHERE m.member_id = $1 AND m.season_id = $2"
        ))
        .bind(member_id.as_uuid())
        .bind(season_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch membership", e))?;

        row.map(Membership::try_from).transpose()
    }

    async fn list(&self, filter: &MembershipFilter) -> Result<Vec<Membership>, DomainError> {
        let rows: Vec<MembershipRow> = sqlx::query_as(&format!(
            r#"{SELECT_MEMBERSHIP}
            WHERE ($1::uuid IS NULL OR m.member_id = $1)
              AND ($2::uuid IS NULL OR m.season_id = $2)
            ORDER BY m.membership_date DESC"#
        ))
        .bind(filter.member_id.as_ref().map(MemberId::as_uuid))
        .bind(filter.season_id.as_ref().map(SeasonId::as_uuid))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list memberships", e))?;

        rows.into_iter().map(Membership::try_from).collect()
    }
}

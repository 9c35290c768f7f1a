//! PostgreSQL implementation of RegistrationRepository.
//!
//! Lines live in `workshop_registrations`; a registration and its lines
//! are always written together in one transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::{begin, commit, invalid_column, percentage, to_i32, to_u32, violates};
use crate::domain::foundation::{
    DomainError, ErrorCode, MemberId, Money, RegistrationId, SeasonId, Timestamp, WorkshopId,
    WorkshopRegistrationId,
};
use crate::domain::registration::{FamilyOrder, Registration, WorkshopRegistration};
use crate::ports::RegistrationRepository;

pub(super) const SELECT_REGISTRATION: &str = r#"
    SELECT r.id, r.member_id, r.season_id, r.family_order, r.registration_date,
           r.created_at, r.updated_at
    FROM registrations r
"#;

pub struct PostgresRegistrationRepository {
    pool: PgPool,
}

impl PostgresRegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct RegistrationRow {
    id: Uuid,
    member_id: Uuid,
    season_id: Uuid,
    family_order: i32,
    registration_date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct LineRow {
    id: Uuid,
    registration_id: Uuid,
    workshop_id: Uuid,
    quantity: i32,
    applied_price: Decimal,
    discount_percent: i16,
}

impl TryFrom<LineRow> for WorkshopRegistration {
    type Error = DomainError;

    fn try_from(row: LineRow) -> Result<Self, Self::Error> {
        Ok(WorkshopRegistration {
            id: WorkshopRegistrationId::from_uuid(row.id),
            workshop_id: WorkshopId::from_uuid(row.workshop_id),
            quantity: to_u32("quantity", row.quantity)?,
            applied_price: Money::new(row.applied_price),
            discount_percent: percentage("discount_percent", row.discount_percent)?,
        })
    }
}

fn assemble(row: RegistrationRow, lines: Vec<WorkshopRegistration>) -> Result<Registration, DomainError> {
    let family_order = FamilyOrder::try_new(i64::from(row.family_order))
        .map_err(|_| invalid_column("family_order", row.family_order))?;
    Ok(Registration {
        id: RegistrationId::from_uuid(row.id),
        member_id: MemberId::from_uuid(row.member_id),
        season_id: SeasonId::from_uuid(row.season_id),
        family_order,
        registration_date: row.registration_date,
        lines,
        created_at: Timestamp::from_datetime(row.created_at),
        updated_at: Timestamp::from_datetime(row.updated_at),
    })
}

/// Loads the lines of every row and assembles the registrations.
pub(super) async fn with_lines(
    pool: &PgPool,
    rows: Vec<RegistrationRow>,
) -> Result<Vec<Registration>, DomainError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let line_rows: Vec<LineRow> = sqlx::query_as(
        r#"
        SELECT id, registration_id, workshop_id, quantity, applied_price, discount_percent
        FROM workshop_registrations
        WHERE registration_id = ANY($1)
        ORDER BY registration_id, position
        "#,
    )
    .bind(&ids)
    .fetch_all(pool)
    .await
    .map_err(|e| DomainError::database("Failed to fetch registration lines", e))?;

    let mut lines: HashMap<Uuid, Vec<WorkshopRegistration>> = HashMap::new();
    for row in line_rows {
        let registration_id = row.registration_id;
        lines
            .entry(registration_id)
            .or_default()
            .push(WorkshopRegistration::try_from(row)?);
    }

    rows.into_iter()
        .map(|row| {
            let own = lines.remove(&row.id).unwrap_or_default();
            assemble(row, own)
        })
        .collect()
}

async fn insert_lines(
    tx: &mut Transaction<'_, Postgres>,
    registration: &Registration,
) -> Result<(), DomainError> {
    for (position, line) in registration.lines.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO workshop_registrations (
                id, registration_id, workshop_id, quantity, applied_price, discount_percent, position
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(line.id.as_uuid())
        .bind(registration.id.as_uuid())
        .bind(line.workshop_id.as_uuid())
        .bind(to_i32("quantity", line.quantity)?)
        .bind(line.applied_price.amount())
        .bind(i16::from(line.discount_percent.value()))
        .bind(i32::try_from(position).map_err(|_| {
            DomainError::validation("workshop_quantities", "too many workshop lines")
        })?)
        .execute(&mut **tx)
        .await
        .map_err(|e| DomainError::database("Failed to save registration line", e))?;
    }
    Ok(())
}

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepository {
    async fn save(&self, registration: &Registration) -> Result<(), DomainError> {
        let mut tx = begin(&self.pool).await?;

        sqlx::query(
            r#"
            INSERT INTO registrations (
                id, member_id, season_id, family_order, registration_date, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(registration.id.as_uuid())
        .bind(registration.member_id.as_uuid())
        .bind(registration.season_id.as_uuid())
        .bind(to_i32("family_order", registration.family_order.value())?)
        .bind(registration.registration_date)
        .bind(registration.created_at.as_datetime())
        .bind(registration.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if violates(&e, "registrations_member_id_season_id_key") {
                return DomainError::new(
                    ErrorCode::RegistrationExists,
                    "Member is already registered for this season",
                );
            }
            DomainError::database("Failed to save registration", e)
        })?;

        insert_lines(&mut tx, registration).await?;
        commit(tx).await
    }

    async fn replace_workshops(&self, registration: &Registration) -> Result<(), DomainError> {
        let mut tx = begin(&self.pool).await?;

        let result = sqlx::query(
            "UPDATE registrations SET family_order = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(registration.id.as_uuid())
        .bind(to_i32("family_order", registration.family_order.value())?)
        .bind(registration.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to update registration", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::RegistrationNotFound,
                "Registration not found",
            ));
        }

        sqlx::query("DELETE FROM workshop_registrations WHERE registration_id = $1")
            .bind(registration.id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to clear registration lines", e))?;

        insert_lines(&mut tx, registration).await?;
        commit(tx).await
    }

    async fn delete(&self, id: &RegistrationId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete registration", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::RegistrationNotFound,
                "Registration not found",
            ));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &RegistrationId) -> Result<Option<Registration>, DomainError> {
        let rows: Vec<RegistrationRow> =
            sqlx::query_as(&format!("{SELECT_REGISTRATION} WHERE r.id = $1"))
                .bind(id.as_uuid())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to fetch registration", e))?;

        Ok(with_lines(&self.pool, rows).await?.into_iter().next())
    }

    async fn find_by_member_and_season(
        &self,
        member_id: &MemberId,
        season_id: &SeasonId,
    ) -> Result<Option<Registration>, DomainError> {
        let rows: Vec<RegistrationRow> = sqlx::query_as(&format!(
            "{SELECT_REGISTRATION} WHERE r.member_id = $1 AND r.season_id = $2"
        ))
        .bind(member_id.as_uuid())
        .bind(season_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch registration", e))?;

        Ok(with_lines(&self.pool, rows).await?.into_iter().next())
    }

    async fn list(&self, season_id: Option<&SeasonId>) -> Result<Vec<Registration>, DomainError> {
        let rows: Vec<RegistrationRow> = sqlx::query_as(&format!(
            r#"{SELECT_REGISTRATION}
            WHERE ($1::uuid IS NULL OR r.season_id = $1)
            ORDER BY r.registration_date DESC"#
        ))
        .bind(season_id.map(SeasonId::as_uuid))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list registrations", e))?;

        with_lines(&self.pool, rows).await
    }
}

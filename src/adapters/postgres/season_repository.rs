//! PostgreSQL implementation of SeasonRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use super::{begin, commit, percentage};
use crate::domain::foundation::{DomainError, ErrorCode, Money, SeasonId, Timestamp};
use crate::domain::season::Season;
use crate::ports::SeasonRepository;

const SELECT_SEASON: &str = r#"
    SELECT id, start_year, end_year, label, membership_amount, discount_percent,
           is_active, total_donations, created_at, updated_at
    FROM seasons
"#;

pub struct PostgresSeasonRepository {
    pool: PgPool,
}

impl PostgresSeasonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SeasonRow {
    id: Uuid,
    start_year: i32,
    end_year: i32,
    label: String,
    membership_amount: Decimal,
    discount_percent: i16,
    is_active: bool,
    total_donations: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SeasonRow> for Season {
    type Error = DomainError;

    fn try_from(row: SeasonRow) -> Result<Self, Self::Error> {
        Ok(Season {
            id: SeasonId::from_uuid(row.id),
            start_year: row.start_year,
            end_year: row.end_year,
            label: row.label,
            membership_amount: Money::new(row.membership_amount),
            discount_percent: percentage("discount_percent", row.discount_percent)?,
            is_active: row.is_active,
            total_donations: Money::new(row.total_donations),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

/// Clears the active flag on every season but `keep`.
async fn deactivate_others(
    tx: &mut Transaction<'_, Postgres>,
    keep: &SeasonId,
) -> Result<(), DomainError> {
    let result = sqlx::query(
        "UPDATE seasons SET is_active = FALSE, updated_at = NOW() WHERE is_active AND id <> $1",
    )
    .bind(keep.as_uuid())
    .execute(&mut **tx)
    .await
    .map_err(|e| DomainError::database("Failed to deactivate seasons", e))?;

    debug!(deactivated = result.rows_affected(), "Deactivated other seasons");
    Ok(())
}

#[async_trait]
impl SeasonRepository for PostgresSeasonRepository {
    async fn save(&self, season: &Season) -> Result<(), DomainError> {
        let mut tx = begin(&self.pool).await?;
        if season.is_active {
            deactivate_others(&mut tx, &season.id).await?;
        }

        sqlx::query(
            r#"
            INSERT INTO seasons (
                id, start_year, end_year, label, membership_amount, discount_percent,
                is_active, total_donations, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(season.id.as_uuid())
        .bind(season.start_year)
        .bind(season.end_year)
        .bind(&season.label)
        .bind(season.membership_amount.amount())
        .bind(i16::from(season.discount_percent.value()))
        .bind(season.is_active)
        .bind(season.total_donations.amount())
        .bind(season.created_at.as_datetime())
        .bind(season.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to save season", e))?;

        commit(tx).await
    }

    async fn update(&self, season: &Season) -> Result<(), DomainError> {
        let mut tx = begin(&self.pool).await?;
        if season.is_active {
            deactivate_others(&mut tx, &season.id).await?;
        }

        let result = sqlx::query(
            r#"
            UPDATE seasons SET
                start_year = $2,
                end_year = $3,
                label = $4,
                membership_amount = $5,
                discount_percent = $6,
                is_active = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(season.id.as_uuid())
        .bind(season.start_year)
        .bind(season.end_year)
        .bind(&season.label)
        .bind(season.membership_amount.amount())
        .bind(i16::from(season.discount_percent.value()))
        .bind(season.is_active)
        .bind(season.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to update season", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::SeasonNotFound, "Season not found"));
        }
        commit(tx).await
    }

    async fn find_by_id(&self, id: &SeasonId) -> Result<Option<Season>, DomainError> {
        let row: Option<SeasonRow> = sqlx::query_as(&format!("{SELECT_SEASON} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch season", e))?;

        row.map(Season::try_from).transpose()
    }

    async fn find_active(&self) -> Result<Option<Season>, DomainError> {
        let row: Option<SeasonRow> = sqlx::query_as(&format!("{SELECT_SEASON} WHERE is_active"))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch active season", e))?;

        row.map(Season::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Season>, DomainError> {
        let rows: Vec<SeasonRow> =
            sqlx::query_as(&format!("{SELECT_SEASON} ORDER BY start_year DESC"))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to list seasons", e))?;

        rows.into_iter().map(Season::try_from).collect()
    }

    async fn activate(&self, id: &SeasonId) -> Result<Season, DomainError> {
        let mut tx = begin(&self.pool).await?;
        deactivate_others(&mut tx, id).await?;

        let row: Option<SeasonRow> = sqlx::query_as(
            r#"
            UPDATE seasons SET is_active = TRUE, updated_at = NOW()
            WHERE id = $1
            RETURNING id, start_year, end_year, label, membership_amount, discount_percent,
                      is_active, total_donations, created_at, updated_at
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to activate season", e))?;

        let season = row
            .map(Season::try_from)
            .transpose()?
            .ok_or_else(|| DomainError::new(ErrorCode::SeasonNotFound, "Season not found"))?;
        commit(tx).await?;
        Ok(season)
    }
}

//! PostgreSQL implementation of WorkshopRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::{to_i32, to_u32, violates};
use crate::domain::foundation::{DomainError, ErrorCode, Money, SeasonId, Timestamp, WorkshopId};
use crate::domain::workshop::{Workshop, WorkshopPrice};
use crate::ports::{WorkshopFilter, WorkshopRepository};

const SELECT_WORKSHOP: &str = r#"
    SELECT w.id, w.name, w.description, w.is_active, w.allow_multiple, w.max_per_member,
           w.created_at, w.updated_at
    FROM workshops w
"#;

pub struct PostgresWorkshopRepository {
    pool: PgPool,
}

impl PostgresWorkshopRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WorkshopRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    is_active: bool,
    allow_multiple: bool,
    max_per_member: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<WorkshopRow> for Workshop {
    type Error = DomainError;

    fn try_from(row: WorkshopRow) -> Result<Self, Self::Error> {
        Ok(Workshop {
            id: WorkshopId::from_uuid(row.id),
            name: row.name,
            description: row.description,
            is_active: row.is_active,
            allow_multiple: row.allow_multiple,
            max_per_member: row
                .max_per_member
                .map(|max| to_u32("max_per_member", max))
                .transpose()?,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PriceRow {
    workshop_id: Uuid,
    season_id: Uuid,
    amount: Decimal,
}

impl From<PriceRow> for WorkshopPrice {
    fn from(row: PriceRow) -> Self {
        WorkshopPrice {
            workshop_id: WorkshopId::from_uuid(row.workshop_id),
            season_id: SeasonId::from_uuid(row.season_id),
            amount: Money::new(row.amount),
        }
    }
}

fn max_per_member(workshop: &Workshop) -> Result<Option<i32>, DomainError> {
    workshop
        .max_per_member
        .map(|max| to_i32("max_per_member", max))
        .transpose()
}

#[async_trait]
impl WorkshopRepository for PostgresWorkshopRepository {
    async fn save(&self, workshop: &Workshop) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO workshops (
                id, name, description, is_active, allow_multiple, max_per_member,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(workshop.id.as_uuid())
        .bind(&workshop.name)
        .bind(&workshop.description)
        .bind(workshop.is_active)
        .bind(workshop.allow_multiple)
        .bind(max_per_member(workshop)?)
        .bind(workshop.created_at.as_datetime())
        .bind(workshop.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save workshop", e))?;

        Ok(())
    }

    async fn update(&self, workshop: &Workshop) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE workshops SET
                name = $2, description = $3, is_active = $4, allow_multiple = $5,
                max_per_member = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(workshop.id.as_uuid())
        .bind(&workshop.name)
        .bind(&workshop.description)
        .bind(workshop.is_active)
        .bind(workshop.allow_multiple)
        .bind(max_per_member(workshop)?)
        .bind(workshop.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update workshop", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::WorkshopNotFound, "Workshop not found"));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &WorkshopId) -> Result<Option<Workshop>, DomainError> {
        let row: Option<WorkshopRow> =
            sqlx::query_as(&format!("{SELECT_WORKSHOP} WHERE w.id = $1"))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to fetch workshop", e))?;

        row.map(Workshop::try_from).transpose()
    }

    async fn list(&self, filter: &WorkshopFilter) -> Result<Vec<Workshop>, DomainError> {
        let rows: Vec<WorkshopRow> = sqlx::query_as(&format!(
            r#"{SELECT_WORKSHOP}
            WHERE (NOT $1 OR w.is_active)
              AND ($2::uuid IS NULL OR EXISTS (
                    SELECT 1 FROM workshop_prices p
                    WHERE p.workshop_id = w.id AND p.season_id = $2))
            ORDER BY w.name"#
        ))
        .bind(filter.active_only)
        .bind(filter.priced_for_season.as_ref().map(SeasonId::as_uuid))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list workshops", e))?;

        rows.into_iter().map(Workshop::try_from).collect()
    }

    async fn upsert_price(&self, price: &WorkshopPrice) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO workshop_prices (workshop_id, season_id, amount)
            VALUES ($1, $2, $3)
            ON CONFLICT ON CONSTRAINT workshop_prices_workshop_id_season_id_key
            DO UPDATE SET amount = EXCLUDED.amount
            "#,
        )
        .bind(price.workshop_id.as_uuid())
        .bind(price.season_id.as_uuid())
        .bind(price.amount.amount())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "workshop_prices_workshop_id_fkey") {
                return DomainError::new(ErrorCode::WorkshopNotFound, "Workshop not found");
            }
            if violates(&e, "workshop_prices_season_id_fkey") {
                return DomainError::new(ErrorCode::SeasonNotFound, "Season not found");
            }
            DomainError::database("Failed to save workshop price", e)
        })?;

        Ok(())
    }

    async fn find_price(
        &self,
        workshop_id: &WorkshopId,
        season_id: &SeasonId,
    ) -> Result<Option<WorkshopPrice>, DomainError> {
        let row: Option<PriceRow> = sqlx::query_as(
            r#"
            SELECT workshop_id, season_id, amount FROM workshop_prices
            WHERE workshop_id = $1 AND season_id = $2
            "#,
        )
        .bind(workshop_id.as_uuid())
        .bind(season_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch workshop price", e))?;

        Ok(row.map(WorkshopPrice::from))
    }

    async fn prices_for_workshop(
        &self,
        workshop_id: &WorkshopId,
    ) -> Result<Vec<WorkshopPrice>, DomainError> {
        let rows: Vec<PriceRow> = sqlx::query_as(
            r#"
            SELECT p.workshop_id, p.season_id, p.amount
            FROM workshop_prices p
            JOIN seasons s ON s.id = p.season_id
            WHERE p.workshop_id = $1
            ORDER BY s.start_year DESC
            "#,
        )
        .bind(workshop_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list workshop prices", e))?;

        Ok(rows.into_iter().map(WorkshopPrice::from).collect())
    }
}

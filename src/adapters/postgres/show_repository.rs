//! PostgreSQL implementation of ShowRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::{invalid_column, to_i32, to_u32, violates};
use crate::domain::foundation::{DomainError, ErrorCode, Money, ShowClientId, ShowId, Timestamp};
use crate::domain::show::{Show, ShowClient, ShowStatus};
use crate::ports::{ShowFilter, ShowRepository};

const SELECT_CLIENT: &str = r#"
    SELECT id, client_type, name, contact_name, email, phone, address, notes,
           created_at, updated_at
    FROM show_clients
"#;

const SELECT_SHOW: &str = r#"
    SELECT id, client_id, title, description, proposed_date, confirmed_date,
           duration_minutes, proposed_price, agreed_price, location, notes, status,
           created_at, updated_at
    FROM shows
"#;

pub struct PostgresShowRepository {
    pool: PgPool,
}

impl PostgresShowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: Uuid,
    client_type: String,
    name: String,
    contact_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ClientRow> for ShowClient {
    fn from(row: ClientRow) -> Self {
        ShowClient {
            id: ShowClientId::from_uuid(row.id),
            client_type: row.client_type,
            name: row.name,
            contact_name: row.contact_name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            notes: row.notes,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ShowRow {
    id: Uuid,
    client_id: Uuid,
    title: String,
    description: Option<String>,
    proposed_date: Option<NaiveDate>,
    confirmed_date: Option<NaiveDate>,
    duration_minutes: Option<i32>,
    proposed_price: Decimal,
    agreed_price: Option<Decimal>,
    location: Option<String>,
    notes: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ShowRow> for Show {
    type Error = DomainError;

    fn try_from(row: ShowRow) -> Result<Self, Self::Error> {
        let status = ShowStatus::parse(&row.status)
            .ok_or_else(|| invalid_column("show status", &row.status))?;
        Ok(Show {
            id: ShowId::from_uuid(row.id),
            client_id: ShowClientId::from_uuid(row.client_id),
            title: row.title,
            description: row.description,
            proposed_date: row.proposed_date,
            confirmed_date: row.confirmed_date,
            duration_minutes: row
                .duration_minutes
                .map(|m| to_u32("duration_minutes", m))
                .transpose()?,
            proposed_price: Money::new(row.proposed_price),
            agreed_price: row.agreed_price.map(Money::new),
            location: row.location,
            notes: row.notes,
            status,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn duration(show: &Show) -> Result<Option<i32>, DomainError> {
    show.duration_minutes
        .map(|m| to_i32("duration_minutes", m))
        .transpose()
}

fn client_missing(err: &sqlx::Error) -> bool {
    violates(err, "shows_client_id_fkey")
}

#[async_trait]
impl ShowRepository for PostgresShowRepository {
    async fn save_client(&self, client: &ShowClient) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO show_clients (
                id, client_type, name, contact_name, email, phone, address, notes,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(client.id.as_uuid())
        .bind(&client.client_type)
        .bind(&client.name)
        .bind(&client.contact_name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(&client.notes)
        .bind(client.created_at.as_datetime())
        .bind(client.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save show client", e))?;

        Ok(())
    }

    async fn update_client(&self, client: &ShowClient) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE show_clients SET
                client_type = $2, name = $3, contact_name = $4, email = $5, phone = $6,
                address = $7, notes = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(client.id.as_uuid())
        .bind(&client.client_type)
        .bind(&client.name)
        .bind(&client.contact_name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(&client.notes)
        .bind(client.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update show client", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ShowClientNotFound,
                "Show client not found",
            ));
        }
        Ok(())
    }

    async fn find_client(&self, id: &ShowClientId) -> Result<Option<ShowClient>, DomainError> {
        let row: Option<ClientRow> = sqlx::query_as(&format!("{SELECT_CLIENT} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch show client", e))?;

        Ok(row.map(ShowClient::from))
    }

    async fn list_clients(&self) -> Result<Vec<ShowClient>, DomainError> {
        let rows: Vec<ClientRow> = sqlx::query_as(&format!("{SELECT_CLIENT} ORDER BY name"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to list show clients", e))?;

        Ok(rows.into_iter().map(ShowClient::from).collect())
    }

    async fn save_show(&self, show: &Show) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO shows (
                id, client_id, title, description, proposed_date, confirmed_date,
                duration_minutes, proposed_price, agreed_price, location, notes, status,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(show.id.as_uuid())
        .bind(show.client_id.as_uuid())
        .bind(&show.title)
        .bind(&show.description)
        .bind(show.proposed_date)
        .bind(show.confirmed_date)
        .bind(duration(show)?)
        .bind(show.proposed_price.amount())
        .bind(show.agreed_price.map(|p| p.amount()))
        .bind(&show.location)
        .bind(&show.notes)
        .bind(show.status.as_str())
        .bind(show.created_at.as_datetime())
        .bind(show.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if client_missing(&e) {
                return DomainError::new(ErrorCode::ShowClientNotFound, "Show client not found");
            }
            DomainError::database("Failed to save show", e)
        })?;

        Ok(())
    }

    async fn update_show(&self, show: &Show) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE shows SET
                client_id = $2, title = $3, description = $4, proposed_date = $5,
                confirmed_date = $6, duration_minutes = $7, proposed_price = $8,
                agreed_price = $9, location = $10, notes = $11, status = $12, updated_at = $13
            WHERE id = $1
            "#,
        )
        .bind(show.id.as_uuid())
        .bind(show.client_id.as_uuid())
        .bind(&show.title)
        .bind(&show.description)
        .bind(show.proposed_date)
        .bind(show.confirmed_date)
        .bind(duration(show)?)
        .bind(show.proposed_price.amount())
        .bind(show.agreed_price.map(|p| p.amount()))
        .bind(&show.location)
        .bind(&show.notes)
        .bind(show.status.as_str())
        .bind(show.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if client_missing(&e) {
                return DomainError::new(ErrorCode::ShowClientNotFound, "Show client not found");
            }
            DomainError::database("Failed to update show", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::ShowNotFound, "Show not found"));
        }
        Ok(())
    }

    async fn find_show(&self, id: &ShowId) -> Result<Option<Show>, DomainError> {
        let row: Option<ShowRow> = sqlx::query_as(&format!("{SELECT_SHOW} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch show", e))?;

        row.map(Show::try_from).transpose()
    }

    async fn list_shows(&self, filter: &ShowFilter) -> Result<Vec<Show>, DomainError> {
        let rows: Vec<ShowRow> = sqlx::query_as(&format!(
            r#"{SELECT_SHOW}
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR client_id = $2)
            ORDER BY COALESCE(confirmed_date, proposed_date) DESC NULLS LAST"#
        ))
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.client_id.as_ref().map(ShowClientId::as_uuid))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list shows", e))?;

        rows.into_iter().map(Show::try_from).collect()
    }
}

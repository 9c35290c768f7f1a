//! PostgreSQL adapters - database implementations of the ports.
//!
//! - `PostgresSeasonRepository` - seasons and the active-season singleton
//! - `PostgresFamilyRepository` / `PostgresMemberRepository`
//! - `PostgresWorkshopRepository` - workshops and their season prices
//! - `PostgresMembershipRepository`
//! - `PostgresRegistrationRepository` - registrations and their lines
//! - `PostgresPaymentRepository` - payments with their reconciliation writes
//! - `PostgresShowRepository` - show clients and bookings
//! - `PostgresSettlementReader` - ledger of a family or member
//!
//! Multi-row writes run in one transaction each.

mod family_repository;
mod membership_repository;
mod payment_repository;
mod registration_repository;
mod season_repository;
mod settlement_reader;
mod show_repository;
mod workshop_repository;

pub use family_repository::{PostgresFamilyRepository, PostgresMemberRepository};
pub use membership_repository::PostgresMembershipRepository;
pub use payment_repository::PostgresPaymentRepository;
pub use registration_repository::PostgresRegistrationRepository;
pub use season_repository::PostgresSeasonRepository;
pub use settlement_reader::PostgresSettlementReader;
pub use show_repository::PostgresShowRepository;
pub use workshop_repository::PostgresWorkshopRepository;

use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode, Percentage};

/// Builds the connection pool from configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(&config.url)
        .await
}

/// Applies the embedded migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

async fn begin(pool: &PgPool) -> Result<Transaction<'static, Postgres>, DomainError> {
    pool.begin()
        .await
        .map_err(|e| DomainError::database("Failed to begin transaction", e))
}

async fn commit(tx: Transaction<'_, Postgres>) -> Result<(), DomainError> {
    tx.commit()
        .await
        .map_err(|e| DomainError::database("Failed to commit transaction", e))
}

/// True if `err` was raised by `constraint`.
fn violates(err: &sqlx::Error, constraint: &str) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.constraint() == Some(constraint))
}

fn invalid_column(column: &str, value: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Invalid {} value: {}", column, value),
    )
}

fn percentage(column: &str, value: i16) -> Result<Percentage, DomainError> {
    Percentage::try_new(i64::from(value)).map_err(|_| invalid_column(column, value))
}

fn to_u32(column: &str, value: i32) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|_| invalid_column(column, value))
}

fn to_i32(column: &str, value: u32) -> Result<i32, DomainError> {
    i32::try_from(value).map_err(|_| {
        DomainError::validation(column, format!("{} is too large", value))
    })
}

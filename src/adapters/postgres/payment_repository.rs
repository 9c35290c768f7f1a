//! PostgreSQL implementation of PaymentRepository.
//!
//! Recording and cashing write the payment, the season donation and the
//! membership statuses in one transaction.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use super::{begin, commit, invalid_column};
use crate::domain::foundation::{
    DomainError, ErrorCode, FamilyId, MemberId, Money, PaymentId, SeasonId, ShowClientId,
    Timestamp,
};
use crate::domain::payment::{Payment, PaymentScope, PaymentStatus, PaymentType};
use crate::domain::settlement::{MembershipStatusUpdate, Reconciliation};
use crate::ports::{PaymentFilter, PaymentRepository};

pub(super) const SELECT_PAYMENT: &str = r#"
    SELECT p.id, p.family_id, p.member_id, p.show_client_id, p.season_id, p.amount,
           p.payment_type, p.payment_date, p.cashing_date, p.reference, p.notes, p.status,
           p.created_at, p.updated_at
    FROM payments p
"#;

pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct PaymentRow {
    id: Uuid,
    family_id: Option<Uuid>,
    member_id: Option<Uuid>,
    show_client_id: Option<Uuid>,
    season_id: Option<Uuid>,
    amount: Decimal,
    payment_type: String,
    payment_date: NaiveDate,
    cashing_date: Option<NaiveDate>,
    reference: Option<String>,
    notes: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let scope = PaymentScope::from_parts(
            row.family_id.map(FamilyId::from_uuid),
            row.member_id.map(MemberId::from_uuid),
            row.show_client_id.map(ShowClientId::from_uuid),
        )
        .map_err(|e| invalid_column("payment scope", e))?;
        let payment_type = PaymentType::parse(&row.payment_type)
            .ok_or_else(|| invalid_column("payment_type", &row.payment_type))?;
        let status = PaymentStatus::parse(&row.status)
            .ok_or_else(|| invalid_column("payment status", &row.status))?;

        Ok(Payment {
            id: PaymentId::from_uuid(row.id),
            scope,
            season_id: row.season_id.map(SeasonId::from_uuid),
            amount: Money::new(row.amount),
            payment_type,
            payment_date: row.payment_date,
            cashing_date: row.cashing_date,
            reference: row.reference,
            notes: row.notes,
            status,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

async fn apply_status_update(
    tx: &mut Transaction<'_, Postgres>,
    update: &MembershipStatusUpdate,
) -> Result<(), DomainError> {
    if update.is_empty() {
        return Ok(());
    }
    let ids: Vec<Uuid> = update.membership_ids.iter().map(|id| *id.as_uuid()).collect();
    let result = sqlx::query(
        "UPDATE memberships SET status = $2, updated_at = NOW() WHERE id = ANY($1)",
    )
    .bind(&ids)
    .bind(update.status.as_str())
    .execute(&mut **tx)
    .await
    .map_err(|e| DomainError::database("Failed to update membership statuses", e))?;

    debug!(
        memberships = result.rows_affected(),
        status = update.status.as_str(),
        "Applied membership status update"
    );
    Ok(())
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn record(
        &self,
        payment: &Payment,
        reconciliation: Option<&Reconciliation>,
    ) -> Result<(), DomainError> {
        let mut tx = begin(&self.pool).await?;

        sqlx::query(
            r#"
            INSERT INTO payments (
                id, family_id, member_id, show_client_id, season_id, amount, payment_type,
                payment_date, cashing_date, reference, notes, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.scope.family_id().map(|id| *id.as_uuid()))
        .bind(payment.scope.member_id().map(|id| *id.as_uuid()))
        .bind(payment.scope.show_client_id().map(|id| *id.as_uuid()))
        .bind(payment.season_id.as_ref().map(SeasonId::as_uuid))
        .bind(payment.amount.amount())
        .bind(payment.payment_type.as_str())
        .bind(payment.payment_date)
        .bind(payment.cashing_date)
        .bind(&payment.reference)
        .bind(&payment.notes)
        .bind(payment.status.as_str())
        .bind(payment.created_at.as_datetime())
        .bind(payment.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to save payment", e))?;

        if let Some(reconciliation) = reconciliation {
            if reconciliation.donation.is_positive() {
                let result = sqlx::query(
                    r#"
                    UPDATE seasons
                    SET total_donations = total_donations + $2, updated_at = NOW()
                    WHERE id = $1
                    "#,
                )
                .bind(reconciliation.season_id.as_uuid())
                .bind(reconciliation.donation.amount())
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::database("Failed to record donation", e))?;

                if result.rows_affected() == 0 {
                    return Err(DomainError::new(ErrorCode::SeasonNotFound, "Season not found"));
                }
            }
            apply_status_update(&mut tx, &reconciliation.status_update).await?;
        }

        commit(tx).await
    }

    async fn update_status(
        &self,
        payment: &Payment,
        status_update: Option<&MembershipStatusUpdate>,
    ) -> Result<(), DomainError> {
        let mut tx = begin(&self.pool).await?;

        let result = sqlx::query(
            "UPDATE payments SET status = $2, cashing_date = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(payment.id.as_uuid())
        .bind(payment.status.as_str())
        .bind(payment.cashing_date)
        .bind(payment.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to update payment", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::PaymentNotFound, "Payment not found"));
        }
        if let Some(update) = status_update {
            apply_status_update(&mut tx, update).await?;
        }

        commit(tx).await
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(&format!("{SELECT_PAYMENT} WHERE p.id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch payment", e))?;

        row.map(Payment::try_from).transpose()
    }

    async fn list(&self, filter: &PaymentFilter) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            r#"{SELECT_PAYMENT}
            WHERE ($1::uuid IS NULL OR p.family_id = $1)
              AND ($2::uuid IS NULL OR p.member_id = $2)
              AND ($3::uuid IS NULL OR p.show_client_id = $3)
              AND ($4::uuid IS NULL OR p.season_id = $4)
              AND ($5::text IS NULL OR p.status = $5)
              AND (NOT $6 OR (p.payment_type = 'check'
                              AND p.cashing_date IS NULL
                              AND p.status <> 'cancelled'))
            ORDER BY p.payment_date DESC, p.created_at DESC"#
        ))
        .bind(filter.family_id.as_ref().map(FamilyId::as_uuid))
        .bind(filter.member_id.as_ref().map(MemberId::as_uuid))
        .bind(filter.show_client_id.as_ref().map(ShowClientId::as_uuid))
        .bind(filter.season_id.as_ref().map(SeasonId::as_uuid))
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.uncashed_only)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list payments", e))?;

        rows.into_iter().map(Payment::try_from).collect()
    }
}

//! PostgreSQL implementations of FamilyRepository and MemberRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::family::{Family, Guardian, Member};
use crate::domain::foundation::{DomainError, ErrorCode, FamilyId, MemberId, Timestamp};
use crate::ports::{FamilyRepository, MemberFilter, MemberRepository};

// ════════════════════════════════════════════════════════════════════════════
// Families
// ════════════════════════════════════════════════════════════════════════════

pub struct PostgresFamilyRepository {
    pool: PgPool,
}

impl PostgresFamilyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FamilyRow {
    id: Uuid,
    name: String,
    address: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<FamilyRow> for Family {
    fn from(row: FamilyRow) -> Self {
        Family {
            id: FamilyId::from_uuid(row.id),
            name: row.name,
            address: row.address,
            phone: row.phone,
            email: row.email,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

#[async_trait]
impl FamilyRepository for PostgresFamilyRepository {
    async fn save(&self, family: &Family) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO families (id, name, address, phone, email, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(family.id.as_uuid())
        .bind(&family.name)
        .bind(&family.address)
        .bind(&family.phone)
        .bind(&family.email)
        .bind(family.created_at.as_datetime())
        .bind(family.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save family", e))?;

        Ok(())
    }

    async fn update(&self, family: &Family) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE families SET name = $2, address = $3, phone = $4, email = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(family.id.as_uuid())
        .bind(&family.name)
        .bind(&family.address)
        .bind(&family.phone)
        .bind(&family.email)
        .bind(family.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update family", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::FamilyNotFound, "Family not found"));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &FamilyId) -> Result<Option<Family>, DomainError> {
        let row: Option<FamilyRow> = sqlx::query_as(
            "SELECT id, name, address, phone, email, created_at, updated_at FROM families WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch family", e))?;

        Ok(row.map(Family::from))
    }

    async fn list(&self) -> Result<Vec<Family>, DomainError> {
        let rows: Vec<FamilyRow> = sqlx::query_as(
            "SELECT id, name, address, phone, email, created_at, updated_at FROM families ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list families", e))?;

        Ok(rows.into_iter().map(Family::from).collect())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Members
// ════════════════════════════════════════════════════════════════════════════

const SELECT_MEMBER: &str = r#"
    SELECT id, family_id, first_name, last_name, email, phone, birth_date, is_minor,
           guardian_first_name, guardian_last_name, guardian_email, guardian_phone,
           created_at, updated_at
    FROM members
"#;

pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    id: Uuid,
    family_id: Option<Uuid>,
    first_name: String,
    last_name: String,
    email: Option<String>,
    phone: Option<String>,
    birth_date: Option<NaiveDate>,
    is_minor: bool,
    guardian_first_name: Option<String>,
    guardian_last_name: Option<String>,
    guardian_email: Option<String>,
    guardian_phone: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        let guardian = match (row.guardian_first_name, row.guardian_last_name) {
            (Some(first_name), Some(last_name)) => Some(Guardian {
                first_name,
                last_name,
                email: row.guardian_email,
                phone: row.guardian_phone,
            }),
            _ => None,
        };
        Member {
            id: MemberId::from_uuid(row.id),
            family_id: row.family_id.map(FamilyId::from_uuid),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            birth_date: row.birth_date,
            is_minor: row.is_minor,
            guardian,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn save(&self, member: &Member) -> Result<(), DomainError> {
        let guardian = member.guardian.as_ref();
        sqlx::query(
            r#"
            INSERT INTO members (
                id, family_id, first_name, last_name, email, phone, birth_date, is_minor,
                guardian_first_name, guardian_last_name, guardian_email, guardian_phone,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(member.id.as_uuid())
        .bind(member.family_id.as_ref().map(FamilyId::as_uuid))
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(member.birth_date)
        .bind(member.is_minor)
        .bind(guardian.map(|g| g.first_name.as_str()))
        .bind(guardian.map(|g| g.last_name.as_str()))
        .bind(guardian.and_then(|g| g.email.as_deref()))
        .bind(guardian.and_then(|g| g.phone.as_deref()))
        .bind(member.created_at.as_datetime())
        .bind(member.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save member", e))?;

        Ok(())
    }

    async fn update(&self, member: &Member) -> Result<(), DomainError> {
        let guardian = member.guardian.as_ref();
        let result = sqlx::query(
            r#"
            UPDATE members SET
                family_id = $2,
                first_name = $3,
                last_name = $4,
                email = $5,
                phone = $6,
                birth_date = $7,
                is_minor = $8,
                guardian_first_name = $9,
                guardian_last_name = $10,
                guardian_email = $11,
                guardian_phone = $12,
                updated_at = $13
            WHERE id = $1
            "#,
        )
        .bind(member.id.as_uuid())
        .bind(member.family_id.as_ref().map(FamilyId::as_uuid))
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(member.birth_date)
        .bind(member.is_minor)
        .bind(guardian.map(|g| g.first_name.as_str()))
        .bind(guardian.map(|g| g.last_name.as_str()))
        .bind(guardian.and_then(|g| g.email.as_deref()))
        .bind(guardian.and_then(|g| g.phone.as_deref()))
        .bind(member.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update member", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::MemberNotFound, "Member not found"));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(&format!("{SELECT_MEMBER} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch member", e))?;

        Ok(row.map(Member::from))
    }

    async fn list(&self, filter: &MemberFilter) -> Result<Vec<Member>, DomainError> {
        let pattern = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s.replace('%', "\\%").replace('_', "\\_")));

        let rows: Vec<MemberRow> = sqlx::query_as(&format!(
            r#"{SELECT_MEMBER}
            WHERE ($1::uuid IS NULL OR family_id = $1)
              AND ($2::text IS NULL
                   OR first_name ILIKE $2
                   OR last_name ILIKE $2
                   OR email ILIKE $2)
            ORDER BY last_name, first_name"#
        ))
        .bind(filter.family_id.as_ref().map(FamilyId::as_uuid))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list members", e))?;

        Ok(rows.into_iter().map(Member::from).collect())
    }
}

//! PostgreSQL-backed sub-admin repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use eventdesk_application::SubAdminRepository;
use eventdesk_core::{AppError, AppResult};
use eventdesk_domain::{SubAdminAccount, SubAdminId, SubAdminRole};

/// PostgreSQL implementation of the sub-admin repository port.
#[derive(Clone)]
pub struct PostgresSubAdminRepository {
    pool: PgPool,
}

impl PostgresSubAdminRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SubAdminRow {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    role: String,
    permissions: Vec<String>,
    is_active: bool,
    password_hash: String,
    created_at: DateTime<Utc>,
    created_by: String,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SubAdminRow> for SubAdminAccount {
    type Error = AppError;

    fn try_from(row: SubAdminRow) -> Result<Self, Self::Error> {
        let role = row.role.parse::<SubAdminRole>().map_err(|error| {
            AppError::Internal(format!("sub-admin '{}' has a corrupt role: {error}", row.id))
        })?;

        Ok(Self {
            id: SubAdminId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            role,
            permissions: row.permissions.into_iter().collect(),
            is_active: row.is_active,
            password_hash: row.password_hash,
            created_at: row.created_at,
            created_by: row.created_by,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, name, email, phone, role, permissions, is_active,
           password_hash, created_at, created_by, updated_at
    FROM sub_admins
"#;

#[async_trait]
impl SubAdminRepository for PostgresSubAdminRepository {
    async fn list(&self) -> AppResult<Vec<SubAdminAccount>> {
        let rows = sqlx::query_as::<_, SubAdminRow>(&format!(
            "{SELECT_COLUMNS} ORDER BY created_at, email"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list sub-admins: {error}")))?;

        rows.into_iter().map(SubAdminAccount::try_from).collect()
    }

    async fn find_by_id(&self, id: SubAdminId) -> AppResult<Option<SubAdminAccount>> {
        sqlx::query_as::<_, SubAdminRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to find sub-admin: {error}")))?
            .map(SubAdminAccount::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<SubAdminAccount>> {
        sqlx::query_as::<_, SubAdminRow>(&format!("{SELECT_COLUMNS} WHERE email = LOWER($1)"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to find sub-admin by email: {error}"))
            })?
            .map(SubAdminAccount::try_from)
            .transpose()
    }

    async fn insert(&self, account: SubAdminAccount) -> AppResult<SubAdminAccount> {
        sqlx::query(
            r#"
            INSERT INTO sub_admins (
                id,
                name,
                email,
                phone,
                role,
                permissions,
                is_active,
                password_hash,
                created_at,
                created_by,
                updated_at
            )
            VALUES ($1, $2, LOWER($3), $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.phone)
        .bind(account.role.as_str())
        .bind(account.permissions.iter().cloned().collect::<Vec<_>>())
        .bind(account.is_active)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .bind(&account.created_by)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| email_conflict_or_internal(error, "create sub-admin"))?;

        Ok(account)
    }

    async fn update(&self, account: SubAdminAccount) -> AppResult<SubAdminAccount> {
        let result = sqlx::query(
            r#"
            UPDATE sub_admins
            SET name = $2,
                email = LOWER($3),
                phone = $4,
                role = $5,
                permissions = $6,
                is_active = $7,
                password_hash = $8,
                updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.phone)
        .bind(account.role.as_str())
        .bind(account.permissions.iter().cloned().collect::<Vec<_>>())
        .bind(account.is_active)
        .bind(&account.password_hash)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| email_conflict_or_internal(error, "update sub-admin"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "sub-admin '{}' does not exist",
                account.id
            )));
        }

        Ok(account)
    }

    async fn delete(&self, id: SubAdminId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM sub_admins WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete sub-admin: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("sub-admin '{id}' does not exist")));
        }

        Ok(())
    }
}

fn email_conflict_or_internal(error: sqlx::Error, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict("a sub-admin with this email already exists".to_owned());
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}

use std::str::FromStr;

use async_trait::async_trait;
use auth::Role;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::account::errors::AuthError;
use crate::account::ports::CredentialRepository;
use crate::domain::account::models::CredentialRecord;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::UserProfile;

/// Postgres-backed credential repository.
///
/// Two tables: `credentials` keyed by identifier, `profiles` keyed by the
/// same identifier with a foreign key back. Create is one transaction;
/// updates are single-row and need no cross-record coordination.
pub struct PostgresCredentialRepository {
    pool: PgPool,
}

impl PostgresCredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn record_from_row(row: &PgRow) -> Result<CredentialRecord, AuthError> {
        let identifier: String = row
            .try_get("identifier")
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        let password_hash: String = row
            .try_get("password_hash")
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        let role: String = row
            .try_get("role")
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        let active: bool = row
            .try_get("active")
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| AuthError::Repository(e.to_string()))?;

        Ok(CredentialRecord {
            identifier: EmailAddress::new(identifier)
                .map_err(|e| AuthError::Repository(e.to_string()))?,
            password_hash,
            role: Role::from_str(&role).map_err(|e| AuthError::Repository(e.to_string()))?,
            active,
            created_at,
        })
    }

    fn profile_from_row(row: &PgRow) -> Result<UserProfile, AuthError> {
        let first_name: String = row
            .try_get("first_name")
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        let last_name: String = row
            .try_get("last_name")
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        let gender: String = row
            .try_get("gender")
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        let address: String = row
            .try_get("address")
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| AuthError::Repository(e.to_string()))?;

        Ok(UserProfile {
            first_name,
            last_name,
            gender,
            address,
            created_at,
        })
    }
}

#[async_trait]
impl CredentialRepository for PostgresCredentialRepository {
    async fn find_by_identifier(
        &self,
        identifier: &EmailAddress,
    ) -> Result<Option<CredentialRecord>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT identifier, password_hash, role, active, created_at
            FROM credentials
            WHERE identifier = $1
            "#,
        )
        .bind(identifier.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Repository(e.to_string()))?;

        row.map(|r| Self::record_from_row(&r)).transpose()
    }

    async fn create(
        &self,
        record: CredentialRecord,
        profile: UserProfile,
    ) -> Result<CredentialRecord, AuthError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO credentials (identifier, password_hash, role, active, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.identifier.as_str())
        .bind(&record.password_hash)
        .bind(record.role.as_str())
        .bind(record.active)
        .bind(record.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AuthError::AlreadyRegistered;
                }
            }
            AuthError::Repository(e.to_string())
        })?;

        sqlx::query(
            r#"
            INSERT INTO profiles (identifier, first_name, last_name, gender, address, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.identifier.as_str())
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.gender)
        .bind(&profile.address)
        .bind(profile.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| AuthError::Repository(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;

        Ok(record)
    }

    async fn update(&self, record: CredentialRecord) -> Result<CredentialRecord, AuthError> {
        let result = sqlx::query(
            r#"
            UPDATE credentials
            SET password_hash = $2, role = $3, active = $4
            WHERE identifier = $1
            "#,
        )
        .bind(record.identifier.as_str())
        .bind(&record.password_hash)
        .bind(record.role.as_str())
        .bind(record.active)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::Repository(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }

        Ok(record)
    }

    async fn find_profile(
        &self,
        identifier: &EmailAddress,
    ) -> Result<Option<UserProfile>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT first_name, last_name, gender, address, created_at
            FROM profiles
            WHERE identifier = $1
            "#,
        )
        .bind(identifier.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Repository(e.to_string()))?;

        row.map(|r| Self::profile_from_row(&r)).transpose()
    }
}

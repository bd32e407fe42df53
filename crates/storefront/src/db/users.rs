//! User repository for database operations.
//!
//! Emails are matched on the `email_normalized` column, which holds
//! [`Email::normalized`] and carries the `user_email_normalized_key` unique
//! index. Case folding happens in Rust, never in SQL.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use mercantile_core::{Email, UserId};

use super::{RepositoryError, UserStore, conflict_or_database};
use crate::models::{User, UserProfile};

const USER_COLUMNS: &str = "id, email, first_name, last_name, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    email: String,
    first_name: String,
    last_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&r.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: UserId::new(r.id),
            email,
            first_name: r.first_name,
            last_name: r.last_name,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl UserStore for UserRepository<'_> {
    async fn find_by_email(
        &self,
        normalized_email: &str,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, CredentialRow>(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM storefront.user WHERE email_normalized = $1"
        ))
        .bind(normalized_email)
        .fetch_optional(self.pool)
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        Ok(Some((User::try_from(r.user)?, r.password_hash)))
    }

    async fn email_taken(
        &self,
        normalized_email: &str,
        except: Option<UserId>,
    ) -> Result<bool, RepositoryError> {
        let taken = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT 1 FROM storefront.user
                WHERE email_normalized = $1 AND ($2::INTEGER IS NULL OR id <> $2)
            )
            ",
        )
        .bind(normalized_email)
        .bind(except.map(UserId::as_i32))
        .fetch_one(self.pool)
        .await?;

        Ok(taken)
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM storefront.user WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn create(
        &self,
        profile: &UserProfile,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r"
            INSERT INTO storefront.user
                (email, email_normalized, password_hash, first_name, last_name)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "
        ))
        .bind(profile.email.as_str())
        .bind(profile.email.normalized())
        .bind(password_hash)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_or_database(e, "email already exists"))?;

        User::try_from(row)
    }

    async fn update(
        &self,
        id: UserId,
        profile: &UserProfile,
        password_hash: Option<&str>,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r"
            UPDATE storefront.user
            SET email = $2,
                first_name = $3,
                last_name = $4,
                password_hash = COALESCE($5, password_hash),
                email_normalized = $6,
                updated_at = now()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "
        ))
        .bind(id.as_i32())
        .bind(profile.email.as_str())
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(password_hash)
        .bind(profile.email.normalized())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| conflict_or_database(e, "email already exists"))?
        .ok_or(RepositoryError::NotFound)?;

        User::try_from(row)
    }
}

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use keystone_core::error::AppError;
use keystone_core::models::{NewUser, User};
use keystone_core::traits::UserStore;

/// Credential store backed by the `users` table.
///
/// Email uniqueness is enforced by the `uq_users_email` constraint, so two
/// concurrent inserts for the same address cannot both succeed.
#[derive(Clone)]
pub struct UserRepository {
    pool: Pool<Postgres>,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up a user by exact email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    /// Insert a user. A duplicate email yields [`AppError::Conflict`].
    pub async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, role, created_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("Email already registered".into())
            }
            other => AppError::DatabaseError(other.to_string()),
        })?;

        row.try_into()
    }

    /// Total number of users.
    pub async fn count(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM users"#)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(count)
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse()
            .map_err(|e: String| AppError::DatabaseError(format!("User {}: {e}", row.id)))?;

        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role,
            created_at: row.created_at,
        })
    }
}

// -- Trait implementation --

impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        UserRepository::find_by_email(self, email).await
    }

    async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        UserRepository::create(self, user).await
    }

    async fn count(&self) -> Result<i64, AppError> {
        UserRepository::count(self).await
    }
}

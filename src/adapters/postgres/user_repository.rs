//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get_by_name(&self, name: &str) -> Result<User, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash
            FROM users
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch user by name: {}", e),
            )
        })?;

        match row {
            Some(row) => row_to_user(row),
            None => Err(DomainError::user_not_found(name)),
        }
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch user: {}", e),
            )
        })?;

        row.map(row_to_user).transpose()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to read users.{}: {}", column, e),
    )
}

fn row_to_user(row: PgRow) -> Result<User, DomainError> {
    let id: i64 = row.try_get("id").map_err(|e| column_error("id", e))?;
    let name: String = row.try_get("name").map_err(|e| column_error("name", e))?;
    let email: Option<String> = row.try_get("email").map_err(|e| column_error("email", e))?;
    let password_hash: String = row
        .try_get("password_hash")
        .map_err(|e| column_error("password_hash", e))?;

    let id = UserId::new(id).map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))?;

    Ok(User::reconstitute(id, name, email, password_hash))
}

use sqlx::PgPool;

use crate::core::error::{map_db_error, AppError, Result};
use crate::features::users::dtos::UserResponseDto;
use crate::features::users::models::{User, UserRole};

const USERNAME_TAKEN: &str = "Username already exists";

/// Service for user account storage
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all users ordered by username
    pub async fn list(&self) -> Result<Vec<UserResponseDto>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, role, created_at, updated_at
            FROM users
            ORDER BY username
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list users: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(users.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    /// Usernames are matched case-insensitively
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, role, created_at, updated_at
            FROM users
            WHERE LOWER(username) = LOWER($1)
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    /// Insert a user with an already hashed password
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<UserResponseDto> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, USERNAME_TAKEN))?;

        tracing::info!("Created user {} with role {}", user.username, user.role);
        Ok(user.into())
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }

        tracing::info!("Deleted user {}", id);
        Ok(())
    }

    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}

//! MySQL implementation of the UserRepository trait.
//!
//! Account rows carry the single refresh-token slot. The rotation write is
//! one conditional `UPDATE` keyed on the previously stored value; checking
//! `rows_affected` makes it an atomic compare-and-swap, so two concurrent
//! rotations presenting the same value cannot both commit.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use fs_core::domain::entities::user::User;
use fs_core::errors::DomainError;
use fs_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

const USER_COLUMNS: &str = r#"
    id, username, email, password_hash, first_name, last_name, bio, photo_url,
    roles, email_confirmed, is_active, failed_login_attempts, lockout_until,
    refresh_token, refresh_token_expires_at, email_confirmation_token,
    password_reset_token, password_reset_expires_at, created_at, updated_at
"#;

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| internal(format!("Failed to get id: {e}")))?;
        let roles_json: String = row
            .try_get("roles")
            .map_err(|e| internal(format!("Failed to get roles: {e}")))?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| internal(format!("Invalid user UUID: {e}")))?,
            username: row
                .try_get("username")
                .map_err(|e| internal(format!("Failed to get username: {e}")))?,
            email: row
                .try_get("email")
                .map_err(|e| internal(format!("Failed to get email: {e}")))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| internal(format!("Failed to get password_hash: {e}")))?,
            first_name: row
                .try_get("first_name")
                .map_err(|e| internal(format!("Failed to get first_name: {e}")))?,
            last_name: row
                .try_get("last_name")
                .map_err(|e| internal(format!("Failed to get last_name: {e}")))?,
            bio: row
                .try_get("bio")
                .map_err(|e| internal(format!("Failed to get bio: {e}")))?,
            photo_url: row
                .try_get("photo_url")
                .map_err(|e| internal(format!("Failed to get photo_url: {e}")))?,
            roles: serde_json::from_str(&roles_json)
                .map_err(|e| internal(format!("Invalid roles payload: {e}")))?,
            email_confirmed: row
                .try_get("email_confirmed")
                .map_err(|e| internal(format!("Failed to get email_confirmed: {e}")))?,
            is_active: row
                .try_get("is_active")
                .map_err(|e| internal(format!("Failed to get is_active: {e}")))?,
            failed_login_attempts: row
                .try_get("failed_login_attempts")
                .map_err(|e| internal(format!("Failed to get failed_login_attempts: {e}")))?,
            lockout_until: row
                .try_get::<Option<DateTime<Utc>>, _>("lockout_until")
                .map_err(|e| internal(format!("Failed to get lockout_until: {e}")))?,
            refresh_token: row
                .try_get("refresh_token")
                .map_err(|e| internal(format!("Failed to get refresh_token: {e}")))?,
            refresh_token_expires_at: row
                .try_get::<Option<DateTime<Utc>>, _>("refresh_token_expires_at")
                .map_err(|e| internal(format!("Failed to get refresh_token_expires_at: {e}")))?,
            email_confirmation_token: row
                .try_get("email_confirmation_token")
                .map_err(|e| internal(format!("Failed to get email_confirmation_token: {e}")))?,
            password_reset_token: row
                .try_get("password_reset_token")
                .map_err(|e| internal(format!("Failed to get password_reset_token: {e}")))?,
            password_reset_expires_at: row
                .try_get::<Option<DateTime<Utc>>, _>("password_reset_expires_at")
                .map_err(|e| internal(format!("Failed to get password_reset_expires_at: {e}")))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| internal(format!("Failed to get created_at: {e}")))?,
            updated_at: row
                .try_get::<Option<DateTime<Utc>>, _>("updated_at")
                .map_err(|e| internal(format!("Failed to get updated_at: {e}")))?,
        })
    }

    async fn find_one(
        &self,
        where_clause: &str,
        bind: &str,
    ) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE {where_clause} LIMIT 1");

        let result = sqlx::query(&query)
            .bind(bind)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal(format!("Failed to query user: {e}")))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}

fn internal(message: String) -> DomainError {
    DomainError::Internal { message }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.find_one("id = ?", &id.to_string()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("email = ?", email).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.find_one("username = ?", username).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, username, email, password_hash, first_name, last_name, bio,
                photo_url, roles, email_confirmed, is_active,
                failed_login_attempts, lockout_until, refresh_token,
                refresh_token_expires_at, email_confirmation_token,
                password_reset_token, password_reset_expires_at, created_at,
                updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let roles_json = serde_json::to_string(&user.roles)
            .map_err(|e| internal(format!("Failed to encode roles: {e}")))?;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.bio)
            .bind(&user.photo_url)
            .bind(&roles_json)
            .bind(user.email_confirmed)
            .bind(user.is_active)
            .bind(user.failed_login_attempts)
            .bind(user.lockout_until)
            .bind(&user.refresh_token)
            .bind(user.refresh_token_expires_at)
            .bind(&user.email_confirmation_token)
            .bind(&user.password_reset_token)
            .bind(user.password_reset_expires_at)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| internal(format!("Failed to create user: {e}")))?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                username = ?, email = ?, password_hash = ?, first_name = ?,
                last_name = ?, bio = ?, photo_url = ?, roles = ?,
                email_confirmed = ?, is_active = ?, failed_login_attempts = ?,
                lockout_until = ?, refresh_token = ?,
                refresh_token_expires_at = ?, email_confirmation_token = ?,
                password_reset_token = ?, password_reset_expires_at = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let roles_json = serde_json::to_string(&user.roles)
            .map_err(|e| internal(format!("Failed to encode roles: {e}")))?;

        let result = sqlx::query(query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.bio)
            .bind(&user.photo_url)
            .bind(&roles_json)
            .bind(user.email_confirmed)
            .bind(user.is_active)
            .bind(user.failed_login_attempts)
            .bind(user.lockout_until)
            .bind(&user.refresh_token)
            .bind(user.refresh_token_expires_at)
            .bind(&user.email_confirmation_token)
            .bind(&user.password_reset_token)
            .bind(user.password_reset_expires_at)
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| internal(format!("Failed to update user: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| internal(format!("Failed to delete user: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn store_refresh_token(
        &self,
        id: Uuid,
        value: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE users
            SET refresh_token = ?, refresh_token_expires_at = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(value)
            .bind(expires_at)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| internal(format!("Failed to store refresh token: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        current_value: &str,
        new_value: &str,
        new_expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        // Single conditional write: the WHERE clause carries the expected
        // old value, so only one of several concurrent rotations can match.
        // A NULL slot never matches the equality predicate.
        let query = r#"
            UPDATE users
            SET refresh_token = ?, refresh_token_expires_at = ?, updated_at = ?
            WHERE id = ? AND refresh_token = ?
        "#;

        let result = sqlx::query(query)
            .bind(new_value)
            .bind(new_expires_at)
            .bind(Utc::now())
            .bind(id.to_string())
            .bind(current_value)
            .execute(&self.pool)
            .await
            .map_err(|e| internal(format!("Failed to rotate refresh token: {e}")))?;

        Ok(result.rows_affected() == 1)
    }

    async fn clear_refresh_token(&self, id: Uuid) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE users
            SET refresh_token = NULL, refresh_token_expires_at = NULL, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| internal(format!("Failed to clear refresh token: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

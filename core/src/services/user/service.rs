//! User profile service implementation

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::value_objects::{AuthResponse, UserProfile};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::auth::PasswordHasher;

/// Partial profile update; `None` fields keep their current values.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
}

/// Service for profile reads and edits on an authenticated account
pub struct UserService<U, P>
where
    U: UserRepository,
    P: PasswordHasher,
{
    user_repository: Arc<U>,
    password_hasher: Arc<P>,
    /// Minimum accepted password length
    min_password_length: usize,
}

impl<U, P> UserService<U, P>
where
    U: UserRepository,
    P: PasswordHasher,
{
    /// Create a new user service
    pub fn new(user_repository: Arc<U>, password_hasher: Arc<P>) -> Self {
        Self {
            user_repository,
            password_hasher,
            min_password_length: 8,
        }
    }

    /// Fetch a user's profile
    ///
    /// # Returns
    ///
    /// * `Ok(Some(UserProfile))` - Profile found
    /// * `Ok(None)` - No such user
    pub async fn get_profile(&self, user_id: Uuid) -> DomainResult<Option<UserProfile>> {
        let user = self.user_repository.find_by_id(user_id).await?;
        Ok(user.as_ref().map(UserProfile::from))
    }

    /// Apply a partial profile update and return the new profile
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        changes: ProfileUpdate,
    ) -> DomainResult<Option<UserProfile>> {
        let Some(mut user) = self.user_repository.find_by_id(user_id).await? else {
            return Ok(None);
        };

        if let Some(url) = &changes.photo_url {
            if !fs_shared::validation::is_valid_url(url) {
                return Err(DomainError::Validation {
                    message: "Photo URL must be an http(s) URL".to_string(),
                });
            }
        }

        user.first_name = changes.first_name.or(user.first_name);
        user.last_name = changes.last_name.or(user.last_name);
        user.bio = changes.bio.or(user.bio);
        user.photo_url = changes.photo_url.or(user.photo_url);
        user.updated_at = Some(chrono::Utc::now());

        let user = self.user_repository.update(user).await?;

        tracing::info!(user_id = %user.id, "profile updated");

        Ok(Some(UserProfile::from(&user)))
    }

    /// Change the account password.
    ///
    /// Verifies the current password first; on success the stored refresh
    /// credential is cleared so existing sessions must log in again.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<AuthResponse> {
        if new_password.chars().count() < self.min_password_length {
            return Err(DomainError::Validation {
                message: format!(
                    "Password must be at least {} characters",
                    self.min_password_length
                ),
            });
        }

        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        if !self
            .password_hasher
            .verify(current_password, &user.password_hash)?
        {
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        user.password_hash = self.password_hasher.hash(new_password)?;
        user.clear_refresh_token();
        self.user_repository.update(user.clone()).await?;

        tracing::info!(user_id = %user.id, "password changed");

        Ok(AuthResponse::success(
            "Password changed successfully. Please log in again.",
        ))
    }

    /// Delete the account entirely
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Account deleted
    /// * `Ok(false)` - No such user
    pub async fn delete_account(&self, user_id: Uuid) -> DomainResult<bool> {
        let deleted = self.user_repository.delete(user_id).await?;
        if deleted {
            tracing::info!(user_id = %user_id, "account deleted");
        }
        Ok(deleted)
    }
}

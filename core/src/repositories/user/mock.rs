//! Mock implementation of UserRepository for testing
//!
//! The rotation method keeps real compare-and-swap semantics: the value
//! check and the overwrite happen under one write lock, so concurrent
//! rotation tests exercise the same single-winner guarantee the production
//! store provides.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// Mock user repository for testing
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a mock repository seeded with one user
    pub async fn with_existing_user(user: User) -> Self {
        let repo = Self::new();
        repo.users.write().await.insert(user.id, user);
        repo
    }

    /// Read a user back directly, bypassing the trait
    pub async fn get(&self, id: Uuid) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Auth(AuthError::UserAlreadyExists));
        }
        if users.values().any(|u| u.username == user.username) {
            return Err(DomainError::Auth(AuthError::UsernameTaken));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        Ok(users.remove(&id).is_some())
    }

    async fn store_refresh_token(
        &self,
        id: Uuid,
        value: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.set_refresh_token(value.to_string(), expires_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        current_value: &str,
        new_value: &str,
        new_expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        // Check and overwrite under one write lock: single-winner semantics.
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) if user.refresh_token.as_deref() == Some(current_value) => {
                user.set_refresh_token(new_value.to_string(), new_expires_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn clear_refresh_token(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.clear_refresh_token();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

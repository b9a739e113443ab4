//! Authentication routes

pub mod confirm_email;
pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod reset_password;

use std::sync::Arc;

use fs_core::repositories::UserRepository;
use fs_core::services::auth::{AuthService, PasswordHasher};
use fs_core::services::email::EmailSender;
use fs_core::services::token::TokenService;
use fs_core::services::user::UserService;

/// Shared application state injected into every handler
pub struct AppState<U, P, E>
where
    U: UserRepository,
    P: PasswordHasher,
    E: EmailSender,
{
    /// Authentication and token lifecycle service
    pub auth_service: Arc<AuthService<U, P, E>>,
    /// Profile service
    pub user_service: Arc<UserService<U, P>>,
    /// Token signer, used by the JWT middleware
    pub token_service: Arc<TokenService>,
}

impl<U, P, E> AppState<U, P, E>
where
    U: UserRepository,
    P: PasswordHasher,
    E: EmailSender,
{
    /// Create the application state from the wired services
    pub fn new(
        auth_service: Arc<AuthService<U, P, E>>,
        user_service: Arc<UserService<U, P>>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            token_service,
        }
    }
}

//! Main authentication service implementation

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{distributions::Alphanumeric, Rng};
use uuid::Uuid;

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;
use crate::domain::value_objects::{AuthResponse, UserProfile};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::UserRepository;
use crate::services::email::EmailSender;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::password::PasswordHasher;

/// Length of generated email confirmation / password reset tokens
const SECURITY_TOKEN_LENGTH: usize = 48;

/// Authentication service managing registration, login and the token
/// lifecycle (issuance, rotation, revocation).
pub struct AuthService<U, P, E>
where
    U: UserRepository,
    P: PasswordHasher,
    E: EmailSender,
{
    /// User repository, also the refresh-token store
    user_repository: Arc<U>,
    /// Password hashing primitive
    password_hasher: Arc<P>,
    /// Email delivery for confirmation and reset links
    email_sender: Arc<E>,
    /// Token signer
    token_service: Arc<TokenService>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, P, E> AuthService<U, P, E>
where
    U: UserRepository,
    P: PasswordHasher,
    E: EmailSender,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `password_hasher` - Password hashing primitive
    /// * `email_sender` - Email delivery service
    /// * `token_service` - Token signer
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        password_hasher: Arc<P>,
        email_sender: Arc<E>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            email_sender,
            token_service,
            config,
        }
    }

    /// Register a new user account.
    ///
    /// The account starts unconfirmed; a confirmation token is generated and
    /// mailed to the given address. No token pair is issued.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Registration accepted, confirmation email sent
    /// * `Err(DomainError)` - Duplicate email/username or invalid input
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> DomainResult<AuthResponse> {
        // Step 1: validate the input shape
        if !fs_shared::validation::is_valid_email(email) {
            return Err(DomainError::Validation {
                message: "Invalid email address".to_string(),
            });
        }
        if !fs_shared::validation::is_valid_username(username) {
            return Err(DomainError::Validation {
                message: "Username must be 3-50 characters".to_string(),
            });
        }
        if password.chars().count() < self.config.min_password_length {
            return Err(DomainError::Validation {
                message: format!(
                    "Password must be at least {} characters",
                    self.config.min_password_length
                ),
            });
        }

        // Step 2: reject duplicates
        if self.user_repository.find_by_email(email).await?.is_some() {
            return Err(DomainError::Auth(AuthError::UserAlreadyExists));
        }
        if self
            .user_repository
            .find_by_username(username)
            .await?
            .is_some()
        {
            return Err(DomainError::Auth(AuthError::UsernameTaken));
        }

        // Step 3: create the unconfirmed account
        let password_hash = self.password_hasher.hash(password)?;
        let mut user = User::new(username.to_string(), email.to_string(), password_hash);
        user.first_name = first_name;
        user.last_name = last_name;

        let confirmation_token = security_token();
        user.email_confirmation_token = Some(confirmation_token.clone());

        let user = self.user_repository.create(user).await?;

        // Step 4: send the confirmation link
        self.email_sender
            .send_confirmation_email(&user.email, user.id, &confirmation_token)
            .await?;

        tracing::info!(user_id = %user.id, "user registered");

        Ok(AuthResponse::success(
            "Registration successful. Please check your email to confirm your account.",
        ))
    }

    /// Authenticate a user and issue a token pair.
    ///
    /// Unknown email and wrong password produce the same denial so the
    /// response does not reveal which accounts exist. The deactivated and
    /// unconfirmed checks run before password verification, mirroring the
    /// original flow; the resulting existence leak is a recorded tradeoff.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Tokens issued, refresh value persisted
    /// * `Err(DomainError)` - Denied (invalid credentials, deactivated,
    ///   unconfirmed, locked)
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        // Step 1: resolve the account
        let mut user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidCredentials))?;

        // Step 2: account status checks
        if !user.is_active {
            return Err(DomainError::Auth(AuthError::AccountDeactivated));
        }
        if !user.email_confirmed {
            return Err(DomainError::Auth(AuthError::EmailNotConfirmed));
        }
        if user.is_locked_out(Utc::now()) {
            tracing::warn!(user_id = %user.id, "login attempt while locked out");
            return Err(DomainError::Auth(AuthError::AccountLocked));
        }

        // Step 3: verify the password, applying the lockout policy on failure
        if !self
            .password_hasher
            .verify(password, &user.password_hash)?
        {
            let locked = user.record_failed_login(
                self.config.max_failed_logins,
                self.config.lockout_minutes,
            );
            self.user_repository.update(user.clone()).await?;

            if locked {
                tracing::warn!(user_id = %user.id, "account locked after repeated failures");
                return Err(DomainError::Auth(AuthError::AccountLocked));
            }
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        // Step 4: clear any stale lockout state
        if user.failed_login_attempts > 0 || user.lockout_until.is_some() {
            user.reset_lockout();
            user = self.user_repository.update(user).await?;
        }

        // Step 5: issue the pair and persist the new refresh value
        let pair = self.issue_token_pair(&user).await?;

        tracing::info!(user_id = %user.id, "user logged in");

        Ok(AuthResponse::with_tokens(
            "Login successful.",
            pair,
            UserProfile::from(&user),
        ))
    }

    /// Exchange an expired access token plus the current refresh value for a
    /// fresh pair (full rotation).
    ///
    /// The access token is verified with the expiry check disabled: it only
    /// serves as a cryptographically authentic pointer to the account. The
    /// presented refresh value must match the stored one exactly and be
    /// unexpired; the overwrite is a conditional update so that of two
    /// concurrent rotations with the same value exactly one succeeds.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - New pair; the old refresh value is now dead
    /// * `Err(DomainError)` - `InvalidToken` or `InvalidRefreshToken`
    pub async fn refresh_token(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> DomainResult<AuthResponse> {
        // Step 1: recover identity from the (possibly expired) access token
        let claims = self
            .token_service
            .decode_expired(access_token)
            .map_err(|_| DomainError::Token(TokenError::InvalidToken))?;

        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidToken))?;

        // Step 2: the stored refresh value must match and be live
        let now = Utc::now();
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Token(TokenError::InvalidRefreshToken))?;

        if !refresh_value_matches(&user, refresh_token, now) {
            tracing::warn!(user_id = %user.id, "refresh denied: value mismatch or expired");
            return Err(DomainError::Token(TokenError::InvalidRefreshToken));
        }

        // Step 3: issue the replacement pair
        let new_access = self.token_service.issue_access_token(
            user.id,
            &user.email,
            user.display_name(),
            &user.roles,
        )?;
        let new_refresh = self.token_service.generate_refresh_token();
        let access_expires = self.token_service.access_token_expiry();
        let refresh_expires = self.token_service.refresh_token_expiry();

        // Step 4: rotate conditionally; a conflict is retried exactly once
        // after re-reading, then surfaced as a race loss.
        let mut rotated = self
            .user_repository
            .rotate_refresh_token(user.id, refresh_token, &new_refresh, refresh_expires)
            .await?;

        if !rotated {
            let current = self
                .user_repository
                .find_by_id(user.id)
                .await?
                .ok_or(DomainError::Token(TokenError::InvalidRefreshToken))?;
            if !refresh_value_matches(&current, refresh_token, now) {
                // A concurrent rotation already consumed this value.
                return Err(DomainError::Token(TokenError::InvalidRefreshToken));
            }
            rotated = self
                .user_repository
                .rotate_refresh_token(user.id, refresh_token, &new_refresh, refresh_expires)
                .await?;
        }
        if !rotated {
            return Err(DomainError::Token(TokenError::InvalidRefreshToken));
        }

        tracing::debug!(user_id = %user.id, "refresh token rotated");

        let pair = TokenPair::new(new_access, new_refresh, access_expires);
        Ok(AuthResponse::with_tokens(
            "Token refreshed successfully.",
            pair,
            UserProfile::from(&user),
        ))
    }

    /// Revoke the stored refresh credential (logout).
    ///
    /// Idempotent: clearing an already-empty slot still succeeds. Cannot
    /// recall an outstanding access token; it simply ages out.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Fields cleared
    /// * `Ok(false)` - No such user (treated as success by callers)
    pub async fn logout(&self, user_id: Uuid) -> DomainResult<bool> {
        let cleared = self.user_repository.clear_refresh_token(user_id).await?;
        if cleared {
            tracing::info!(user_id = %user_id, "user logged out");
        }
        Ok(cleared)
    }

    /// Confirm a user's email address with the mailed token.
    pub async fn confirm_email(&self, user_id: Uuid, token: &str) -> DomainResult<AuthResponse> {
        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidConfirmationToken))?;

        match &user.email_confirmation_token {
            Some(stored) if constant_time_eq(stored.as_bytes(), token.as_bytes()) => {}
            _ => return Err(DomainError::Auth(AuthError::InvalidConfirmationToken)),
        }

        user.confirm_email();
        self.user_repository.update(user.clone()).await?;

        tracing::info!(user_id = %user.id, "email confirmed");

        Ok(AuthResponse::success(
            "Email confirmed successfully. You can now log in.",
        ))
    }

    /// Start the password reset flow.
    ///
    /// Always reports success so responses do not reveal whether the email
    /// is registered.
    pub async fn forgot_password(&self, email: &str) -> DomainResult<AuthResponse> {
        const MESSAGE: &str =
            "If an account with that email exists, a password reset link has been sent.";

        let Some(mut user) = self.user_repository.find_by_email(email).await? else {
            return Ok(AuthResponse::success(MESSAGE));
        };

        let reset_token = security_token();
        user.password_reset_token = Some(reset_token.clone());
        user.password_reset_expires_at =
            Some(Utc::now() + Duration::hours(self.config.reset_token_expiry_hours));
        self.user_repository.update(user.clone()).await?;

        self.email_sender
            .send_password_reset_email(&user.email, &reset_token)
            .await?;

        tracing::info!(user_id = %user.id, "password reset requested");

        Ok(AuthResponse::success(MESSAGE))
    }

    /// Complete the password reset flow.
    ///
    /// A successful reset clears the stored refresh credential as well, so
    /// any session held before the reset cannot refresh again.
    pub async fn reset_password(
        &self,
        email: &str,
        token: &str,
        new_password: &str,
    ) -> DomainResult<AuthResponse> {
        if new_password.chars().count() < self.config.min_password_length {
            return Err(DomainError::Validation {
                message: format!(
                    "Password must be at least {} characters",
                    self.config.min_password_length
                ),
            });
        }

        let mut user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidResetToken))?;

        let now = Utc::now();
        let token_valid = matches!(
            (&user.password_reset_token, user.password_reset_expires_at),
            (Some(stored), Some(expires))
                if constant_time_eq(stored.as_bytes(), token.as_bytes()) && expires > now
        );
        if !token_valid {
            return Err(DomainError::Auth(AuthError::InvalidResetToken));
        }

        user.password_hash = self.password_hasher.hash(new_password)?;
        user.password_reset_token = None;
        user.password_reset_expires_at = None;
        user.clear_refresh_token();
        self.user_repository.update(user.clone()).await?;

        tracing::info!(user_id = %user.id, "password reset completed");

        Ok(AuthResponse::success(
            "Password reset successful. You can now log in with your new password.",
        ))
    }

    /// Issues an access/refresh pair and persists the refresh value,
    /// overwriting whatever was stored (login path).
    async fn issue_token_pair(&self, user: &User) -> DomainResult<TokenPair> {
        let access_token = self.token_service.issue_access_token(
            user.id,
            &user.email,
            user.display_name(),
            &user.roles,
        )?;
        let refresh_token = self.token_service.generate_refresh_token();
        let access_expires = self.token_service.access_token_expiry();
        let refresh_expires = self.token_service.refresh_token_expiry();

        let stored = self
            .user_repository
            .store_refresh_token(user.id, &refresh_token, refresh_expires)
            .await?;
        if !stored {
            return Err(DomainError::Auth(AuthError::UserNotFound));
        }

        Ok(TokenPair::new(access_token, refresh_token, access_expires))
    }
}

/// Exact comparison of the presented refresh value against the stored slot.
///
/// No normalization; an empty slot never matches; expiry is checked lazily
/// here rather than by a background sweep.
fn refresh_value_matches(user: &User, presented: &str, now: DateTime<Utc>) -> bool {
    match (&user.refresh_token, user.refresh_token_expires_at) {
        (Some(stored), Some(expires_at)) => {
            constant_time_eq(stored.as_bytes(), presented.as_bytes()) && expires_at > now
        }
        _ => false,
    }
}

/// Random token for email confirmation / password reset links
fn security_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SECURITY_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

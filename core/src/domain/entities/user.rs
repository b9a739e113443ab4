//! User entity representing a registered account in the FriendShare system.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered account.
///
/// Besides identity and profile data the user row carries the single
/// refresh-token slot: at most one refresh credential is live per account,
/// and every new issuance overwrites the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Unique username shown to other users
    pub username: String,

    /// Unique email address, also the login key
    pub email: String,

    /// Password hash (bcrypt)
    pub password_hash: String,

    /// First name
    pub first_name: Option<String>,

    /// Last name
    pub last_name: Option<String>,

    /// Short biography
    pub bio: Option<String>,

    /// URL of the profile photo
    pub photo_url: Option<String>,

    /// Role names granted to the user
    pub roles: Vec<String>,

    /// Whether the email address has been confirmed
    pub email_confirmed: bool,

    /// Whether the account is active (false = deactivated)
    pub is_active: bool,

    /// Consecutive failed login attempts since the last success
    pub failed_login_attempts: i32,

    /// Until when the account is locked out, if at all
    pub lockout_until: Option<DateTime<Utc>>,

    /// Currently live refresh token value, if any
    pub refresh_token: Option<String>,

    /// Expiry of the stored refresh token
    pub refresh_token_expires_at: Option<DateTime<Utc>>,

    /// Pending email confirmation token
    pub email_confirmation_token: Option<String>,

    /// Pending password reset token
    pub password_reset_token: Option<String>,

    /// Expiry of the pending password reset token
    pub password_reset_expires_at: Option<DateTime<Utc>>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new unconfirmed user with the given credentials
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            first_name: None,
            last_name: None,
            bio: None,
            photo_url: None,
            roles: Vec::new(),
            email_confirmed: false,
            is_active: true,
            failed_login_attempts: 0,
            lockout_until: None,
            refresh_token: None,
            refresh_token_expires_at: None,
            email_confirmation_token: None,
            password_reset_token: None,
            password_reset_expires_at: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Marks the email address as confirmed and clears the pending token
    pub fn confirm_email(&mut self) {
        self.email_confirmed = true;
        self.email_confirmation_token = None;
        self.touch();
    }

    /// Deactivates the account
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    /// Checks whether the account is locked out at `now`
    pub fn is_locked_out(&self, now: DateTime<Utc>) -> bool {
        matches!(self.lockout_until, Some(until) if until > now)
    }

    /// Records a failed login attempt.
    ///
    /// Locks the account for `lockout_minutes` once `max_attempts` is
    /// reached and returns `true` when this attempt triggered the lockout.
    pub fn record_failed_login(&mut self, max_attempts: i32, lockout_minutes: i64) -> bool {
        self.failed_login_attempts += 1;
        self.touch();
        if self.failed_login_attempts >= max_attempts {
            self.lockout_until = Some(Utc::now() + Duration::minutes(lockout_minutes));
            self.failed_login_attempts = 0;
            return true;
        }
        false
    }

    /// Clears the lockout state after a successful login
    pub fn reset_lockout(&mut self) {
        self.failed_login_attempts = 0;
        self.lockout_until = None;
        self.touch();
    }

    /// Stores a new refresh token, overwriting any previous one
    pub fn set_refresh_token(&mut self, value: String, expires_at: DateTime<Utc>) {
        self.refresh_token = Some(value);
        self.refresh_token_expires_at = Some(expires_at);
        self.touch();
    }

    /// Clears both refresh fields (logout / forced re-login)
    pub fn clear_refresh_token(&mut self) {
        self.refresh_token = None;
        self.refresh_token_expires_at = None;
        self.touch();
    }

    /// Display name used in token claims: the username
    pub fn display_name(&self) -> &str {
        &self.username
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "$2b$04$hash".to_string(),
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = test_user();

        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert!(!user.email_confirmed);
        assert!(user.is_active);
        assert_eq!(user.failed_login_attempts, 0);
        assert!(user.refresh_token.is_none());
        assert!(user.refresh_token_expires_at.is_none());
    }

    #[test]
    fn test_confirm_email() {
        let mut user = test_user();
        user.email_confirmation_token = Some("token".to_string());

        user.confirm_email();

        assert!(user.email_confirmed);
        assert!(user.email_confirmation_token.is_none());
        assert!(user.updated_at.is_some());
    }

    #[test]
    fn test_failed_login_below_limit() {
        let mut user = test_user();

        assert!(!user.record_failed_login(5, 15));
        assert_eq!(user.failed_login_attempts, 1);
        assert!(!user.is_locked_out(Utc::now()));
    }

    #[test]
    fn test_failed_login_triggers_lockout() {
        let mut user = test_user();
        user.failed_login_attempts = 4;

        assert!(user.record_failed_login(5, 15));
        assert!(user.is_locked_out(Utc::now()));
        assert_eq!(user.failed_login_attempts, 0);
    }

    #[test]
    fn test_lockout_expires() {
        let mut user = test_user();
        user.lockout_until = Some(Utc::now() - Duration::minutes(1));

        assert!(!user.is_locked_out(Utc::now()));
    }

    #[test]
    fn test_reset_lockout() {
        let mut user = test_user();
        user.failed_login_attempts = 3;
        user.lockout_until = Some(Utc::now() + Duration::minutes(10));

        user.reset_lockout();

        assert_eq!(user.failed_login_attempts, 0);
        assert!(user.lockout_until.is_none());
    }

    #[test]
    fn test_refresh_token_overwrite() {
        let mut user = test_user();
        let first_expiry = Utc::now() + Duration::days(7);

        user.set_refresh_token("first".to_string(), first_expiry);
        assert_eq!(user.refresh_token.as_deref(), Some("first"));

        let second_expiry = Utc::now() + Duration::days(7);
        user.set_refresh_token("second".to_string(), second_expiry);
        assert_eq!(user.refresh_token.as_deref(), Some("second"));
        assert_eq!(user.refresh_token_expires_at, Some(second_expiry));
    }

    #[test]
    fn test_clear_refresh_token() {
        let mut user = test_user();
        user.set_refresh_token("value".to_string(), Utc::now() + Duration::days(7));

        user.clear_refresh_token();

        assert!(user.refresh_token.is_none());
        assert!(user.refresh_token_expires_at.is_none());
    }
}

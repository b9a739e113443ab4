//! Public projection of a user account.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::User;

/// User profile as exposed to clients.
///
/// Never carries the password hash, lockout counters or token fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User ID
    pub id: Uuid,

    /// Username
    pub username: String,

    /// Email address
    pub email: String,

    /// First name
    pub first_name: Option<String>,

    /// Last name
    pub last_name: Option<String>,

    /// Short biography
    pub bio: Option<String>,

    /// URL of the profile photo
    pub photo_url: Option<String>,

    /// Whether the email address has been confirmed
    pub email_confirmed: bool,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            bio: user.bio.clone(),
            photo_url: user.photo_url.clone(),
            email_confirmed: user.email_confirmed,
        }
    }
}

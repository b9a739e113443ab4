//! Request and response DTOs for the user profile endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use fs_core::domain::value_objects::UserProfile;

/// User profile as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub email_confirmed: bool,
}

impl From<UserProfile> for UserDto {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            username: profile.username,
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            bio: profile.bio,
            photo_url: profile.photo_url,
            email_confirmed: profile.email_confirmed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 50))]
    pub first_name: Option<String>,
    #[validate(length(max = 50))]
    pub last_name: Option<String>,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    #[validate(url, length(max = 500))]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 8, max = 100))]
    pub new_password: String,
    #[validate(must_match = "new_password")]
    pub confirm_password: String,
}

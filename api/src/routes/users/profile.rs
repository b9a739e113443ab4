//! Handlers for the authenticated user's own profile
//! (`/api/v1/users/me`).

use actix_web::{http::StatusCode, web, HttpResponse};
use serde_json::json;
use validator::Validate;

use fs_core::repositories::UserRepository;
use fs_core::services::auth::PasswordHasher;
use fs_core::services::email::EmailSender;
use fs_core::services::user::ProfileUpdate;

use crate::dto::auth::AuthResponseDto;
use crate::dto::user::{ChangePasswordRequest, UpdateProfileRequest, UserDto};
use crate::dto::ErrorResponse;
use crate::handlers::{handle_domain_error, validation_failed};
use crate::middleware::AuthContext;
use crate::routes::auth::AppState;

fn profile_not_found() -> HttpResponse {
    ErrorResponse::new("USER_NOT_FOUND", "User not found").to_response(StatusCode::NOT_FOUND)
}

/// Handler for GET /api/v1/users/me (requires authentication)
pub async fn get_me<U, P, E>(
    state: web::Data<AppState<U, P, E>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PasswordHasher + 'static,
    E: EmailSender + 'static,
{
    match state.user_service.get_profile(auth.user_id).await {
        Ok(Some(profile)) => HttpResponse::Ok().json(UserDto::from(profile)),
        Ok(None) => profile_not_found(),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PUT /api/v1/users/me (requires authentication)
///
/// Applies a partial profile update; omitted fields keep their values.
pub async fn update_me<U, P, E>(
    state: web::Data<AppState<U, P, E>>,
    auth: AuthContext,
    request: web::Json<UpdateProfileRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PasswordHasher + 'static,
    E: EmailSender + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_failed(errors);
    }

    let changes = ProfileUpdate {
        first_name: request.first_name.clone(),
        last_name: request.last_name.clone(),
        bio: request.bio.clone(),
        photo_url: request.photo_url.clone(),
    };

    match state.user_service.update_profile(auth.user_id, changes).await {
        Ok(Some(profile)) => HttpResponse::Ok().json(UserDto::from(profile)),
        Ok(None) => profile_not_found(),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/users/me/password (requires authentication)
///
/// Changes the password after verifying the current one; the stored refresh
/// credential is cleared, so the client must log in again.
pub async fn change_password<U, P, E>(
    state: web::Data<AppState<U, P, E>>,
    auth: AuthContext,
    request: web::Json<ChangePasswordRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PasswordHasher + 'static,
    E: EmailSender + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_failed(errors);
    }

    match state
        .user_service
        .change_password(
            auth.user_id,
            &request.current_password,
            &request.new_password,
        )
        .await
    {
        Ok(response) => HttpResponse::Ok().json(AuthResponseDto::from(response)),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for DELETE /api/v1/users/me (requires authentication)
pub async fn delete_me<U, P, E>(
    state: web::Data<AppState<U, P, E>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PasswordHasher + 'static,
    E: EmailSender + 'static,
{
    match state.user_service.delete_account(auth.user_id).await {
        Ok(true) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Account deleted."
        })),
        Ok(false) => profile_not_found(),
        Err(error) => handle_domain_error(error),
    }
}

use actix_web::{web, HttpResponse};
use validator::Validate;

use fs_core::repositories::UserRepository;
use fs_core::services::auth::PasswordHasher;
use fs_core::services::email::EmailSender;

use crate::dto::auth::{AuthResponseDto, ResetPasswordRequest};
use crate::handlers::{handle_domain_error, validation_failed};

use super::AppState;

/// Handler for POST /api/v1/auth/reset-password
///
/// Completes the password reset flow. A successful reset also clears the
/// stored refresh credential, so pre-reset sessions cannot refresh again.
///
/// # Responses
/// - 200 OK: password replaced
/// - 400 Bad Request: invalid or expired reset token
pub async fn reset_password<U, P, E>(
    state: web::Data<AppState<U, P, E>>,
    request: web::Json<ResetPasswordRequest>,
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
        .auth_service
        .reset_password(&request.email, &request.token, &request.new_password)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(AuthResponseDto::from(response)),
        Err(error) => handle_domain_error(error),
    }
}

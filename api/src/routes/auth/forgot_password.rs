use actix_web::{web, HttpResponse};
use validator::Validate;

use fs_core::repositories::UserRepository;
use fs_core::services::auth::PasswordHasher;
use fs_core::services::email::EmailSender;

use crate::dto::auth::{AuthResponseDto, ForgotPasswordRequest};
use crate::handlers::{handle_domain_error, validation_failed};

use super::AppState;

/// Handler for POST /api/v1/auth/forgot-password
///
/// Starts the password reset flow. The response is identical whether or not
/// the email belongs to an account.
///
/// # Responses
/// - 200 OK: always, when the input validates
pub async fn forgot_password<U, P, E>(
    state: web::Data<AppState<U, P, E>>,
    request: web::Json<ForgotPasswordRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PasswordHasher + 'static,
    E: EmailSender + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_failed(errors);
    }

    match state.auth_service.forgot_password(&request.email).await {
        Ok(response) => HttpResponse::Ok().json(AuthResponseDto::from(response)),
        Err(error) => handle_domain_error(error),
    }
}

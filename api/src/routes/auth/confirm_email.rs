use actix_web::{web, HttpResponse};
use validator::Validate;

use fs_core::repositories::UserRepository;
use fs_core::services::auth::PasswordHasher;
use fs_core::services::email::EmailSender;

use crate::dto::auth::{AuthResponseDto, ConfirmEmailRequest};
use crate::handlers::{handle_domain_error, validation_failed};

use super::AppState;

/// Handler for POST /api/v1/auth/confirm-email
///
/// Confirms a user's email address with the mailed token.
///
/// # Responses
/// - 200 OK: email confirmed
/// - 400 Bad Request: unknown user or token mismatch
pub async fn confirm_email<U, P, E>(
    state: web::Data<AppState<U, P, E>>,
    request: web::Json<ConfirmEmailRequest>,
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
        .confirm_email(request.user_id, &request.token)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(AuthResponseDto::from(response)),
        Err(error) => handle_domain_error(error),
    }
}

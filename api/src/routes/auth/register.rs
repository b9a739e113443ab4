use actix_web::{web, HttpResponse};
use validator::Validate;

use fs_core::repositories::UserRepository;
use fs_core::services::auth::PasswordHasher;
use fs_core::services::email::EmailSender;

use crate::dto::auth::{AuthResponseDto, RegisterRequest};
use crate::handlers::{handle_domain_error, validation_failed};

use super::AppState;

/// Handler for POST /api/v1/auth/register
///
/// Creates an unconfirmed account and emails a confirmation link.
///
/// # Responses
/// - 200 OK: registration accepted, confirmation email sent
/// - 400 Bad Request: validation failure
/// - 409 Conflict: email or username already in use
pub async fn register<U, P, E>(
    state: web::Data<AppState<U, P, E>>,
    request: web::Json<RegisterRequest>,
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
        .register(
            &request.username,
            &request.email,
            &request.password,
            request.first_name.clone(),
            request.last_name.clone(),
        )
        .await
    {
        Ok(response) => HttpResponse::Ok().json(AuthResponseDto::from(response)),
        Err(error) => handle_domain_error(error),
    }
}

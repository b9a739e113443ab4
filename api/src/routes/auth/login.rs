use actix_web::{web, HttpResponse};
use validator::Validate;

use fs_core::repositories::UserRepository;
use fs_core::services::auth::PasswordHasher;
use fs_core::services::email::EmailSender;

use crate::dto::auth::{AuthResponseDto, LoginRequest};
use crate::handlers::{handle_domain_error, validation_failed};

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Authenticates with email and password and returns an access/refresh pair.
///
/// # Responses
/// - 200 OK: tokens issued
/// - 401 Unauthorized: invalid email or password
/// - 403 Forbidden: deactivated, unconfirmed or locked account
pub async fn login<U, P, E>(
    state: web::Data<AppState<U, P, E>>,
    request: web::Json<LoginRequest>,
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
        .login(&request.email, &request.password)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(AuthResponseDto::from(response)),
        Err(error) => handle_domain_error(error),
    }
}

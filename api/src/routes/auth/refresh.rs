use actix_web::{web, HttpResponse};
use validator::Validate;

use fs_core::repositories::UserRepository;
use fs_core::services::auth::PasswordHasher;
use fs_core::services::email::EmailSender;

use crate::dto::auth::{AuthResponseDto, RefreshTokenRequest};
use crate::handlers::{handle_domain_error, validation_failed};

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges an expired access token plus the current refresh token for a
/// fresh pair. The old refresh value is dead after a successful call.
///
/// # Request Body
///
/// ```json
/// {
///     "token": "expired-access-jwt",
///     "refresh_token": "opaque-refresh-value"
/// }
/// ```
///
/// # Responses
/// - 200 OK: new pair issued
/// - 401 Unauthorized: invalid access token, or refresh value mismatch/expired
pub async fn refresh<U, P, E>(
    state: web::Data<AppState<U, P, E>>,
    request: web::Json<RefreshTokenRequest>,
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
        .refresh_token(&request.token, &request.refresh_token)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(AuthResponseDto::from(response)),
        Err(error) => handle_domain_error(error),
    }
}

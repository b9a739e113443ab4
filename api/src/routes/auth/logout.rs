use actix_web::{web, HttpResponse};
use serde_json::json;

use fs_core::repositories::UserRepository;
use fs_core::services::auth::PasswordHasher;
use fs_core::services::email::EmailSender;

use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;

use super::AppState;

/// Handler for POST /api/v1/auth/logout (requires authentication)
///
/// Clears the stored refresh credential. Idempotent: logging out twice, or
/// with no live refresh credential, still succeeds. Outstanding access
/// tokens cannot be recalled; they expire on their own.
///
/// # Responses
/// - 200 OK: refresh credential revoked
/// - 401 Unauthorized: missing or invalid access token
pub async fn logout<U, P, E>(
    state: web::Data<AppState<U, P, E>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    P: PasswordHasher + 'static,
    E: EmailSender + 'static,
{
    match state.auth_service.logout(auth.user_id).await {
        // A missing account is still a completed logout.
        Ok(_) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Logged out successfully."
        })),
        Err(error) => handle_domain_error(error),
    }
}

//! Mapping from domain errors to HTTP responses.

use actix_web::{http::StatusCode, HttpResponse};
use std::collections::HashMap;

use fs_core::errors::{AuthError, DomainError, TokenError};

use crate::dto::ErrorResponse;

/// Convert a domain error into an HTTP response with a stable error code.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let (status, code) = classify(&error);

    // Internal details never reach the client.
    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(%error, "internal error");
        "An internal error occurred".to_string()
    } else {
        error.to_string()
    };

    ErrorResponse::new(code, message).to_response(status)
}

/// Convert request-validation failures into a 400 with field details.
pub fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    let details: HashMap<String, Vec<String>> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();

    ErrorResponse::new("VALIDATION_FAILED", "Request validation failed")
        .with_details(details)
        .to_response(StatusCode::BAD_REQUEST)
}

fn classify(error: &DomainError) -> (StatusCode, &'static str) {
    match error {
        DomainError::Auth(auth) => match auth {
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            AuthError::AccountDeactivated => (StatusCode::FORBIDDEN, "ACCOUNT_DEACTIVATED"),
            AuthError::EmailNotConfirmed => (StatusCode::FORBIDDEN, "EMAIL_NOT_CONFIRMED"),
            AuthError::AccountLocked => (StatusCode::FORBIDDEN, "ACCOUNT_LOCKED"),
            AuthError::UserAlreadyExists => (StatusCode::CONFLICT, "USER_ALREADY_EXISTS"),
            AuthError::UsernameTaken => (StatusCode::CONFLICT, "USERNAME_TAKEN"),
            AuthError::UserNotFound => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
            AuthError::InvalidConfirmationToken => {
                (StatusCode::BAD_REQUEST, "INVALID_CONFIRMATION_TOKEN")
            }
            AuthError::InvalidResetToken => (StatusCode::BAD_REQUEST, "INVALID_RESET_TOKEN"),
        },
        DomainError::Token(token) => match token {
            TokenError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            TokenError::InvalidSignature => (StatusCode::UNAUTHORIZED, "INVALID_SIGNATURE"),
            TokenError::TokenExpired => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
            TokenError::InvalidRefreshToken => {
                (StatusCode::UNAUTHORIZED, "INVALID_REFRESH_TOKEN")
            }
            TokenError::MissingClaim { .. } => (StatusCode::UNAUTHORIZED, "MISSING_CLAIM"),
            TokenError::TokenGenerationFailed | TokenError::WeakSecret { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "TOKEN_ERROR")
            }
        },
        DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        DomainError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denials_map_to_expected_statuses() {
        let cases = [
            (
                DomainError::Auth(AuthError::InvalidCredentials),
                StatusCode::UNAUTHORIZED,
            ),
            (
                DomainError::Auth(AuthError::AccountLocked),
                StatusCode::FORBIDDEN,
            ),
            (
                DomainError::Auth(AuthError::EmailNotConfirmed),
                StatusCode::FORBIDDEN,
            ),
            (
                DomainError::Auth(AuthError::UserAlreadyExists),
                StatusCode::CONFLICT,
            ),
            (
                DomainError::Token(TokenError::InvalidToken),
                StatusCode::UNAUTHORIZED,
            ),
            (
                DomainError::Token(TokenError::InvalidRefreshToken),
                StatusCode::UNAUTHORIZED,
            ),
            (
                DomainError::Internal {
                    message: "boom".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let response = handle_domain_error(error);
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_internal_error_body_is_generic() {
        let response = handle_domain_error(DomainError::Internal {
            message: "connection refused to db-host:3306".to_string(),
        });
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // The original message stays in the logs, not in the body.
    }
}

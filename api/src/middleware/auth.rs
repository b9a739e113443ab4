//! JWT authentication middleware for protecting API endpoints.
//!
//! Extracts the bearer token from the Authorization header, verifies it
//! through the credential signer (full validation, expiry included) and
//! injects an [`AuthContext`] into the request extensions.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use fs_core::domain::entities::token::Claims;
use fs_core::errors::{DomainError, TokenError};
use fs_core::services::token::TokenService;

/// User authentication context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID extracted from JWT claims
    pub user_id: Uuid,
    /// Email address from the claims
    pub email: String,
    /// Display name from the claims
    pub username: String,
    /// Role names from the claims
    pub roles: Vec<String>,
    /// JWT ID for tracing
    pub jti: String,
}

impl AuthContext {
    /// Creates a new authentication context from JWT claims
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidToken))?;
        Ok(Self {
            user_id,
            email: claims.email,
            username: claims.name,
            roles: claims.roles,
            jti: claims.jti,
        })
    }
}

/// JWT authentication middleware factory
pub struct JwtAuth {
    token_service: Arc<TokenService>,
}

impl JwtAuth {
    /// Creates a new JWT authentication middleware around the signer
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            token_service: self.token_service.clone(),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token_service = self.token_service.clone();

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    return Err(ErrorUnauthorized("Missing or invalid Authorization header"));
                }
            };

            let claims = token_service
                .verify_access_token(&token)
                .map_err(|_| ErrorUnauthorized("Token verification failed"))?;
            let auth_context = AuthContext::from_claims(claims)
                .map_err(|_| ErrorUnauthorized("Invalid token claims"))?;

            req.extensions_mut().insert(auth_context);

            service.call(req).await
        })
    }
}

/// Extracts the Bearer token from the Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        use actix_web::test;

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();

        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();

        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    #[test]
    fn test_auth_context_from_claims() {
        use chrono::Duration;

        let user_id = Uuid::new_v4();
        let claims = Claims::new_access_token(
            user_id,
            "alice@example.com",
            "alice",
            &["User".to_string()],
            "friendshare",
            "friendshare-api",
            Duration::minutes(15),
        );

        let context = AuthContext::from_claims(claims).unwrap();
        assert_eq!(context.user_id, user_id);
        assert_eq!(context.username, "alice");
        assert_eq!(context.roles, vec!["User".to_string()]);
    }

    #[test]
    fn test_auth_context_rejects_bad_subject() {
        use chrono::Duration;

        let mut claims = Claims::new_access_token(
            Uuid::new_v4(),
            "alice@example.com",
            "alice",
            &[],
            "friendshare",
            "friendshare-api",
            Duration::minutes(15),
        );
        claims.sub = "garbage".to_string();

        assert!(AuthContext::from_claims(claims).is_err());
    }
}

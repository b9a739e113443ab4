//! End-to-end tests for the authentication endpoints.
//!
//! Drives the full HTTP surface against an in-memory repository: register,
//! confirm, login, refresh (with rotation), logout.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::{http::StatusCode, test, web};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use fs_api::app::create_app;
use fs_api::routes::AppState;
use fs_core::domain::entities::user::User;
use fs_core::errors::{AuthError, DomainError};
use fs_core::repositories::UserRepository;
use fs_core::services::auth::{AuthService, AuthServiceConfig, PasswordHasher};
use fs_core::services::email::EmailSender;
use fs_core::services::token::{TokenConfig, TokenService};
use fs_core::services::user::UserService;
use fs_shared::config::ServerConfig;

const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

// ---- in-memory collaborators ----

struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Auth(AuthError::UserAlreadyExists));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.users.write().await.remove(&id).is_some())
    }

    async fn store_refresh_token(
        &self,
        id: Uuid,
        value: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.set_refresh_token(value.to_string(), expires_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        current_value: &str,
        new_value: &str,
        new_expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) if user.refresh_token.as_deref() == Some(current_value) => {
                user.set_refresh_token(new_value.to_string(), new_expires_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn clear_refresh_token(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.clear_refresh_token();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

struct PlainPasswordHasher;

impl PasswordHasher for PlainPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, DomainError> {
        Ok(password_hash == format!("plain:{password}"))
    }
}

struct CapturingEmailSender {
    confirmations: Mutex<Vec<(String, Uuid, String)>>,
}

impl CapturingEmailSender {
    fn new() -> Self {
        Self {
            confirmations: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl EmailSender for CapturingEmailSender {
    async fn send_confirmation_email(
        &self,
        email: &str,
        user_id: Uuid,
        token: &str,
    ) -> Result<(), DomainError> {
        self.confirmations.lock().unwrap().push((
            email.to_string(),
            user_id,
            token.to_string(),
        ));
        Ok(())
    }

    async fn send_password_reset_email(&self, _: &str, _: &str) -> Result<(), DomainError> {
        Ok(())
    }
}

type TestState = AppState<InMemoryUserRepository, PlainPasswordHasher, CapturingEmailSender>;

fn build_state() -> (web::Data<TestState>, Arc<CapturingEmailSender>) {
    let repo = Arc::new(InMemoryUserRepository::new());
    let hasher = Arc::new(PlainPasswordHasher);
    let email = Arc::new(CapturingEmailSender::new());
    let token_service = Arc::new(
        TokenService::new(TokenConfig {
            secret: TEST_SECRET.to_string(),
            ..Default::default()
        })
        .expect("valid test token config"),
    );

    let auth_service = Arc::new(AuthService::new(
        repo.clone(),
        hasher.clone(),
        email.clone(),
        token_service.clone(),
        AuthServiceConfig::default(),
    ));
    let user_service = Arc::new(UserService::new(repo, hasher));

    (
        web::Data::new(AppState::new(auth_service, user_service, token_service)),
        email,
    )
}

macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri($uri)
            .set_json($body)
            .to_request();
        let resp = test::call_service($app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

/// Issues a request expected to be rejected by the auth middleware.
///
/// Middleware denials surface as service errors; the status lives on the
/// error's response representation.
macro_rules! expect_unauthorized {
    ($app:expr, $req:expr) => {{
        match test::try_call_service($app, $req).await {
            Ok(resp) => assert_eq!(resp.status(), StatusCode::UNAUTHORIZED),
            Err(e) => assert_eq!(
                e.as_response_error().status_code(),
                StatusCode::UNAUTHORIZED
            ),
        }
    }};
}

#[actix_web::test]
async fn test_register_confirm_login_refresh_logout_flow() {
    let (state, email) = build_state();
    let app = test::init_service(create_app(state, &ServerConfig::default())).await;

    // Register.
    let (status, body) = post_json!(
        &app,
        "/api/v1/auth/register",
        json!({
            "username": "alice",
            "email": "alice@x.com",
            "password": "password123",
            "confirm_password": "password123"
        })
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(body.get("access_token").is_none());

    // Login before confirmation is refused.
    let (status, body) = post_json!(
        &app,
        "/api/v1/auth/login",
        json!({ "email": "alice@x.com", "password": "password123" })
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], json!("EMAIL_NOT_CONFIRMED"));

    // Confirm with the mailed token.
    let (_, user_id, token) = email.confirmations.lock().unwrap()[0].clone();
    let (status, _body) = post_json!(
        &app,
        "/api/v1/auth/confirm-email",
        json!({ "user_id": user_id, "token": token })
    );
    assert_eq!(status, StatusCode::OK);

    // Login now succeeds and returns a pair.
    let (status, login_body) = post_json!(
        &app,
        "/api/v1/auth/login",
        json!({ "email": "alice@x.com", "password": "password123" })
    );
    assert_eq!(status, StatusCode::OK);
    let access = login_body["access_token"].as_str().unwrap().to_string();
    let first_refresh = login_body["refresh_token"].as_str().unwrap().to_string();
    assert_eq!(login_body["user"]["username"], json!("alice"));

    // Refresh rotates the refresh value.
    let (status, refresh_body) = post_json!(
        &app,
        "/api/v1/auth/refresh",
        json!({ "token": access, "refresh_token": first_refresh })
    );
    assert_eq!(status, StatusCode::OK);
    let second_refresh = refresh_body["refresh_token"].as_str().unwrap().to_string();
    assert_ne!(second_refresh, first_refresh);

    // The stale value is dead.
    let (status, body) = post_json!(
        &app,
        "/api/v1/auth/refresh",
        json!({ "token": access, "refresh_token": first_refresh })
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], json!("INVALID_REFRESH_TOKEN"));

    // Logout with the bearer token.
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(("Authorization", format!("Bearer {access}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // No refresh value survives a logout.
    let (status, _body) = post_json!(
        &app,
        "/api/v1/auth/refresh",
        json!({ "token": access, "refresh_token": second_refresh })
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_login_denials() {
    let (state, _email) = build_state();
    let app = test::init_service(create_app(state, &ServerConfig::default())).await;

    let (status, body) = post_json!(
        &app,
        "/api/v1/auth/login",
        json!({ "email": "ghost@x.com", "password": "whatever" })
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], json!("INVALID_CREDENTIALS"));

    let (status, body) = post_json!(
        &app,
        "/api/v1/auth/login",
        json!({ "email": "not-an-email", "password": "whatever" })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("VALIDATION_FAILED"));
}

#[actix_web::test]
async fn test_profile_routes_require_authentication() {
    let (state, email) = build_state();
    let app = test::init_service(create_app(state, &ServerConfig::default())).await;

    // No token: rejected before any handler runs.
    let req = test::TestRequest::get().uri("/api/v1/users/me").to_request();
    expect_unauthorized!(&app, req);

    // Register + confirm + login to obtain a token.
    let _ = post_json!(
        &app,
        "/api/v1/auth/register",
        json!({
            "username": "bob",
            "email": "bob@x.com",
            "password": "password123",
            "confirm_password": "password123"
        })
    );
    let (_, user_id, token) = email.confirmations.lock().unwrap()[0].clone();
    let _ = post_json!(
        &app,
        "/api/v1/auth/confirm-email",
        json!({ "user_id": user_id, "token": token })
    );
    let (_, login_body) = post_json!(
        &app,
        "/api/v1/auth/login",
        json!({ "email": "bob@x.com", "password": "password123" })
    );
    let access = login_body["access_token"].as_str().unwrap().to_string();

    // With the token the profile is readable and editable.
    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(("Authorization", format!("Bearer {access}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let profile: Value = test::read_body_json(resp).await;
    assert_eq!(profile["username"], json!("bob"));

    let req = test::TestRequest::put()
        .uri("/api/v1/users/me")
        .insert_header(("Authorization", format!("Bearer {access}")))
        .set_json(json!({ "bio": "hello there" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let profile: Value = test::read_body_json(resp).await;
    assert_eq!(profile["bio"], json!("hello there"));

    // A garbage token never reaches the handler.
    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    expect_unauthorized!(&app, req);
}

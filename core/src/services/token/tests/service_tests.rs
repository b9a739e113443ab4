//! Unit tests for the token service

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenConfig, TokenService};

const TEST_SECRET: &str = "unit-test-signing-secret-0123456789abcdef";

fn test_config() -> TokenConfig {
    TokenConfig {
        secret: TEST_SECRET.to_string(),
        ..Default::default()
    }
}

fn test_service() -> TokenService {
    TokenService::new(test_config()).expect("valid test config")
}

/// Signs arbitrary claims with the test secret, bypassing the service
fn sign_raw(claims: &Claims, secret: &str) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// Claims that expired five minutes ago (beyond the default leeway)
fn expired_claims(user_id: Uuid) -> Claims {
    let config = test_config();
    Claims::new_access_token(
        user_id,
        "alice@example.com",
        "alice",
        &[],
        &config.issuer,
        &config.audience,
        Duration::minutes(-5),
    )
}

#[test]
fn test_weak_secret_is_fatal() {
    let config = TokenConfig {
        secret: "short".to_string(),
        ..Default::default()
    };

    match TokenService::new(config) {
        Err(DomainError::Token(TokenError::WeakSecret { .. })) => {}
        other => panic!("expected WeakSecret, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_issue_and_verify_round_trip() {
    let service = test_service();
    let user_id = Uuid::new_v4();
    let roles = vec!["User".to_string()];

    let token = service
        .issue_access_token(user_id, "alice@example.com", "alice", &roles)
        .unwrap();
    let claims = service.verify_access_token(&token).unwrap();

    assert_eq!(claims.user_id().unwrap(), user_id);
    assert_eq!(claims.email, "alice@example.com");
    assert_eq!(claims.name, "alice");
    assert_eq!(claims.roles, roles);
    assert_eq!(claims.iss, "friendshare");
    assert_eq!(claims.aud, "friendshare-api");
}

#[test]
fn test_verify_rejects_expired_token() {
    let service = test_service();
    let token = sign_raw(&expired_claims(Uuid::new_v4()), TEST_SECRET);

    match service.verify_access_token(&token) {
        Err(DomainError::Token(TokenError::TokenExpired)) => {}
        other => panic!("expected TokenExpired, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_decode_expired_accepts_expired_token() {
    let service = test_service();
    let user_id = Uuid::new_v4();
    let token = sign_raw(&expired_claims(user_id), TEST_SECRET);

    let claims = service.decode_expired(&token).unwrap();
    assert_eq!(claims.user_id().unwrap(), user_id);
    assert!(claims.is_expired());
}

#[test]
fn test_decode_expired_rejects_tampered_signature() {
    let service = test_service();
    let token = sign_raw(&expired_claims(Uuid::new_v4()), TEST_SECRET);

    // Flip the last signature character; everything else is byte-identical.
    let mut tampered = token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    assert!(service.decode_expired(&tampered).is_err());
}

#[test]
fn test_decode_expired_rejects_foreign_secret() {
    let service = test_service();
    let token = sign_raw(
        &expired_claims(Uuid::new_v4()),
        "some-other-signing-secret-0123456789abcdef",
    );

    assert!(service.decode_expired(&token).is_err());
}

#[test]
fn test_decode_expired_rejects_wrong_issuer() {
    let service = test_service();
    let mut claims = expired_claims(Uuid::new_v4());
    claims.iss = "someone-else".to_string();

    let token = sign_raw(&claims, TEST_SECRET);
    assert!(service.decode_expired(&token).is_err());
}

#[test]
fn test_decode_expired_rejects_wrong_audience() {
    let service = test_service();
    let mut claims = expired_claims(Uuid::new_v4());
    claims.aud = "another-api".to_string();

    let token = sign_raw(&claims, TEST_SECRET);
    assert!(service.decode_expired(&token).is_err());
}

#[test]
fn test_decode_expired_rejects_garbage() {
    let service = test_service();
    assert!(service.decode_expired("not.a.jwt").is_err());
    assert!(service.decode_expired("").is_err());
}

#[test]
fn test_refresh_token_entropy() {
    let service = test_service();

    let first = service.generate_refresh_token();
    let second = service.generate_refresh_token();

    assert_ne!(first, second);
    // 64 bytes of randomness behind the encoding
    assert_eq!(BASE64.decode(&first).unwrap().len(), 64);
}

#[test]
fn test_access_token_expiry_from_is_pure() {
    let service = test_service();
    let now = Utc::now();

    let expiry = service.access_token_expiry_from(now);
    assert_eq!(expiry, now + Duration::minutes(15));

    let refresh_expiry = service.refresh_token_expiry_from(now);
    assert_eq!(refresh_expiry, now + Duration::days(7));
}

//! Main token service implementation

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

use super::config::TokenConfig;

/// Number of random bytes behind each refresh token (512 bits)
const REFRESH_TOKEN_BYTES: usize = 64;

/// Service for creating and verifying signed access tokens and for
/// generating opaque refresh token values.
///
/// The service is stateless: it is a pure function of the signing secret
/// and the configured issuer/audience/lifetimes. Persistence of refresh
/// values is the lifecycle manager's concern, not the signer's.
pub struct TokenService {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expired_validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance.
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or `TokenError::WeakSecret` when the signing
    /// secret is below the required minimum (fatal startup condition).
    pub fn new(config: TokenConfig) -> Result<Self, DomainError> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        // Same checks minus the lifetime: accepts expired-but-authentic
        // tokens so the refresh flow can recover the caller's identity.
        let mut expired_validation = validation.clone();
        expired_validation.validate_exp = false;
        expired_validation.required_spec_claims.clear();

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            expired_validation,
        })
    }

    /// Issues a signed access token for a user.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID (subject claim)
    /// * `email` - The user's email address
    /// * `name` - The user's display name
    /// * `roles` - Role names to embed in the token
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The compact encoded JWT
    /// * `Err(DomainError)` - Token generation failed
    pub fn issue_access_token(
        &self,
        user_id: Uuid,
        email: &str,
        name: &str,
        roles: &[String],
    ) -> Result<String, DomainError> {
        let claims = Claims::new_access_token(
            user_id,
            email,
            name,
            roles,
            &self.config.issuer,
            &self.config.audience,
            Duration::minutes(self.config.access_token_expiry_minutes),
        );

        let header = Header::new(Algorithm::HS256);
        encode(&header, &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Generates a new opaque refresh token value.
    ///
    /// 64 bytes of OS-seeded randomness, base64-encoded. The value is
    /// meaningless to the client and never signed; its authority comes from
    /// matching the stored copy exactly.
    pub fn generate_refresh_token(&self) -> String {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        BASE64.encode(bytes)
    }

    /// Verifies an access token and returns the claims.
    ///
    /// Full validation: signature, issuer, audience, nbf and expiry.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(DomainError)` - Token is invalid, expired, or malformed
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        DomainError::Token(TokenError::TokenExpired)
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        DomainError::Token(TokenError::InvalidSignature)
                    }
                    _ => DomainError::Token(TokenError::InvalidToken),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Decodes a token the client claims is expired.
    ///
    /// Verifies signature, algorithm, issuer and audience but deliberately
    /// skips the expiry check. Used only as the identity step of the refresh
    /// flow: the token must still be cryptographically authentic, so a
    /// forged subject id cannot be paired with a stolen refresh value.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims (possibly past their expiry)
    /// * `Err(DomainError)` - Bad signature, wrong issuer/audience, malformed
    pub fn decode_expired(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.expired_validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    DomainError::Token(TokenError::InvalidSignature)
                }
                _ => DomainError::Token(TokenError::InvalidToken),
            })?;

        Ok(token_data.claims)
    }

    /// Access token expiry for a token issued at `now`
    pub fn access_token_expiry_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::minutes(self.config.access_token_expiry_minutes)
    }

    /// Access token expiry for a token issued right now
    pub fn access_token_expiry(&self) -> DateTime<Utc> {
        self.access_token_expiry_from(Utc::now())
    }

    /// Refresh token expiry for a value issued at `now`
    pub fn refresh_token_expiry_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::days(self.config.refresh_token_expiry_days)
    }

    /// Refresh token expiry for a value issued right now
    pub fn refresh_token_expiry(&self) -> DateTime<Utc> {
        self.refresh_token_expiry_from(Utc::now())
    }
}

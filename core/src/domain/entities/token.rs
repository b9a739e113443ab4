//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Email address of the subject
    pub email: String,

    /// Display name of the subject
    pub name: String,

    /// Role names granted to the subject
    #[serde(default)]
    pub roles: Vec<String>,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for an access token.
    ///
    /// Issuer, audience and lifetime come from the signer configuration;
    /// a fresh `jti` is generated for every token.
    pub fn new_access_token(
        user_id: Uuid,
        email: &str,
        name: &str,
        roles: &[String],
        issuer: &str,
        audience: &str,
        lifetime: Duration,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + lifetime;

        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            roles: roles.to_vec(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the user ID from the claims
    ///
    /// # Returns
    ///
    /// `Ok(Uuid)` if the subject can be parsed as a UUID, `Err` otherwise
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Token pair returned to the client after login or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// Opaque refresh token
    pub refresh_token: String,

    /// Timestamp at which the access token expires
    pub access_expires_at: DateTime<Utc>,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_at,
        }
    }
}

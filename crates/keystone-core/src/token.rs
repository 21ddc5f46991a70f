use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Role, User};

/// Lifetime of an issued token, in seconds (24 hours).
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Identity claims carried inside a signed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Issued-at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds.
    pub exp: i64,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Issues and verifies HS256 tokens with a process-wide secret.
///
/// Tokens are stateless: nothing is persisted, and a token stays valid until
/// it expires regardless of logout.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: TimeDelta,
}

impl TokenService {
    /// Build a service from the signing secret. An empty secret is rejected.
    pub fn new(secret: &str) -> Result<Self, AppError> {
        if secret.trim().is_empty() {
            return Err(AppError::ConfigError(
                "Token signing secret must not be empty".into(),
            ));
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: TimeDelta::seconds(TOKEN_TTL_SECS),
        })
    }

    /// Override the token lifetime.
    pub fn with_ttl(mut self, ttl: TimeDelta) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Claims for `user` issued at `issued_at`, expiring one TTL later.
    pub fn claims_for(&self, user: &User, issued_at: DateTime<Utc>) -> Claims {
        Claims {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        }
    }

    /// Sign `claims` into a compact token.
    pub fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AppError::TokenError(format!("Failed to sign token: {e}")))
    }

    /// Sign a token for `user`, valid from now.
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        self.issue_at(user, Utc::now())
    }

    /// Sign a token for `user` as if issued at `issued_at`.
    pub fn issue_at(&self, user: &User, issued_at: DateTime<Utc>) -> Result<String, AppError> {
        self.sign(&self.claims_for(user, issued_at))
    }

    /// Verify signature and expiry against the current time.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify signature and expiry against `now`, with no leeway.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AppError> {
        // Expiry is checked below against the caller's clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            tracing::debug!("Token rejected: {e}");
            AppError::InvalidToken
        })?;

        if data.claims.exp <= now.timestamp() {
            tracing::debug!(user_id = %data.claims.id, "Token expired");
            return Err(AppError::InvalidToken);
        }

        Ok(data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

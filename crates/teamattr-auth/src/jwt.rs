//! JWT (JSON Web Token) handling for session tokens

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cookie carrying the session token for browser clients
pub const SESSION_COOKIE: &str = "session_token";

/// Claims of a session token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    /// Subject (user UUID)
    pub sub: String,
    /// Issued at (timestamp)
    pub iat: i64,
    /// Expiration time (timestamp)
    pub exp: i64,
    /// Issuer
    pub iss: String,
    /// Token type; the API only accepts "session"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl SessionClaims {
    pub fn new(user_id: String, issuer: String, validity: Duration) -> Self {
        let now = Utc::now();
        let exp = now + validity;

        Self {
            sub: user_id,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: issuer,
            token_type: None,
        }
    }

    pub fn with_token_type(mut self, token_type: String) -> Self {
        self.token_type = Some(token_type);
        self
    }

    pub fn is_session(&self) -> bool {
        self.token_type.as_deref() == Some("session")
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// JWT errors
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT encoding error: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,
}

/// JWT validator
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    /// Create a new JWT validator using HMAC-SHA256 (symmetric secret)
    ///
    /// Validates the signature and expiration. Issuer is only checked when
    /// `with_issuer` is called.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.validate_nbf = false;

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn with_issuer(mut self, issuer: String) -> Self {
        self.validation.set_issuer(&[issuer]);
        self
    }

    pub fn validate(&self, token: &str) -> Result<SessionClaims, JwtError> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)?;

        if token_data.claims.is_expired() {
            return Err(JwtError::TokenExpired);
        }

        Ok(token_data.claims)
    }

    /// Encode JWT using HMAC-SHA256 (symmetric secret)
    pub fn encode(secret: &[u8], claims: &SessionClaims) -> Result<String, JwtError> {
        let header = Header::new(Algorithm::HS256);
        let encoding_key = EncodingKey::from_secret(secret);

        Ok(encode(&header, claims, &encoding_key)?)
    }
}

/// Pick the session token from a `Cookie` header value first, then from an
/// `Authorization: Bearer` value.
///
/// Returns `Err` with a reason when neither carries a usable token.
pub fn bearer_or_cookie_token<'a>(
    cookie_header: Option<&'a str>,
    authorization_header: Option<&'a str>,
) -> Result<&'a str, &'static str> {
    let from_cookie = cookie_header.and_then(|cookies| {
        cookies
            .split(';')
            .map(|c| c.trim())
            .find_map(|c| c.strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
            .filter(|t| !t.is_empty())
    });

    if let Some(token) = from_cookie {
        return Ok(token);
    }

    let header = authorization_header
        .ok_or("Missing authentication token (cookie or Authorization header)")?;

    header
        .strip_prefix("Bearer ")
        .ok_or("Invalid Authorization header format. Expected 'Bearer <token>'")
}

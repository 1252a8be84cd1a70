//! Session token validation for the team attributes API
//!
//! Tokens are issued by the platform's login flow; this crate only verifies
//! them and exposes their claims.

pub mod jwt;

pub use jwt::{bearer_or_cookie_token, JwtError, JwtValidator, SessionClaims, SESSION_COOKIE};

// Re-export useful types
pub use jsonwebtoken::Algorithm;

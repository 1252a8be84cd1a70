//! JWT Authentication Middleware
//!
//! Extracts the session JWT from the `session_token` cookie or the
//! Authorization header, validates it, and makes the user available to
//! handlers via Axum's Extension.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use teamattr_auth::{bearer_or_cookie_token, JwtValidator};

use crate::models::ErrorResponse;

/// Authenticated user context extracted from JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// User ID (UUID string)
    pub user_id: String,
}

/// JWT validation state shared across middleware instances
#[derive(Clone)]
pub struct JwtState {
    pub validator: Arc<JwtValidator>,
}

impl JwtState {
    /// Create new JWT state with the given secret
    pub fn new(secret: &[u8]) -> Self {
        Self {
            validator: Arc::new(JwtValidator::new(secret)),
        }
    }
}

fn unauthorized(error: impl Into<String>, code: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse::new(error, code)),
    )
}

/// Authentication middleware that validates JWT session tokens
///
/// The cookie wins over the Authorization header. Returns 401 when no token
/// is present, the token is malformed, expired or signed with another
/// secret, or its type is not "session".
pub async fn require_auth(
    state: axum::extract::State<Arc<JwtState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let headers = request.headers();
    let cookie = headers.get(header::COOKIE).and_then(|h| h.to_str().ok());
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = bearer_or_cookie_token(cookie, authorization).map_err(|reason| {
        let code = if authorization.is_some() {
            "INVALID_AUTH_FORMAT"
        } else {
            "MISSING_AUTH"
        };
        unauthorized(reason, code)
    })?;

    // Validate JWT and extract claims
    let claims = state
        .validator
        .validate(token)
        .map_err(|e| unauthorized(format!("Invalid or expired token: {}", e), "INVALID_TOKEN"))?;

    match &claims.token_type {
        Some(token_type) if token_type == "session" => {}
        Some(token_type) => {
            return Err(unauthorized(
                format!(
                    "Invalid token type '{}'. Expected 'session' token for API access",
                    token_type
                ),
                "INVALID_TOKEN_TYPE",
            ));
        }
        None => {
            return Err(unauthorized(
                "Token missing 'token_type' claim",
                "MISSING_TOKEN_TYPE",
            ));
        }
    }

    let auth_user = AuthUser { user_id: claims.sub };

    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, middleware, routing::get, Router};
    use chrono::Duration;
    use teamattr_auth::SessionClaims;
    use tower::ServiceExt; // For oneshot()

    const USER_ID: &str = "5f0c3b7e-6f7e-4a43-9b0b-2d3b5e9c1a10";

    // Test handler that returns the authenticated user
    async fn protected_handler(axum::Extension(user): axum::Extension<AuthUser>) -> Json<AuthUser> {
        Json(user)
    }

    fn create_test_app(jwt_secret: &[u8]) -> Router {
        let jwt_state = Arc::new(JwtState::new(jwt_secret));

        Router::new()
            .route("/protected", get(protected_handler))
            .layer(middleware::from_fn_with_state(
                jwt_state.clone(),
                require_auth,
            ))
            .with_state(jwt_state)
    }

    fn session_token(secret: &[u8], validity: Duration) -> String {
        let claims = SessionClaims::new(USER_ID.to_string(), "teamattr".to_string(), validity)
            .with_token_type("session".to_string());
        JwtValidator::encode(secret, &claims).unwrap()
    }

    async fn error_body(response: Response) -> ErrorResponse {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_auth_middleware_valid_bearer_token() {
        let jwt_secret = b"test-secret-key";
        let app = create_test_app(jwt_secret);
        let token = session_token(jwt_secret, Duration::hours(1));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header("Authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let auth_user: AuthUser = serde_json::from_slice(&body).unwrap();

        assert_eq!(auth_user.user_id, USER_ID);
    }

    #[tokio::test]
    async fn test_auth_middleware_valid_cookie() {
        let jwt_secret = b"test-secret-key";
        let app = create_test_app(jwt_secret);
        let token = session_token(jwt_secret, Duration::hours(1));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header("Cookie", format!("theme=dark; session_token={}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_auth_middleware_missing_token() {
        let jwt_secret = b"test-secret-key";
        let app = create_test_app(jwt_secret);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let error = error_body(response).await;
        assert!(error
            .error
            .contains("Missing authentication token (cookie or Authorization header)"));
        assert_eq!(error.code.as_deref(), Some("MISSING_AUTH"));
    }

    #[tokio::test]
    async fn test_auth_middleware_invalid_bearer_format() {
        let jwt_secret = b"test-secret-key";
        let app = create_test_app(jwt_secret);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header("Authorization", "InvalidFormat token123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let error = error_body(response).await;
        assert!(error.error.contains("Invalid Authorization header format"));
        assert_eq!(error.code.as_deref(), Some("INVALID_AUTH_FORMAT"));
    }

    #[tokio::test]
    async fn test_auth_middleware_expired_token() {
        let jwt_secret = b"test-secret-key";
        let app = create_test_app(jwt_secret);
        let token = session_token(jwt_secret, Duration::seconds(-120));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header("Authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let error = error_body(response).await;
        assert!(error.error.contains("Invalid or expired token"));
    }

    #[tokio::test]
    async fn test_auth_middleware_wrong_secret() {
        let app = create_test_app(b"test-secret-key");
        let token = session_token(b"wrong-secret-key", Duration::hours(1));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header("Authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_auth_middleware_rejects_non_session_token() {
        let jwt_secret = b"test-secret-key";
        let app = create_test_app(jwt_secret);

        let claims = SessionClaims::new(USER_ID.to_string(), "teamattr".to_string(), Duration::hours(1))
            .with_token_type("auth".to_string());
        let token = JwtValidator::encode(jwt_secret, &claims).unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header("Authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let error = error_body(response).await;
        assert!(error.error.contains("Invalid token type"));
        assert!(error.error.contains("Expected 'session' token"));
    }

    #[tokio::test]
    async fn test_auth_middleware_missing_token_type() {
        let jwt_secret = b"test-secret-key";
        let app = create_test_app(jwt_secret);

        let claims = SessionClaims::new(USER_ID.to_string(), "teamattr".to_string(), Duration::hours(1));
        let token = JwtValidator::encode(jwt_secret, &claims).unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/protected")
                    .header("Authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let error = error_body(response).await;
        assert!(error.error.contains("missing 'token_type' claim"));
    }
}

pub mod handlers;
pub mod middleware;
pub mod models;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, put},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use sea_orm::DatabaseConnection;
use teamattr_core::TeamAttributes;

/// Application state shared across handlers
pub struct AppState {
    pub db: DatabaseConnection,
    pub attributes: TeamAttributes,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Team Attributes API",
        version = "0.1.0",
        description = "REST API for managing custom attributes of teams"
    ),
    paths(
        handlers::health_check,
        handlers::get_team,
        handlers::list_attributes,
        handlers::create_attribute,
        handlers::update_attribute,
        handlers::delete_attribute,
    ),
    components(
        schemas(
            models::AttributeType,
            models::AttributeOption,
            models::Attribute,
            models::AttributeList,
            models::CreateAttributeRequest,
            models::UpdateAttributeRequest,
            models::MembershipRole,
            models::Membership,
            models::TeamMember,
            models::Team,
            models::HealthResponse,
            models::ErrorResponse,
        )
    ),
    tags(
        (name = "teams", description = "Team endpoints"),
        (name = "attributes", description = "Team attribute management endpoints"),
        (name = "system", description = "System health and info endpoints")
    )
)]
struct ApiDoc;

/// API server configuration
pub struct ApiServerConfig {
    /// Address to bind the API server
    pub bind_addr: SocketAddr,
    /// Enable CORS for local development origins
    pub enable_cors: bool,
    /// Secret the session JWTs are signed with
    pub jwt_secret: String,
}

impl ApiServerConfig {
    pub fn new(bind_addr: SocketAddr, jwt_secret: impl Into<String>) -> Self {
        Self {
            bind_addr,
            enable_cors: true,
            jwt_secret: jwt_secret.into(),
        }
    }
}

/// API Server
pub struct ApiServer {
    config: ApiServerConfig,
    state: Arc<AppState>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: ApiServerConfig, db: DatabaseConnection) -> Self {
        let state = Arc::new(AppState {
            attributes: TeamAttributes::new(db.clone()),
            db,
        });

        Self { config, state }
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let api_doc = ApiDoc::openapi();

        let jwt_state = Arc::new(middleware::JwtState::new(
            self.config.jwt_secret.as_bytes(),
        ));

        // Build PUBLIC routes (no authentication required)
        let public_router = Router::new()
            .route("/api/health", get(handlers::health_check))
            .with_state(self.state.clone());

        // Build PROTECTED routes (require session token authentication)
        let protected_router = Router::new()
            .route("/api/teams/{team_id}", get(handlers::get_team))
            .route(
                "/api/teams/{team_id}/attributes",
                get(handlers::list_attributes).post(handlers::create_attribute),
            )
            .route(
                "/api/teams/{team_id}/attributes/{attribute_id}",
                put(handlers::update_attribute).delete(handlers::delete_attribute),
            )
            .with_state(self.state.clone())
            .layer(axum_middleware::from_fn_with_state(
                jwt_state,
                middleware::require_auth,
            ));

        let api_router = public_router.merge(protected_router);

        // SwaggerUi automatically creates a route for /api/openapi.json
        let mut router = Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", api_doc))
            .merge(api_router)
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            // Cookie auth needs credentials, which rules out a wildcard origin
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(|origin: &HeaderValue, _| {
                    let origin_str = origin.to_str().unwrap_or("");
                    origin_str.starts_with("http://localhost:")
                        || origin_str.starts_with("http://127.0.0.1:")
                        || origin_str.starts_with("https://localhost:")
                        || origin_str.starts_with("https://127.0.0.1:")
                }));

            router = router.layer(cors);
        }

        router
    }

    /// Start the API server
    pub async fn start(self) -> Result<(), anyhow::Error> {
        let router = self.build_router();

        info!("Starting API server on {}", self.config.bind_addr);
        info!(
            "OpenAPI spec: http://{}/api/openapi.json",
            self.config.bind_addr
        );
        info!("Swagger UI: http://{}/swagger-ui", self.config.bind_addr);

        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;

        axum::serve(listener, router)
            .await
            .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

        Ok(())
    }
}

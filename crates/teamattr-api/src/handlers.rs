use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

use teamattr_core::{
    resolve_acting_user, ActingUser, AttributeError, AttributeService, CreateAttribute,
    UpdateAttribute,
};

use crate::middleware::AuthUser;
use crate::models::*;
use crate::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a service error onto a status code and error body
pub fn error_response(err: AttributeError) -> ApiError {
    match err {
        AttributeError::Unauthorized => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::new(err.to_string(), "UNAUTHORIZED")),
        ),
        AttributeError::Unauthenticated(_) => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new(err.to_string(), "UNAUTHENTICATED")),
        ),
        AttributeError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(err.to_string(), "NOT_FOUND")),
        ),
        AttributeError::Validation(ref validation) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                field: Some(validation.field.to_string()),
                ..ErrorResponse::new(err.to_string(), "VALIDATION_ERROR")
            }),
        ),
        AttributeError::Database(_)
        | AttributeError::Encoding(_)
        | AttributeError::Corrupt { .. } => {
            error!("Attribute operation failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal server error", "INTERNAL_ERROR")),
            )
        }
    }
}

/// Resolve the session user into an acting user with organization context
async fn acting_user(state: &AppState, auth: &AuthUser) -> Result<ActingUser, ApiError> {
    let user_id = Uuid::parse_str(&auth.user_id).map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Invalid user ID in token", "INVALID_TOKEN")),
        )
    })?;

    resolve_acting_user(&state.db, user_id)
        .await
        .map_err(error_response)
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Get a team with its members and attributes
#[utoipa::path(
    get,
    path = "/api/teams/{team_id}",
    params(
        ("team_id" = i32, Path, description = "Team ID")
    ),
    responses(
        (status = 200, description = "Team information", body = Team),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Team not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "teams"
)]
pub async fn get_team(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(team_id): Path<i32>,
) -> Result<Json<Team>, ApiError> {
    debug!("Getting team {} for user {}", team_id, auth.user_id);

    let actor = acting_user(&state, &auth).await?;
    let team = state
        .attributes
        .get_team(&actor, team_id)
        .await
        .map_err(error_response)?;

    Ok(Json(Team::from(&team)))
}

/// List the attributes of a team
#[utoipa::path(
    get,
    path = "/api/teams/{team_id}/attributes",
    params(
        ("team_id" = i32, Path, description = "Team ID")
    ),
    responses(
        (status = 200, description = "Team attributes", body = AttributeList),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Team not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "attributes"
)]
pub async fn list_attributes(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(team_id): Path<i32>,
) -> Result<Json<AttributeList>, ApiError> {
    debug!("Listing attributes of team {}", team_id);

    let actor = acting_user(&state, &auth).await?;
    let attributes: Vec<Attribute> = state
        .attributes
        .list_attributes(&actor, team_id)
        .await
        .map_err(error_response)?
        .iter()
        .map(Attribute::from)
        .collect();

    let total = attributes.len();

    Ok(Json(AttributeList { attributes, total }))
}

/// Create an attribute
#[utoipa::path(
    post,
    path = "/api/teams/{team_id}/attributes",
    params(
        ("team_id" = i32, Path, description = "Team ID")
    ),
    request_body = CreateAttributeRequest,
    responses(
        (status = 201, description = "Attribute created", body = Attribute),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not a team admin", body = ErrorResponse),
        (status = 404, description = "Team not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "attributes"
)]
pub async fn create_attribute(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(team_id): Path<i32>,
    Json(req): Json<CreateAttributeRequest>,
) -> Result<(StatusCode, Json<Attribute>), ApiError> {
    let actor = acting_user(&state, &auth).await?;

    let created = state
        .attributes
        .create_attribute(
            &actor,
            CreateAttribute {
                team_id,
                input: req.into(),
            },
        )
        .await
        .map_err(error_response)?;

    info!(
        "User {} created attribute {} on team {}",
        actor.id, created.id, team_id
    );

    Ok((StatusCode::CREATED, Json(Attribute::from(&created))))
}

/// Replace an attribute
#[utoipa::path(
    put,
    path = "/api/teams/{team_id}/attributes/{attribute_id}",
    params(
        ("team_id" = i32, Path, description = "Team ID"),
        ("attribute_id" = i32, Path, description = "Attribute ID")
    ),
    request_body = UpdateAttributeRequest,
    responses(
        (status = 200, description = "Attribute updated", body = Attribute),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not a team admin", body = ErrorResponse),
        (status = 404, description = "Attribute not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "attributes"
)]
pub async fn update_attribute(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path((team_id, attribute_id)): Path<(i32, i32)>,
    Json(req): Json<UpdateAttributeRequest>,
) -> Result<Json<Attribute>, ApiError> {
    let actor = acting_user(&state, &auth).await?;

    let updated = state
        .attributes
        .update_attribute(
            &actor,
            UpdateAttribute {
                team_id,
                attribute_id,
                input: req.into(),
            },
        )
        .await
        .map_err(error_response)?;

    info!(
        "User {} updated attribute {} on team {}",
        actor.id, attribute_id, team_id
    );

    Ok(Json(Attribute::from(&updated)))
}

/// Delete an attribute
#[utoipa::path(
    delete,
    path = "/api/teams/{team_id}/attributes/{attribute_id}",
    params(
        ("team_id" = i32, Path, description = "Team ID"),
        ("attribute_id" = i32, Path, description = "Attribute ID")
    ),
    responses(
        (status = 204, description = "Attribute deleted"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not a team admin", body = ErrorResponse),
        (status = 404, description = "Attribute not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "attributes"
)]
pub async fn delete_attribute(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path((team_id, attribute_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    let actor = acting_user(&state, &auth).await?;

    state
        .attributes
        .delete_attribute(&actor, team_id, attribute_id)
        .await
        .map_err(error_response)?;

    info!(
        "User {} deleted attribute {} from team {}",
        actor.id, attribute_id, team_id
    );

    Ok(StatusCode::NO_CONTENT)
}

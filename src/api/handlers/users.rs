//! User management API handlers.
//!
//! HTTP handlers for user lifecycle management. All endpoints in this module
//! sit behind the principal-only route layer; plain authentication has
//! already happened by the time a request reaches them.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;
use validator::Validate;

use crate::api::error::ApiError;
use crate::api::handlers::pagination::{self, default_limit, PaginatedResponse};
use crate::api::routes::ApiState;
use crate::auth::user::{CreateUserRequest, Role, UpdateUserRequest, UserResponse};
use crate::auth::UserService;
use crate::domain::UserId;
use crate::storage::repositories::UserFilter;

const MAX_PAGE_SIZE: i64 = 100;

fn user_service_for_state(state: &ApiState) -> UserService {
    UserService::with_sqlx(state.pool.clone())
}

/// Parse a path identifier, rejecting structurally invalid storage keys.
fn parse_user_id(id: &str) -> Result<UserId, ApiError> {
    UserId::parse(id).map_err(|_| ApiError::bad_request(format!("Invalid user ID '{}'", id)))
}

/// Query parameters for the list_users endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    /// Substring match against name and email
    pub search: Option<String>,
    /// Restrict to a single role
    pub role: Option<Role>,
}

/// Create a new user (principal only).
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Principal role required"),
        (status = 409, description = "User with email already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn create_user_handler(
    State(state): State<ApiState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    payload.validate().map_err(|e| ApiError::bad_request(e.to_string()))?;

    let service = user_service_for_state(&state);
    let user = service.create_user(payload).await.map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// List users with pagination, search, and role filtering (principal only).
#[utoipa::path(
    get,
    path = "/users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Users listed successfully", body = PaginatedResponse<UserResponse>),
        (status = 403, description = "Principal role required")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
#[instrument(skip(state), fields(limit = %query.limit, offset = %query.offset))]
pub async fn list_users_handler(
    State(state): State<ApiState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<PaginatedResponse<UserResponse>>, ApiError> {
    let (limit, offset) = pagination::clamp(query.limit, query.offset, MAX_PAGE_SIZE);
    let filter = UserFilter { search: query.search, role: query.role };

    let service = user_service_for_state(&state);
    let (users, total) = service.list_users(limit, offset, &filter).await.map_err(ApiError::from)?;

    Ok(Json(PaginatedResponse::new(
        users.into_iter().map(UserResponse::from).collect(),
        total,
        limit,
        offset,
    )))
}

/// Get a user by ID (principal only).
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Invalid user ID"),
        (status = 403, description = "Principal role required"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
#[instrument(skip(state), fields(target_user_id = %id))]
pub async fn get_user_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user_id = parse_user_id(&id)?;

    let service = user_service_for_state(&state);
    let user = service
        .get_user(&user_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(user.into()))
}

/// Update a user (principal only).
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Principal role required"),
        (status = 404, description = "User not found"),
        (status = 409, description = "User with email already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
#[instrument(skip(state, payload), fields(target_user_id = %id))]
pub async fn update_user_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    payload.validate().map_err(|e| ApiError::bad_request(e.to_string()))?;

    let user_id = parse_user_id(&id)?;

    let service = user_service_for_state(&state);
    let user = service.update_user(&user_id, payload).await.map_err(ApiError::from)?;

    Ok(Json(user.into()))
}

/// Delete a user (principal only).
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted successfully"),
        (status = 400, description = "Invalid user ID"),
        (status = 403, description = "Principal role required"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
#[instrument(skip(state), fields(target_user_id = %id))]
pub async fn delete_user_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user_id = parse_user_id(&id)?;

    let service = user_service_for_state(&state);
    service.delete_user(&user_id).await.map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

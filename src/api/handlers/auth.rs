//! Login and current-identity handlers.

use axum::{extract::State, Extension, Json};
use validator::Validate;

use crate::api::error::ApiError;
use crate::api::routes::ApiState;
use crate::auth::middleware::CurrentUser;
use crate::auth::user::{LoginRequest, LoginResponse, UserResponse};
use crate::auth::LoginService;

fn login_service_for_state(state: &ApiState) -> LoginService {
    LoginService::with_sqlx(state.pool.clone(), state.token_service.clone())
}

/// Authenticate with email and password.
///
/// Returns a signed bearer token on success. Bad email and bad password are
/// indistinguishable in the response.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Incorrect email or password")
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<ApiState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    payload.validate().map_err(|e| ApiError::bad_request(e.to_string()))?;

    let service = login_service_for_state(&state);
    let (_user, token) = service.login(&payload).await.map_err(ApiError::from)?;

    Ok(Json(LoginResponse::bearer(token)))
}

/// Return the currently authenticated user.
#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn me_handler(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<UserResponse> {
    Json(user.into())
}

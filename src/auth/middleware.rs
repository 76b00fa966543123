//! Axum middleware for authentication and authorization.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Extension, State},
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use tracing::{info_span, warn};

use crate::api::error::ApiError;
use crate::auth::authorization;
use crate::auth::identity::IdentityResolver;
use crate::auth::jwt::TokenService;
use crate::auth::user::User;
use crate::errors::Error;

/// State shared by the authentication middleware: the token validator and
/// the identity resolver, both process-wide and read-only.
#[derive(Clone)]
pub struct AuthState {
    pub token_service: Arc<TokenService>,
    pub resolver: IdentityResolver,
}

/// The acting identity for a request, inserted as a request extension by
/// [`authenticate`] and consumed by handlers and the role gate. An explicit
/// context value rather than ambient state.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Middleware entry point that authenticates requests.
///
/// Validates the bearer token, resolves the subject to a user record, and
/// threads the identity through the request as an extension. Any failure
/// (missing header, invalid or expired token, deleted user) terminates the
/// request with 401.
pub async fn authenticate(
    State(auth): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let span = info_span!(
        "auth_middleware.authenticate",
        http.method = %method,
        http.path = %path,
    );
    let _guard = span.enter();

    let header =
        request.headers().get(AUTHORIZATION).and_then(|value| value.to_str().ok()).unwrap_or("");

    let Some(token) = header.strip_prefix("Bearer ") else {
        warn!("request without bearer token");
        return Err(ApiError::unauthorized("Could not validate credentials"));
    };

    let subject = auth.token_service.validate(token).map_err(ApiError::from)?;

    let user = match auth.resolver.resolve(&subject).await {
        Ok(user) => user,
        // A deleted user with a still-live token is an authentication
        // failure, not a missing resource.
        Err(Error::NotFound { .. }) => {
            warn!(subject = %subject, "token subject no longer resolvable");
            return Err(ApiError::unauthorized("Could not validate credentials"));
        }
        Err(err) => return Err(ApiError::from(err)),
    };

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

/// Middleware entry point gating a route tree to principals.
pub async fn require_principal(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    authorization::require_principal(&user).map_err(ApiError::from)?;
    Ok(next.run(request).await)
}

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{
    middleware::{authenticate, require_principal, AuthState},
    IdentityResolver, TokenService,
};
use crate::storage::DbPool;

use super::{
    docs,
    handlers::{
        create_user_handler, delete_user_handler, get_user_handler, health_handler, list_users_handler,
        login_handler, me_handler, update_user_handler,
    },
};

/// Shared state for API handlers: the connection pool and the process-wide
/// token service.
#[derive(Clone)]
pub struct ApiState {
    pub pool: DbPool,
    pub token_service: Arc<TokenService>,
}

pub fn build_router(state: ApiState) -> Router {
    let auth_layer = {
        let auth_state = AuthState {
            token_service: state.token_service.clone(),
            resolver: IdentityResolver::with_sqlx(state.pool.clone()),
        };
        middleware::from_fn_with_state(auth_state, authenticate)
    };

    // Admin tier: every user-management mutation and listing endpoint sits
    // behind the principal gate.
    let principal_routes = Router::new()
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route(
            "/users/{id}",
            get(get_user_handler).put(update_user_handler).delete(delete_user_handler),
        )
        .route_layer(middleware::from_fn(require_principal));

    // Authenticated tier: requires a resolvable identity, no role check.
    let secured = Router::new()
        .route("/users/me", get(me_handler))
        .merge(principal_routes)
        .layer(auth_layer);

    let public = Router::new()
        .route("/health", get(health_handler))
        .route("/auth/login", post(login_handler));

    Router::new()
        .merge(public)
        .merge(secured)
        .with_state(state)
        .merge(docs::docs_router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

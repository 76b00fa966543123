use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::auth::login_handler,
        crate::api::handlers::auth::me_handler,
        crate::api::handlers::users::create_user_handler,
        crate::api::handlers::users::list_users_handler,
        crate::api::handlers::users::get_user_handler,
        crate::api::handlers::users::update_user_handler,
        crate::api::handlers::users::delete_user_handler,
    ),
    components(
        schemas(
            crate::api::handlers::health::HealthResponse,
            crate::auth::user::LoginRequest,
            crate::auth::user::LoginResponse,
            crate::auth::user::CreateUserRequest,
            crate::auth::user::UpdateUserRequest,
            crate::auth::user::UserResponse,
            crate::auth::user::Role,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User management endpoints (principal only)"),
        (name = "health", description = "Service health")
    ),
    info(
        title = "Rollcall API",
        description = "Role-based access control user directory API"
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Swagger UI and the OpenAPI document, served without authentication.
pub fn docs_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

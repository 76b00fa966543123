use std::sync::Arc;

use rollcall::{
    api::{start_api_server, ApiState},
    auth::{TokenService, UserService},
    config::AppConfig,
    observability::init_tracing,
    storage::create_pool,
    Result, APP_NAME, VERSION,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (optional - won't fail if missing).
    // This must happen before any config is read from environment.
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    // A missing signing secret fails here, before anything is started.
    let config = AppConfig::from_env()?;

    init_tracing(&config.observability);

    info!(app_name = APP_NAME, version = VERSION, "Starting Rollcall user directory");
    info!(
        api_address = %config.server.bind_address(),
        token_expiry_minutes = config.auth.token_expiry_minutes,
        "Loaded configuration from environment"
    );

    let pool = create_pool(&config.database).await?;

    // Seed the default accounts on an empty directory.
    let user_service = UserService::with_sqlx(pool.clone());
    user_service.ensure_default_users().await?;

    let token_service = Arc::new(TokenService::from_config(&config.auth));

    let state = ApiState { pool, token_service };
    start_api_server(&config.server, state).await?;

    info!("Rollcall shutdown completed");
    Ok(())
}

use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::{info, warn};

use linkvault::logging::init_tracing;
use linkvault::metrics::init_metrics;
use linkvault::modules::auth::sweeper::spawn_prune_task;
use linkvault::router::init_router_with_metrics;
use linkvault::state::AppState;
use linkvault_config::{
    CookieConfig, CorsConfig, JwtConfig, ServerConfig, SessionConfig, StorageBackend,
};
use linkvault_db::{init_db_pool, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing().context("Failed to initialize tracing")?;

    let server_config = ServerConfig::from_env()?;
    let jwt_config = JwtConfig::from_env().context("Invalid JWT configuration")?;
    let cookie_config = CookieConfig::from_env(&jwt_config);
    let cors_config = CorsConfig::from_env();
    let session_config = SessionConfig::from_env();

    let state = match server_config.storage {
        StorageBackend::Postgres => {
            let pool = init_db_pool(server_config.database_url()?, server_config.max_connections)
                .await
                .context("Failed to connect to database")?;
            run_migrations(&pool)
                .await
                .context("Failed to run migrations")?;
            AppState::postgres(pool, jwt_config, cookie_config, cors_config)
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on restart");
            AppState::in_memory(jwt_config, cookie_config, cors_config)
        }
    };

    match session_config.prune_interval() {
        Some(period) => {
            spawn_prune_task(Arc::clone(&state.refresh_tokens), Arc::clone(&state.clock), period);
            info!(interval_secs = period.as_secs(), "Refresh token sweeper started");
        }
        None => info!("Refresh token sweeper disabled"),
    }

    let metrics_handle = init_metrics().context("Failed to initialize metrics")?;
    let app = init_router_with_metrics(state, metrics_handle);

    let listener = tokio::net::TcpListener::bind(&server_config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", server_config.addr))?;
    info!("🚀 Server running on http://{}", server_config.addr);
    info!("📚 Swagger UI available at http://{}/swagger-ui", server_config.addr);

    axum::serve(listener, app).await?;
    Ok(())
}

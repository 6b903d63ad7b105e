use std::sync::Arc;

use anyhow::Context;
use cinedex_server::config::ServerConfig;
use cinedex_server::routes::build_router;
use cinedex_server::state::AppState;
use cinedex_tmdb::TmdbClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env().context("invalid configuration")?;
    info!(
        base_url = %config.tmdb.base_url,
        language = %config.tmdb.language,
        region = %config.tmdb.region,
        "catalogue configured"
    );

    let default_region = config.tmdb.region.clone();
    let client = TmdbClient::new(config.tmdb).context("failed to build TMDB client")?;
    let state = AppState::new(Arc::new(client), default_region);

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind_addr, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

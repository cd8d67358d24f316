use std::sync::Arc;

use anyhow::Context;
use peekr_metadata::TitleProvider;
use peekr_metadata::cache::CachingProvider;
use peekr_metadata::tmdb::TmdbClient;
use peekr_server::config::ServerConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("failed to load configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    if config.log_json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!(
        auth = config.tmdb.auth.kind(),
        base_url = %config.tmdb.base_url,
        timeout_secs = config.tmdb.timeout.as_secs(),
        cache = ?config.cache_policy,
        cache_max_entries = config.cache_max_entries,
        "configuring TMDB provider"
    );

    let tmdb = TmdbClient::new(config.tmdb.clone()).context("failed to build TMDB client")?;
    let provider: Arc<dyn TitleProvider> = Arc::new(CachingProvider::new(
        Arc::new(tmdb),
        config.cache_policy,
        config.cache_max_entries,
    ));

    let app_state =
        peekr_server::state::AppState::new(provider, config.cache_policy, config.render.clone());
    let app = peekr_server::routes::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind_addr, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

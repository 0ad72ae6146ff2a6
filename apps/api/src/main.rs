mod config;
mod errors;
mod extract;
mod llm_client;
mod models;
mod recommendations;
mod routes;
mod simulator;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    init_tracing(&config);

    info!(
        "Starting SocioMap API v{} ({:?})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    let llm = LlmClient::new(config.openai_api_key.clone(), config.openai_api_url.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState::new(Arc::new(llm));
    let app = build_router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Server running on port {}", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Structured logging: JSON lines in production, human-readable otherwise.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{crate_name}={level},tower_http={level}",
            crate_name = env!("CARGO_CRATE_NAME"),
            level = config.rust_log
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.environment.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

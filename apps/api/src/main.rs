mod config;
mod errors;
mod llm_client;
mod roadmap;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::retry::RetryPolicy;
use crate::llm_client::{LlmClient, ProviderTransport};
use crate::roadmap::generator::RoadmapGenerator;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting roadmap API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.gemini_api_url.clone(),
        config.gemini_api_key.clone(),
        config.http_timeout,
    )
    .context("Failed to build HTTP client")?;
    info!("LLM client initialized (endpoint: {})", llm.endpoint());

    let retry = RetryPolicy::new(config.max_attempts, config.initial_delay);
    info!(
        "Retry policy: {} attempt(s), initial backoff {}ms",
        retry.max_attempts,
        retry.initial_delay.as_millis()
    );

    let state = AppState {
        generator: RoadmapGenerator::new(Arc::new(llm), retry),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client's domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

mod analytics;
mod auth;
mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;
mod storage;
mod views;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GroqClient;
use crate::routes::build_router;
use crate::session::SessionRegistry;
use crate::state::AppState;
use crate::storage::{CredentialStore, RecordStore};
use crate::views::Views;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Sales Desk v{}", env!("CARGO_PKG_VERSION"));

    // Initialize flat-file stores
    std::fs::create_dir_all(&config.data_dir)?;
    let credentials = CredentialStore::new(config.users_path());
    credentials.initialize()?;
    let records = RecordStore::new(config.records_path());
    info!("Data directory: {}", config.data_dir.display());

    // Initialize LLM client
    let llm = GroqClient::new(config.groq_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let views = Views::new()?;

    // Build app state
    let state = AppState {
        credentials,
        records,
        llm: Arc::new(llm),
        sessions: SessionRegistry::new(),
        views,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

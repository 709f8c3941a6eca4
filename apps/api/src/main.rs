mod config;
mod errors;
mod llm_client;
mod models;
mod routes;
mod screening;
mod state;
mod storage;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::screening::machine::StageMachine;
use crate::screening::sentiment::VaderSentimentScorer;
use crate::state::AppState;
use crate::storage::JsonlCandidateStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing GROQ_API_KEY)
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

    info!("Starting TalentScout API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.groq_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Append-only candidate store
    let store = JsonlCandidateStore::new(&config.store_path);
    info!("Candidate store: {}", store.path().display());

    info!(
        "Screening policy: {} blocklisted terms, sentiment bands <{} / >{}",
        config.policy.blocklist.len(),
        config.policy.low_sentiment_threshold,
        config.policy.high_sentiment_threshold
    );

    let machine = StageMachine::new(
        config.policy.clone(),
        Arc::new(llm),
        Arc::new(VaderSentimentScorer),
        Arc::new(store.clone()),
    );

    let state = AppState::new(machine, store);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the renderer's origin before exposing publicly

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

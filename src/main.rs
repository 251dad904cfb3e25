//! Scent Stylist - conversational fragrance recommendations
//!
//! An HTTP chat service where the "Lila" persona gets to know a visitor and
//! streams back fragrance suggestions, keeping a small per-session profile.

mod api;
mod chat;
mod config;
mod llm;
mod session;

use api::{create_router, ensure_static_dir, AppState};
use chat::ResponseStreamer;
use config::AppConfig;
use llm::{LlmService, LoggingService, OpenAIService};
use session::{InMemorySessionStore, KeywordExtractor};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scent_stylist=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = AppConfig::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
    })?;

    ensure_static_dir(&config.static_dir)?;

    // Language model
    let openai = OpenAIService::new(
        config.openai_api_key.clone(),
        config.openai_model.as_str(),
        Some(&config.openai_base_url),
    );
    let llm: Arc<dyn LlmService> = Arc::new(LoggingService::new(Arc::new(openai)));
    tracing::info!(model = %llm.model_id(), base_url = %config.openai_base_url, "LLM initialized");

    // Create application state
    let streamer = ResponseStreamer::new(llm, Arc::new(KeywordExtractor::default()));
    let state = AppState::new(
        Arc::new(InMemorySessionStore::new()),
        streamer,
        config.static_dir.clone(),
    );

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Scent stylist listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

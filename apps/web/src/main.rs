mod chat_client;
mod config;
mod encoding;
mod errors;
mod model;
mod prediction;
mod routes;
mod shell;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chat_client::{ChatClient, ChatCompletion, ChatRelay};
use crate::config::Config;
use crate::model::load_model_state;
use crate::routes::build_router;
use crate::shell::page::build_templates;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails only on a malformed PORT)
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

    info!("Starting salary-web v{}", env!("CARGO_PKG_VERSION"));

    // Load the model once; a missing or corrupt file only disables prediction
    let model = load_model_state(&config.model_path);

    // Initialize chat relay
    let chat = match &config.openai_api_key {
        Some(key) => {
            let client = ChatClient::new(
                key.clone(),
                &config.openai_base_url,
                config.chat_model.clone(),
            );
            info!("Chat client initialized (model: {})", client.model());
            let backend: Arc<dyn ChatCompletion> = Arc::new(client);
            ChatRelay::new(Some(backend))
        }
        None => {
            warn!("OPENAI_API_KEY not set, chat assistant disabled");
            ChatRelay::disabled()
        }
    };

    let templates = build_templates().context("Failed to initialize page templates")?;

    // Build app state
    let state = AppState {
        model,
        chat,
        templates: Arc::new(templates),
        config: config.clone(),
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

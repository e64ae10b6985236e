mod config;
mod document;
mod errors;
mod extraction;
mod llm_client;
mod render;
mod routes;
mod skill_tree;
mod state;
mod taxonomy;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::{AiExtractor, ExtractionCoordinator, KeywordMatcher, Lexicon, SkillExtractor};
use crate::llm_client::{ChatTransport, LlmClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values, never on missing ones)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting skilltree v{}", env!("CARGO_PKG_VERSION"));

    // Load the lexicon once; it is read-only from here on
    let lexicon = Arc::new(match &config.lexicon_path {
        Some(path) => Lexicon::from_path(path)
            .with_context(|| format!("Failed to load lexicon from {}", path.display()))?,
        None => Lexicon::builtin(),
    });
    if lexicon.is_empty() {
        warn!("Lexicon is empty; keyword fallback will find nothing");
    }
    info!("Lexicon loaded: {} skills", lexicon.len());

    let keyword = KeywordMatcher::new(Arc::clone(&lexicon)).with_scoring(config.keyword_scoring);

    // Initialize the AI path only when a credential is configured
    let transport: Option<Arc<dyn ChatTransport>> = match &config.xai_api_key {
        Some(api_key) => {
            let client = LlmClient::new(
                api_key.clone(),
                config.xai_api_url.clone(),
                config.xai_model.clone(),
                config.ai_timeout,
            )?;
            info!("LLM client initialized (model: {})", client.model());
            Some(Arc::new(client) as Arc<dyn ChatTransport>)
        }
        None => {
            info!("XAI_API_KEY not set; using keyword matching only");
            None
        }
    };
    let ai = AiExtractor::new(transport, config.ai_timeout);
    let ai: Option<Arc<dyn SkillExtractor>> = ai
        .is_available()
        .then(|| Arc::new(ai) as Arc<dyn SkillExtractor>);

    let coordinator = Arc::new(ExtractionCoordinator::new(keyword, ai));

    // Build app state
    let state = AppState {
        config: config.clone(),
        lexicon,
        coordinator,
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

mod config;
mod errors;
mod extraction;
mod job_description;
mod llm_client;
mod models;
mod routes;
mod screening;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::routes::build_router;
use crate::screening::emails::EmailComposer;
use crate::screening::ranker::Ranker;
use crate::screening::scorer::LlmCandidateScorer;
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

    info!("Starting Recruiter API v{}", env!("CARGO_PKG_VERSION"));

    let llm = match &config.anthropic_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(client)
        }
        None => None,
    };

    // Scorer is chosen once here; handlers never see which one is active.
    let mut ranker = Ranker::new(config.missing_skills_policy);
    if config.enable_llm_scoring {
        match &llm {
            Some(llm) => {
                ranker = ranker
                    .with_smart_scorer(Arc::new(LlmCandidateScorer(llm.clone())), config.llm_timeout);
            }
            None => warn!("ENABLE_LLM_SCORING is set but ANTHROPIC_API_KEY is missing"),
        }
    }
    info!(
        backend = ranker.preferred_backend(),
        policy = ?config.missing_skills_policy,
        "Ranker initialized"
    );

    let writer: Option<Arc<dyn TextGenerator>> = match (&llm, config.enable_llm_writing) {
        (Some(llm), true) => Some(Arc::new(llm.clone())),
        (None, true) => {
            warn!("ENABLE_LLM_WRITING is set but ANTHROPIC_API_KEY is missing");
            None
        }
        _ => None,
    };
    let emails = match &writer {
        Some(writer) => EmailComposer::with_llm(Arc::clone(writer), config.llm_timeout),
        None => EmailComposer::templates(),
    };
    info!(llm_writing = emails.uses_llm(), "Email composer initialized");

    let state = AppState {
        config: config.clone(),
        ranker,
        emails,
        writer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

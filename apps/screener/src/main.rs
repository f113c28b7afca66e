mod config;
mod conversation;
mod errors;
mod gateway;
mod llm_client;
mod models;
mod privacy;
mod question_bank;
mod routes;
mod state;
mod validation;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::conversation::{spawn_sweeper, ConversationManager, SessionStore};
use crate::gateway::{Interviewer, LlmGateway, StaticInterviewer};
use crate::llm_client::LlmClient;
use crate::question_bank::QuestionBank;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration errors are the only ones allowed to abort the process
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(&config.gateway)?;
    info!("LLM client initialized (model: {})", llm.model());

    // Remote interviewer first, question bank on any failure
    let gateway = LlmGateway::new(
        Arc::new(llm),
        config.gateway.timeout,
        &config.interview.company_name,
    );
    let interviewer = Interviewer::new(
        Arc::new(gateway),
        StaticInterviewer::new(QuestionBank::new()),
    );
    let manager = Arc::new(ConversationManager::new(
        config.interview.clone(),
        interviewer,
    ));

    let sessions = Arc::new(SessionStore::new());
    spawn_sweeper(sessions.clone(), manager.clone(), config.sweep_interval);
    info!(
        "Session sweeper running every {}s",
        config.sweep_interval.as_secs()
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        manager,
        sessions,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the candidate UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

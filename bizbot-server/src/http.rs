//! BizBot HTTP API
//!
//! Axum-based HTTP server that serves the chat page and relays chat messages
//! to the completion provider.
//!
//! Architecture: each endpoint has a thin axum handler that delegates to an
//! inner function. The inner functions are directly testable without axum
//! dispatch machinery.
//!
//! Endpoints:
//! - GET  /         — chat page
//! - POST /chat     — relay a message; always 200 with a `ChatReply` body
//! - GET  /health   — liveness with provider and model
//! - GET  /version  — server version info

use std::sync::Arc;

use anyhow::Result;
use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::{Key, SignedCookieJar};
use bizbot_core::{
    BizbotConfig, BizbotError, ChatReply, ChatRequest, CompletionProvider, HandlerSettings,
    MessageHandler, OpenAiCompletionClient, Session,
};
use chrono::{DateTime, Utc};
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::page::INDEX_HTML;
use crate::session::{load_session, signing_key, store_session};

/// Shared state for all HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<MessageHandler>,
    pub config: Arc<BizbotConfig>,
    pub cookie_key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

impl AppState {
    /// Assemble state around an existing provider.
    pub fn new(provider: Arc<dyn CompletionProvider>, config: BizbotConfig) -> Self {
        let handler = MessageHandler::new(provider, HandlerSettings::from_config(&config));
        let cookie_key = signing_key(config.session.resolved_secret().as_deref());
        Self {
            handler: Arc::new(handler),
            config: Arc::new(config),
            cookie_key,
        }
    }

    /// Build state with the OpenAI-compatible client described by `config`.
    pub fn from_config(config: BizbotConfig) -> Result<Self, BizbotError> {
        let api_key = config.completion.resolved_api_key();
        Self::with_api_key(config, api_key)
    }

    /// Build state with the OpenAI-compatible client and an already-resolved key.
    pub fn with_api_key(config: BizbotConfig, api_key: String) -> Result<Self, BizbotError> {
        let provider = OpenAiCompletionClient::with_api_key(
            &config.completion,
            api_key,
            config.completion.base_url.clone(),
        )?;
        tracing::info!(
            provider = provider.name(),
            model = %config.completion.model,
            base_url = %config.completion.base_url,
            "Completion provider ready"
        );
        Ok(Self::new(Arc::new(provider), config))
    }
}

/// Build the Axum router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/chat", post(chat_handler))
        .route("/health", get(health_handler))
        .route("/version", get(version_handler))
        .with_state(state)
}

/// Start the HTTP server on the configured address.
/// Gracefully shuts down when the broadcast shutdown signal fires.
pub async fn start_http_server(
    state: AppState,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<()> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);

    let app = build_router(state);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("BizBot listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!("HTTP server shutting down...");
        })
        .await?;

    Ok(())
}

// ============================================================================
// Inner (directly testable) business logic functions
// ============================================================================

/// Inner chat — runs the message handler against the caller's session.
/// The status is always 200; failures are carried in the reply text.
pub async fn chat_inner(
    handler: &MessageHandler,
    session: &mut Session,
    req: ChatRequest,
    now: DateTime<Utc>,
) -> (StatusCode, ChatReply) {
    let reply = handler.handle(&req.message, session, now).await;
    (StatusCode::OK, reply)
}

/// Inner health — reports the configured provider (pure, no IO).
pub fn health_inner(state: &AppState) -> serde_json::Value {
    serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": state.handler.provider_name(),
        "model": state.handler.settings().model,
    })
}

/// Inner version — returns version info (pure, no IO).
pub fn version_inner() -> serde_json::Value {
    serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "protocol": "bizbot/1",
    })
}

// ============================================================================
// Axum handler wrappers (thin — delegate to inner functions)
// ============================================================================

pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn chat_handler(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Json(req): Json<ChatRequest>,
) -> impl IntoResponse {
    let cookie_name = &state.config.session.cookie_name;
    let mut session = load_session(&jar, cookie_name);
    let before = session.clone();

    let (status, reply) = chat_inner(&state.handler, &mut session, req, Utc::now()).await;

    let jar = if session != before {
        store_session(jar, cookie_name, &session)
    } else {
        jar
    };
    (status, jar, Json(reply))
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(health_inner(&state)))
}

pub async fn version_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(version_inner()))
}

// ============================================================================
// Unit Tests — call inner functions directly
// ============================================================================

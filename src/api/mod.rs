//! REST API server for recap.
//!
//! Provides HTTP endpoints for:
//! - Transcript summarization (POST /api/summarize)
//! - Summary email delivery (POST /api/send-email)
//! - Health check (GET /api/health)

pub mod error;
pub mod routes;

use std::sync::Arc;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};
use tracing::info;

use crate::mailer::Mailer;
use crate::summarizer::Summarizer;

/// Shared handler state: the two collaborators, constructed once at
/// startup and injected so tests can substitute doubles.
#[derive(Clone)]
pub struct AppState {
    pub summarizer: Arc<dyn Summarizer>,
    pub mailer: Arc<dyn Mailer>,
}

pub struct ApiServer {
    port: u16,
    state: AppState,
}

impl ApiServer {
    pub fn new(port: u16, summarizer: Arc<dyn Summarizer>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            port,
            state: AppState { summarizer, mailer },
        }
    }

    pub async fn start(self) -> Result<()> {
        let app = router(self.state);

        let listener = tokio::net::TcpListener::bind(&format!("0.0.0.0:{}", self.port)).await?;

        info!("Server running at http://localhost:{}", self.port);
        info!("Endpoints:");
        info!("  GET  /api/health     - Service health");
        info!("  POST /api/summarize  - Summarize a transcript");
        info!("  POST /api/send-email - Email a summary");

        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Assembles the full application router. Split out of [`ApiServer`] so
/// integration tests can drive it without binding a socket.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .merge(routes::summarize::router(state.clone()))
        .merge(routes::email::router(state))
}

async fn health() -> Json<Value> {
    Json(json!({
        "ok": true,
        "time": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

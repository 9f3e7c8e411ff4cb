//! Summarization endpoint.
//!
//! POST /api/summarize - turn a transcript into an AI-generated summary.

use axum::{extract::State, response::Json, routing::post, Router};
use serde_json::{json, Value};
use tracing::info;

use crate::api::error::ApiResult;
use crate::api::AppState;
use crate::summarizer::SummarizeRequest;

/// Creates the summarize router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/summarize", post(summarize))
        .with_state(state)
}

/// Validates the transcript, calls the upstream completion API once, and
/// relays the summary text. Upstream failures come back with the
/// upstream's own status code and raw body as `details`.
async fn summarize(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> ApiResult<Json<Value>> {
    info!(
        "Summarize request: {} transcript chars, custom prompt: {}",
        request.transcript.chars().count(),
        request.prompt.is_some()
    );

    let summary = state.summarizer.summarize(&request).await?;
    Ok(Json(json!({ "summary": summary })))
}

//! Email delivery endpoint.
//!
//! POST /api/send-email - send the (possibly edited) summary to a list of
//! recipients through the configured SMTP relay.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::api::error::ApiResult;
use crate::api::AppState;
use crate::mailer::{OutgoingEmail, Recipients};

/// Request body for the send-email endpoint. `to` accepts a single
/// comma/space-separated string or an array of addresses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    #[serde(default)]
    pub to: Option<Recipients>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub summary_text: Option<String>,
    #[serde(default)]
    pub summary_html: Option<String>,
}

/// Creates the email router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/send-email", post(send_email))
        .with_state(state)
}

async fn send_email(
    State(state): State<AppState>,
    Json(request): Json<SendEmailRequest>,
) -> ApiResult<Json<Value>> {
    let email = OutgoingEmail::build(
        request.to.as_ref(),
        request.subject.as_deref(),
        request.summary_text.as_deref(),
        request.summary_html.as_deref(),
    )?;

    info!("Sending summary email to {} recipient(s)", email.to.len());

    let receipt = state.mailer.send(&email).await?;
    Ok(Json(json!({ "ok": true, "messageId": receipt.message_id })))
}

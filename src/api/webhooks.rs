//! Webhook handlers for the WhatsApp Business Cloud API

use axum::{
    body::Bytes,
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use relay_channels::WebhookHandler;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// WhatsApp Business webhook verification query
#[derive(Debug, Default, Deserialize)]
pub struct WebhookVerifyQuery {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

/// Verify WhatsApp Business webhook (GET)
///
/// Meta sends this request during webhook setup to verify ownership.
async fn whatsapp_verify(
    query: Option<Query<WebhookVerifyQuery>>,
    Extension(handler): Extension<Arc<WebhookHandler>>,
) -> Response {
    let query = query.map(|Query(q)| q).unwrap_or_default();

    match handler.verify(
        query.mode.as_deref(),
        query.verify_token.as_deref(),
        query.challenge.as_deref(),
    ) {
        Some(challenge) => (StatusCode::OK, challenge).into_response(),
        None => StatusCode::FORBIDDEN.into_response(),
    }
}

/// Handle WhatsApp Business webhook (POST)
///
/// The body is taken raw so that malformed or non-JSON deliveries are still
/// acknowledged.
async fn whatsapp_webhook(
    Extension(handler): Extension<Arc<WebhookHandler>>,
    body: Bytes,
) -> StatusCode {
    let ack = handler.receive(&body).await;
    debug!(outcome = ?ack.outcome, "Webhook acknowledged");

    // Always return 200 to avoid retries from Meta
    StatusCode::OK
}

/// Create webhook routes
pub fn webhooks_routes() -> Router {
    Router::new().route("/", get(whatsapp_verify).post(whatsapp_webhook))
}

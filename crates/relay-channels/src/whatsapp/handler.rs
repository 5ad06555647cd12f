use super::config::{WhatsAppBusinessConfig, SUBSCRIBE_MODE};
use super::types::{InboundMessage, MessageKind, Notification};
use crate::error::Result;
use crate::message::{DeliveryReceipt, OutboundApi, OutgoingMessage};
use crate::util::mask_for_logging;

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::{debug, error, info, instrument, warn};

/// Fixed acknowledgment sent for image messages
pub const IMAGE_ACK_REPLY: &str = "✅ Image received! Processing...";

/// Build the reply for a text message
#[must_use]
pub fn text_reply(text: &str) -> String {
    format!("You said: \"{text}\"\n\nSend me a photo of your health document!")
}

/// Why a delivery produced no reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// `object` was missing or not a WhatsApp Business notification
    UnexpectedObject(Option<String>),
    /// No message in the notification
    NoMessage,
    /// Message type the relay does not answer
    UnsupportedType(String),
}

/// What happened while processing one delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// A reply was accepted by the platform
    Replied {
        /// Recipient of the reply
        to: String,
        /// Message type that was answered
        kind: &'static str,
        /// Platform receipt for the reply
        receipt: DeliveryReceipt,
    },
    /// Nothing to answer
    Ignored(IgnoreReason),
    /// Decoding or the outbound reply failed; already logged
    Failed(String),
}

/// Result of [`WebhookHandler::receive`]
///
/// Every delivery is acknowledged. The platform redelivers anything that is
/// not answered with a success status, so processing failures are reported
/// here for the caller and logs only, never through the HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    /// Processing outcome
    pub outcome: WebhookOutcome,
}

impl Acknowledgement {
    fn new(outcome: WebhookOutcome) -> Self {
        Self { outcome }
    }

    /// Whether a reply went out
    #[must_use]
    pub fn replied(&self) -> bool {
        matches!(self.outcome, WebhookOutcome::Replied { .. })
    }
}

/// WhatsApp Business webhook handler
///
/// Holds only immutable state; one instance serves every request.
pub struct WebhookHandler {
    verify_token: SecretString,
    api: Arc<dyn OutboundApi>,
}

impl WebhookHandler {
    /// Create a handler replying through `api`
    pub fn new(config: &WhatsAppBusinessConfig, api: Arc<dyn OutboundApi>) -> Self {
        Self {
            verify_token: config.verify_token.clone(),
            api,
        }
    }

    /// Verify a webhook subscription (GET request)
    ///
    /// Returns the challenge to echo when `mode` is `subscribe` and `token`
    /// matches the configured verify token. A missing challenge echoes as an
    /// empty string. An unset verify token rejects every request.
    pub fn verify(
        &self,
        mode: Option<&str>,
        token: Option<&str>,
        challenge: Option<&str>,
    ) -> Option<String> {
        let expected = self.verify_token.expose_secret();
        let token_ok = match token {
            Some(token) => {
                !expected.is_empty() && bool::from(token.as_bytes().ct_eq(expected.as_bytes()))
            }
            None => false,
        };

        if mode == Some(SUBSCRIBE_MODE) && token_ok {
            info!("WhatsApp webhook verified");
            Some(challenge.unwrap_or_default().to_string())
        } else {
            warn!(mode = ?mode, "WhatsApp webhook verification failed");
            None
        }
    }

    /// Handle a webhook delivery (POST request)
    #[instrument(skip(self, body), fields(bytes = body.len()))]
    pub async fn receive(&self, body: &[u8]) -> Acknowledgement {
        info!(received_at = %Utc::now().format("%Y-%m-%d %H:%M:%S"), "Webhook received");
        debug!(body = %String::from_utf8_lossy(body), "Webhook payload");

        let notification = match Notification::decode(body) {
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, "Ignoring undecodable webhook payload");
                return Acknowledgement::new(WebhookOutcome::Failed(e.to_string()));
            }
        };

        let outcome = match notification {
            Notification::Message(msg) => self.dispatch(msg).await,
            Notification::Empty => {
                debug!("Webhook carried no message");
                WebhookOutcome::Ignored(IgnoreReason::NoMessage)
            }
            Notification::UnexpectedObject(object) => {
                debug!(object = ?object, "Webhook is not a WhatsApp Business notification");
                WebhookOutcome::Ignored(IgnoreReason::UnexpectedObject(object))
            }
        };

        Acknowledgement::new(outcome)
    }

    async fn dispatch(&self, msg: InboundMessage) -> WebhookOutcome {
        info!(from = %msg.from, message_type = msg.kind.as_str(), "Processing WhatsApp message");

        let (kind, reply) = match &msg.kind {
            MessageKind::Text { body } => {
                info!(text = %mask_for_logging(body), "Text message");
                ("text", text_reply(body))
            }
            MessageKind::Image { media_id, caption } => {
                info!(
                    media_id = %media_id,
                    caption = caption.as_deref().unwrap_or("(no caption)"),
                    "Image message"
                );
                // Media stays unfetched until a document-extraction service exists.
                ("image", IMAGE_ACK_REPLY.to_string())
            }
            MessageKind::Other { message_type } => {
                info!(message_type = %message_type, "Unsupported message type");
                return WebhookOutcome::Ignored(IgnoreReason::UnsupportedType(
                    message_type.clone(),
                ));
            }
        };

        match self.reply(&msg.from, reply).await {
            Ok(receipt) => WebhookOutcome::Replied {
                to: msg.from,
                kind,
                receipt,
            },
            Err(e) => {
                error!(error = %e, transport = e.is_transport(), "Error processing webhook");
                WebhookOutcome::Failed(e.to_string())
            }
        }
    }

    async fn reply(&self, to: &str, text: String) -> Result<DeliveryReceipt> {
        self.api.send_text(&OutgoingMessage::text(to, text)).await
    }
}

//! Message - outbound message types and the outbound API seam
//!
//! The inbound handler only ever talks to the platform through
//! [`OutboundApi`], so tests can swap the HTTP client for a mock.

/// A plain-text reply addressed to a WhatsApp user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// Recipient phone number / WhatsApp id
    pub to: String,
    /// Text content
    pub text: String,
}

impl OutgoingMessage {
    /// Create a simple text message
    #[must_use]
    pub fn text(to: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            text: content.into(),
        }
    }
}

/// What the platform reported back after accepting a message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Platform-assigned message id (`wamid.*`)
    pub message_id: Option<String>,
    /// Resolved WhatsApp id of the recipient
    pub wa_id: Option<String>,
}

/// Outbound calls against the WhatsApp Business Cloud API
///
/// Every method performs exactly one HTTP round trip. Failures are logged by
/// the implementation and returned unchanged; nothing is retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait OutboundApi: Send + Sync {
    /// Send a text message
    async fn send_text(&self, message: &OutgoingMessage) -> crate::Result<DeliveryReceipt>;

    /// Exchange a media reference id for a short-lived download URL
    async fn resolve_media_url(&self, media_id: &str) -> crate::Result<String>;

    /// Download raw media bytes from a URL returned by [`Self::resolve_media_url`]
    async fn fetch_media_bytes(&self, url: &str) -> crate::Result<Vec<u8>>;
}

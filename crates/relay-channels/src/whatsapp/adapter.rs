use super::config::WhatsAppBusinessConfig;
use super::types::{ApiResponse, MediaResponse, SendTextRequest, TextBody};
use crate::error::{Error, Result};
use crate::message::{DeliveryReceipt, OutboundApi, OutgoingMessage};

use secrecy::ExposeSecret;
use tracing::{debug, error, info};

/// WhatsApp Business Cloud API client
pub struct WhatsAppBusinessAdapter {
    config: WhatsAppBusinessConfig,
    client: reqwest::Client,
}

impl WhatsAppBusinessAdapter {
    /// Create a new WhatsApp Business adapter
    ///
    /// The HTTP client keeps reqwest's default timeouts.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: WhatsAppBusinessConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Transport(format!("Failed to create HTTP client: {e}")))?;

        info!(phone_number_id = %config.phone_number_id, "WhatsApp Business API adapter initialized");

        Ok(Self { config, client })
    }

    /// Turn a response into its body, or into [`Error::Api`] carrying the
    /// vendor's error body
    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(Error::Api {
            status: status.as_u16(),
            body,
        })
    }

    async fn try_send_text(&self, message: &OutgoingMessage) -> Result<DeliveryReceipt> {
        let request = SendTextRequest {
            messaging_product: "whatsapp",
            to: &message.to,
            message_type: "text",
            text: TextBody {
                body: &message.text,
            },
        };

        let resp = self
            .client
            .post(self.config.messages_url())
            .bearer_auth(self.config.access_token.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Failed to send message: {e}")))?;

        let resp: ApiResponse = Self::check_status(resp)
            .await?
            .json()
            .await
            .map_err(|e| Error::Parse(format!("Invalid API response: {e}")))?;

        Ok(DeliveryReceipt {
            message_id: resp.messages.into_iter().next().map(|m| m.id),
            wa_id: resp.contacts.into_iter().next().map(|c| c.wa_id),
        })
    }

    async fn try_resolve_media_url(&self, media_id: &str) -> Result<String> {
        let resp = self
            .client
            .get(self.config.media_url(media_id))
            .bearer_auth(self.config.access_token.expose_secret())
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Failed to get media URL: {e}")))?;

        let media: MediaResponse = Self::check_status(resp)
            .await?
            .json()
            .await
            .map_err(|e| Error::Parse(format!("Invalid media response: {e}")))?;

        debug!(media_id, mime_type = ?media.mime_type, "Resolved media URL");
        Ok(media.url)
    }

    async fn try_fetch_media_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get(url)
            .bearer_auth(self.config.access_token.expose_secret())
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Failed to download media: {e}")))?;

        let bytes = Self::check_status(resp)
            .await?
            .bytes()
            .await
            .map_err(|e| Error::Transport(format!("Failed to read media body: {e}")))?;

        Ok(bytes.to_vec())
    }
}

#[async_trait::async_trait]
impl OutboundApi for WhatsAppBusinessAdapter {
    async fn send_text(&self, message: &OutgoingMessage) -> Result<DeliveryReceipt> {
        match self.try_send_text(message).await {
            Ok(receipt) => {
                info!(to = %message.to, message_id = ?receipt.message_id, "Message sent successfully");
                Ok(receipt)
            }
            Err(e) => {
                error!(to = %message.to, error = %e, "Failed to send message");
                Err(e)
            }
        }
    }

    async fn resolve_media_url(&self, media_id: &str) -> Result<String> {
        self.try_resolve_media_url(media_id).await.map_err(|e| {
            error!(media_id, error = %e, "Failed to get media URL");
            e
        })
    }

    async fn fetch_media_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.try_fetch_media_bytes(url).await.map_err(|e| {
            error!(error = %e, "Failed to download media");
            e
        })
    }
}

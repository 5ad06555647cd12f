use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Subscription keyword Meta sends in `hub.mode`
pub const SUBSCRIBE_MODE: &str = "subscribe";

/// WhatsApp Business API configuration
///
/// Built once at startup and shared read-only by the webhook handler and
/// the outbound client.
#[derive(Debug, Clone, Deserialize)]
pub struct WhatsAppBusinessConfig {
    /// Access token (bearer token from Meta Business Suite)
    #[serde(default = "empty_secret")]
    pub access_token: SecretString,
    /// Phone Number ID (the bot's phone number ID)
    #[serde(default)]
    pub phone_number_id: String,
    /// Webhook verify token (shared secret for the subscription handshake)
    #[serde(default = "empty_secret")]
    pub verify_token: SecretString,
    /// API version (default: v18.0)
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Graph API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

fn default_api_version() -> String {
    "v18.0".to_string()
}

fn default_api_base_url() -> String {
    "https://graph.facebook.com".to_string()
}

impl WhatsAppBusinessConfig {
    /// Create with required fields
    #[must_use]
    pub fn new(access_token: impl Into<String>, phone_number_id: impl Into<String>) -> Self {
        Self {
            access_token: SecretString::from(access_token.into()),
            phone_number_id: phone_number_id.into(),
            verify_token: empty_secret(),
            api_version: default_api_version(),
            api_base_url: default_api_base_url(),
        }
    }

    /// Set webhook verify token
    #[must_use]
    pub fn with_verify_token(mut self, token: impl Into<String>) -> Self {
        self.verify_token = SecretString::from(token.into());
        self
    }

    /// Set API version
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Point the client at a different Graph API host
    #[must_use]
    pub fn with_api_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into();
        self
    }

    /// Whether an access token is configured
    #[must_use]
    pub fn has_access_token(&self) -> bool {
        !self.access_token.expose_secret().is_empty()
    }

    /// Whether a verify token is configured
    #[must_use]
    pub fn has_verify_token(&self) -> bool {
        !self.verify_token.expose_secret().is_empty()
    }

    fn versioned_base(&self) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            self.api_version
        )
    }

    /// Get API URL for messages endpoint
    pub(crate) fn messages_url(&self) -> String {
        format!("{}/{}/messages", self.versioned_base(), self.phone_number_id)
    }

    /// Get API URL for a media object
    pub(crate) fn media_url(&self, media_id: &str) -> String {
        format!("{}/{}", self.versioned_base(), media_id)
    }
}

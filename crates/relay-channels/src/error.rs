//! Error types for relay-channels

use thiserror::Error;

/// Channel error type
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a usable HTTP response
    #[error("transport error: {0}")]
    Transport(String),

    /// The WhatsApp API answered with a non-success status
    #[error("whatsapp api error {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw error body returned by the API
        body: String,
    },

    /// A response body could not be parsed
    #[error("response parsing error: {0}")]
    Parse(String),

    /// An inbound webhook body could not be decoded
    #[error("webhook decode error: {0}")]
    Decode(String),
}

impl Error {
    /// Whether the failure came from the outbound HTTP round trip
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Api { .. })
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

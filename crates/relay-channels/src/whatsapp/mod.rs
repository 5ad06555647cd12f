//! WhatsApp Business Cloud API channel
//!
//! # Setup
//!
//! 1. Create a Meta Business account and a WhatsApp Business app
//! 2. Get your Access Token and Phone Number ID
//! 3. Point the app's webhook at this server and pick a verify token

/// WhatsApp Business Cloud API client.
pub mod adapter;
/// WhatsApp Business API configuration and credentials.
pub mod config;
/// Incoming webhook handler.
pub mod handler;
/// Wire types and the typed notification decode.
pub mod types;

pub use adapter::WhatsAppBusinessAdapter;
pub use config::WhatsAppBusinessConfig;
pub use handler::{Acknowledgement, IgnoreReason, WebhookHandler, WebhookOutcome};
pub use types::{InboundMessage, MessageKind, Notification};

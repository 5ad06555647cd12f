//! Relay Channels - WhatsApp Business webhook plumbing
//!
//! This crate provides the two halves of the relay:
//! - the inbound [`WebhookHandler`] (subscription verification and delivery handling)
//! - the outbound [`WhatsAppBusinessAdapter`] (send text, resolve and download media)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod message;
pub mod util;
pub mod whatsapp;

pub use error::{Error, Result};

// Re-export message types
pub use message::{DeliveryReceipt, OutboundApi, OutgoingMessage};

// Re-export WhatsApp types
pub use whatsapp::{
    Acknowledgement, IgnoreReason, InboundMessage, MessageKind, Notification, WebhookHandler,
    WebhookOutcome, WhatsAppBusinessAdapter, WhatsAppBusinessConfig,
};

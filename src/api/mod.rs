//! HTTP API module for the relay
//!
//! Provides:
//! - `GET /` and `POST /`: WhatsApp Business webhook verification and delivery
//! - `GET /health`: liveness for load balancers

pub mod health;
pub mod webhooks;

pub use health::health_routes;
pub use webhooks::webhooks_routes;

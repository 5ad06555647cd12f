//! Server initialization and run loop

use super::config::AppConfig;
use anyhow::{Context, Result};
use axum::{Extension, Router};
use relay_channels::util::yes_no;
use relay_channels::{OutboundApi, WebhookHandler, WhatsAppBusinessAdapter};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the HTTP router around a webhook handler
pub fn build_router(handler: Arc<WebhookHandler>) -> Router {
    Router::new()
        .merge(crate::api::webhooks_routes())
        .merge(crate::api::health_routes())
        .layer(Extension(handler))
        .layer(TraceLayer::new_for_http())
}

/// Wire the outbound client and the webhook handler from configuration
pub fn build_handler(config: &AppConfig) -> Result<Arc<WebhookHandler>> {
    let adapter = WhatsAppBusinessAdapter::new(config.whatsapp.clone())
        .context("Failed to create WhatsApp Business adapter")?;
    let api: Arc<dyn OutboundApi> = Arc::new(adapter);

    Ok(Arc::new(WebhookHandler::new(&config.whatsapp, api)))
}

/// Serve until a shutdown signal arrives
pub async fn serve(config: AppConfig) -> Result<()> {
    let handler = build_handler(&config)?;
    let app = build_router(handler);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server listening on http://{}", addr);
    let phone_number_id = match config.whatsapp.phone_number_id.as_str() {
        "" => "NOT SET",
        id => id,
    };
    info!(
        phone_number_id,
        token_configured = yes_no(config.whatsapp.has_access_token()),
        "WhatsApp relay ready"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Relay shutdown complete");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received SIGTERM signal");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::config::ServerConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use relay_channels::WhatsAppBusinessConfig;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_router_from_config() {
        let config = AppConfig {
            server: ServerConfig::default(),
            whatsapp: WhatsAppBusinessConfig::new("token", "123").with_verify_token("v"),
        };
        let app = build_router(build_handler(&config).unwrap());

        let response = app
            .clone()
            .oneshot(
                Request::get("/?hub.mode=subscribe&hub.verify_token=v&hub.challenge=ok")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

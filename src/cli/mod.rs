//! CLI module for the relay
//!
//! - `serve`: run the webhook server (default)
//! - `doctor`: check configuration without starting the server

use clap::{Parser, Subcommand};

pub mod doctor;

/// WhatsApp Business webhook relay
#[derive(Parser, Debug)]
#[command(name = "relay")]
#[command(about = "Replies to WhatsApp Business webhook deliveries")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the server (default)
    Serve {
        /// Override the listening port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Check configuration and print a redacted summary
    Doctor,
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Doctor) => doctor::run(),
        Some(Commands::Serve { port }) => serve(port).await,
        None => serve(None).await,
    }
}

async fn serve(port: Option<u16>) -> anyhow::Result<()> {
    let mut config = crate::server::load_config()?;
    if let Some(port) = port {
        config.server.port = port;
    }
    crate::server::validate_config(&config);
    crate::server::serve(config).await
}

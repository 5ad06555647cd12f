//! Server module for the relay
//!
//! # Module Structure
//!
//! - `config`: Configuration structures
//! - `loader`: Configuration loading from files and environment
//! - `validation`: Startup configuration checks
//! - `init`: Router construction and the run loop

pub mod config;
mod init;
mod loader;
mod validation;

// Re-export public API
pub use init::serve;
pub use loader::load_config;
pub use validation::{check_config, validate_config};

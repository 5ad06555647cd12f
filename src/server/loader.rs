//! Configuration loading
//!
//! Handles loading configuration from embedded defaults, files, and environment.

use super::config::AppConfig;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use std::collections::HashMap;

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Flat environment variables understood for compatibility with existing
/// deployments, mapped to their configuration keys
const FLAT_ENV_KEYS: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("VERIFY_TOKEN", "whatsapp.verify_token"),
    ("WHATSAPP_TOKEN", "whatsapp.access_token"),
    ("PHONE_NUMBER_ID", "whatsapp.phone_number_id"),
];

/// Load configuration from files and the process environment
pub fn load_config() -> Result<AppConfig> {
    load_config_from(std::env::vars().collect())
}

/// Load configuration against an explicit environment map
pub(crate) fn load_config_from(env: HashMap<String, String>) -> Result<AppConfig> {
    let mut builder = Config::builder()
        // 1. Embedded defaults (always available)
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        // 2. External overrides (optional)
        .add_source(File::with_name("config/local").required(false))
        // 3. Prefixed environment variables, e.g. RELAY_SERVER__PORT
        .add_source(
            Environment::with_prefix("RELAY")
                .prefix_separator("_")
                .separator("__")
                .source(Some(env.clone())),
        );

    // 4. Flat variables (highest priority)
    for (var, key) in FLAT_ENV_KEYS {
        let value = env.get(*var).filter(|v| !v.is_empty()).cloned();
        builder = builder
            .set_override_option(*key, value)
            .with_context(|| format!("Invalid value for {var}"))?;
    }

    builder
        .build()
        .context("Failed to build configuration")?
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = load_config_from(HashMap::new()).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.whatsapp.api_version, "v18.0");
        assert_eq!(config.whatsapp.api_base_url, "https://graph.facebook.com");
        assert!(!config.whatsapp.has_access_token());
        assert!(!config.whatsapp.has_verify_token());
    }

    #[test]
    fn test_flat_variables() {
        let config = load_config_from(env(&[
            ("PORT", "8080"),
            ("VERIFY_TOKEN", "verify-me"),
            ("WHATSAPP_TOKEN", "EAAG123"),
            ("PHONE_NUMBER_ID", "109876543210"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.whatsapp.verify_token.expose_secret(), "verify-me");
        assert_eq!(config.whatsapp.access_token.expose_secret(), "EAAG123");
        assert_eq!(config.whatsapp.phone_number_id, "109876543210");
    }

    #[test]
    fn test_prefixed_variables() {
        let config = load_config_from(env(&[
            ("RELAY_SERVER__HOST", "127.0.0.1"),
            ("RELAY_WHATSAPP__API_VERSION", "v19.0"),
        ]))
        .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.whatsapp.api_version, "v19.0");
    }

    #[test]
    fn test_numeric_secrets_kept_verbatim() {
        let config = load_config_from(env(&[
            ("RELAY_WHATSAPP__VERIFY_TOKEN", "007"),
            ("RELAY_WHATSAPP__ACCESS_TOKEN", "123456789012345678901234567890"),
            ("RELAY_WHATSAPP__PHONE_NUMBER_ID", "0109876543210"),
            ("RELAY_SERVER__PORT", "4000"),
        ]))
        .unwrap();

        assert_eq!(config.whatsapp.verify_token.expose_secret(), "007");
        assert_eq!(
            config.whatsapp.access_token.expose_secret(),
            "123456789012345678901234567890"
        );
        assert_eq!(config.whatsapp.phone_number_id, "0109876543210");
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_flat_variables_win_over_prefixed() {
        let config = load_config_from(env(&[
            ("RELAY_SERVER__PORT", "4000"),
            ("PORT", "5000"),
        ]))
        .unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_empty_flat_variable_is_ignored() {
        let config = load_config_from(env(&[("PORT", "")])).unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        assert!(load_config_from(env(&[("PORT", "not-a-port")])).is_err());
    }
}

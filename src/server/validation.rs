//! Startup configuration checks
//!
//! Missing credentials are reported but never fatal: the relay still answers
//! webhooks, it just cannot verify or reply.

use super::config::AppConfig;
use tracing::warn;

/// A configuration problem worth surfacing at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    MissingAccessToken,
    MissingPhoneNumberId,
    MissingVerifyToken,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingAccessToken => {
                write!(f, "WHATSAPP_TOKEN is not set; replies will be rejected by the API")
            }
            Self::MissingPhoneNumberId => {
                write!(f, "PHONE_NUMBER_ID is not set; replies have no sender number")
            }
            Self::MissingVerifyToken => write!(
                f,
                "VERIFY_TOKEN is not set; webhook verification will always fail"
            ),
        }
    }
}

/// Collect configuration problems
#[must_use]
pub fn check_config(config: &AppConfig) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if !config.whatsapp.has_access_token() {
        warnings.push(ConfigWarning::MissingAccessToken);
    }
    if config.whatsapp.phone_number_id.trim().is_empty() {
        warnings.push(ConfigWarning::MissingPhoneNumberId);
    }
    if !config.whatsapp.has_verify_token() {
        warnings.push(ConfigWarning::MissingVerifyToken);
    }

    warnings
}

/// Log every configuration problem as a warning
pub fn validate_config(config: &AppConfig) {
    for warning in check_config(config) {
        warn!("CONFIG WARNING: {}", warning);
    }
}

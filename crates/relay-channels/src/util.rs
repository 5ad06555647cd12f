//! Common utilities for the WhatsApp channel
//!
//! Logging helpers shared by the inbound handler and the outbound client.

/// Maximum length of text to log (to prevent sensitive data exposure)
pub const MAX_LOG_TEXT_LENGTH: usize = 50;

/// Patterns that indicate potentially sensitive content
pub const SENSITIVE_PATTERNS: &[&str] = &[
    "password",
    "passwd",
    "secret",
    "token",
    "api_key",
    "apikey",
    "api-key",
    "bearer",
    "authorization",
    "credential",
    "private",
    "-----begin",
];

/// Mask potentially sensitive text for logging
///
/// Checks for sensitive patterns and truncates long messages
/// to prevent accidental exposure of sensitive data in logs.
///
/// # Examples
/// ```
/// use relay_channels::util::mask_for_logging;
///
/// // Sensitive content is redacted
/// assert!(mask_for_logging("my password is secret123").contains("REDACTED"));
///
/// // Normal short messages pass through
/// assert_eq!(mask_for_logging("Hello"), "Hello");
/// ```
#[must_use]
pub fn mask_for_logging(text: &str) -> String {
    let lower = text.to_lowercase();

    for pattern in SENSITIVE_PATTERNS {
        if lower.contains(pattern) {
            return "[REDACTED - potentially sensitive content]".to_string();
        }
    }

    if text.chars().count() > MAX_LOG_TEXT_LENGTH {
        let head: String = text.chars().take(MAX_LOG_TEXT_LENGTH).collect();
        format!("{head}...[truncated]")
    } else {
        text.to_string()
    }
}

/// Render a yes/no flag for startup banners
#[must_use]
pub fn yes_no(value: bool) -> &'static str {
    if value {
        "YES"
    } else {
        "NO"
    }
}

//! Secret values (API keys, passwords) and redaction helpers.
//!
//! A [`Secret`] never prints or serializes its contents; call
//! [`Secret::expose`] at the exact point where the raw value is needed.

use std::fmt;

use serde::{Serialize, Serializer};

/// Placeholder written instead of a secret value.
pub const REDACTED: &str = "[REDACTED]";

/// Checks whether a key name refers to a secret.
pub fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_uppercase();
    key.contains("KEY") || key.contains("PASSWORD") || key.contains("TOKEN") || key.contains("SECRET")
}

/// Returns [`REDACTED`] for secret keys, the value itself otherwise.
pub fn redact_if_secret(key: &str, value: &str) -> String {
    if is_secret_key(key) {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}

/// String wrapper that redacts on `Debug`, `Display` and `Serialize`.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Box<str>);

impl Secret {
    /// Wraps a secret value.
    pub fn new(value: impl Into<Box<str>>) -> Self {
        Self(value.into())
    }

    /// Borrows the underlying value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value.into_boxed_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_never_prints_its_value() {
        let secret = Secret::new("sk-live-123");
        assert_eq!(format!("{secret}"), REDACTED);
        assert_eq!(format!("{secret:?}"), REDACTED);
        assert_eq!(serde_json::to_string(&secret).unwrap(), "\"[REDACTED]\"");
        assert_eq!(secret.expose(), "sk-live-123");
    }

    #[test]
    fn secret_keys_are_detected() {
        assert!(is_secret_key("OPENAI_API_KEY"));
        assert!(is_secret_key("POSTGRES_PASSWORD"));
        assert!(!is_secret_key("POSTGRES_HOST"));
        assert_eq!(redact_if_secret("COHERE_API_KEY", "abc"), REDACTED);
        assert_eq!(redact_if_secret("APP_NAME", "mini-rag"), "mini-rag");
    }
}

//! Unified error handling for `app-config`.
//!
//! Every failure the provider can report lives in [`ConfigError`]. All of them
//! are fatal and surface once, at start-up: the application must refuse to run
//! with partial or guessed settings.
//!
//! Small helpers for coercing raw key/value strings into typed fields are
//! provided here too and return the crate-wide [`Result<T>`] alias.
//!
//! All messages carry the prefix `[App Config]` to simplify attribution in logs.

use std::path::PathBuf;

use thiserror::Error;

use crate::secret::redact_if_secret;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, ConfigError>;

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for configuration loading and validation.
///
/// Only errors that realistically happen at load time belong here.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required key is absent or holds only whitespace.
    #[error("[App Config] missing required setting: {0}")]
    MissingField(&'static str),

    /// Raw value could not be coerced into the declared type.
    #[error("[App Config] invalid value for {field}: {raw:?} (expected {expected})")]
    TypeCoercion {
        /// Key name (e.g., `FILE_MAX_SIZE`).
        field: &'static str,
        /// Raw value as read from the source (redacted for secret keys).
        raw: String,
        /// Human-readable target type (e.g., `positive integer`).
        expected: &'static str,
    },

    /// The source carried keys that are not part of the schema.
    #[error("[App Config] unknown setting(s): {}", .0.join(", "))]
    UnknownField(Vec<String>),

    /// Value is not one of the allowed literals for an enumerated key.
    #[error("[App Config] invalid value for {field}: {value:?} (allowed: {})", .allowed.join(", "))]
    InvalidEnumValue {
        /// Key name (e.g., `VECTOR_DB_BACKEND`).
        field: &'static str,
        /// Offending value.
        value: String,
        /// Literals accepted for this key.
        allowed: Vec<String>,
    },

    /// Value parsed but violates a range or shape constraint.
    #[error("[App Config] {field} is out of range: {detail}")]
    OutOfRange {
        /// Key name (e.g., `GENERATION_DEFAULT_TEMPERATURE`).
        field: &'static str,
        /// Description of the constraint (e.g., `expected 0.0..=2.0`).
        detail: &'static str,
    },

    /// The env file exists but could not be read or parsed.
    #[error("[App Config] failed to read env file {}: {source}", path.display())]
    Source {
        /// Path of the env file.
        path: PathBuf,
        /// Underlying dotenvy error.
        #[source]
        source: dotenvy::Error,
    },
}

impl ConfigError {
    /// Builds a [`ConfigError::TypeCoercion`], redacting `raw` when `field`
    /// names a secret.
    pub(crate) fn coercion(field: &'static str, raw: &str, expected: &'static str) -> Self {
        ConfigError::TypeCoercion {
            field,
            raw: redact_if_secret(field, raw),
            expected,
        }
    }
}

/* ------------------------------------------------------------------------- */
/* Coercion helpers                                                          */
/* ------------------------------------------------------------------------- */

/// Parses a strictly positive `u64`.
///
/// # Errors
/// - [`ConfigError::TypeCoercion`] if `raw` is not an unsigned integer.
/// - [`ConfigError::OutOfRange`] if the value is zero.
pub fn parse_positive_u64(field: &'static str, raw: &str) -> Result<u64> {
    let value = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::coercion(field, raw, "positive integer"))?;
    if value == 0 {
        return Err(ConfigError::OutOfRange {
            field,
            detail: "must be greater than zero",
        });
    }
    Ok(value)
}

/// Parses a strictly positive `u32`.
///
/// # Errors
/// Same as [`parse_positive_u64`], plus overflow past `u32::MAX` is reported
/// as [`ConfigError::TypeCoercion`].
pub fn parse_positive_u32(field: &'static str, raw: &str) -> Result<u32> {
    let value = raw
        .trim()
        .parse::<u32>()
        .map_err(|_| ConfigError::coercion(field, raw, "positive 32-bit integer"))?;
    if value == 0 {
        return Err(ConfigError::OutOfRange {
            field,
            detail: "must be greater than zero",
        });
    }
    Ok(value)
}

/// Parses a TCP port (`1..=65535`).
///
/// # Errors
/// [`ConfigError::TypeCoercion`] for anything that is not a non-zero `u16`.
pub fn parse_port(field: &'static str, raw: &str) -> Result<u16> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ConfigError::coercion(field, raw, "u16 (1..=65535)")),
    }
}

/// Parses an `f32`.
///
/// # Errors
/// [`ConfigError::TypeCoercion`] if `raw` is not a float literal.
pub fn parse_f32(field: &'static str, raw: &str) -> Result<f32> {
    raw.trim()
        .parse::<f32>()
        .map_err(|_| ConfigError::coercion(field, raw, "float"))
}

/// Decodes a JSON-encoded array of strings, e.g. `["text/plain","application/pdf"]`.
///
/// Order is preserved; duplicates are kept as written.
///
/// # Errors
/// - [`ConfigError::TypeCoercion`] if `raw` is not a JSON array of strings.
/// - [`ConfigError::OutOfRange`] if the array is empty.
pub fn parse_string_list(field: &'static str, raw: &str) -> Result<Vec<String>> {
    let items: Vec<String> = serde_json::from_str(raw.trim())
        .map_err(|_| ConfigError::coercion(field, raw, "JSON array of strings"))?;
    if items.is_empty() {
        return Err(ConfigError::OutOfRange {
            field,
            detail: "list must not be empty",
        });
    }
    Ok(items)
}

/* ------------------------------------------------------------------------- */
/* Validation helpers                                                        */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::OutOfRange`] when the string does not start with a
/// valid HTTP scheme.
pub fn validate_http_endpoint(field: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            detail: "must start with http:// or https://",
        })
    }
}

/// Validates that a floating-point value is finite and lies within `[min, max]`.
///
/// # Errors
/// Returns [`ConfigError::OutOfRange`] if `value` is outside the range.
pub fn validate_range_f32(
    field: &'static str,
    value: f32,
    min: f32,
    max: f32,
    detail: &'static str,
) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, detail })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_integers_reject_zero_and_garbage() {
        assert_eq!(parse_positive_u64("FILE_MAX_SIZE", " 10 ").unwrap(), 10);
        assert!(matches!(
            parse_positive_u64("FILE_MAX_SIZE", "0"),
            Err(ConfigError::OutOfRange { field: "FILE_MAX_SIZE", .. })
        ));
        assert!(matches!(
            parse_positive_u64("FILE_MAX_SIZE", "-3"),
            Err(ConfigError::TypeCoercion { field: "FILE_MAX_SIZE", .. })
        ));
        assert!(matches!(
            parse_positive_u32("EMBEDDING_MODEL_SIZE", "4294967296"),
            Err(ConfigError::TypeCoercion { .. })
        ));
    }

    #[test]
    fn port_must_be_non_zero_u16() {
        assert_eq!(parse_port("POSTGRES_PORT", "5432").unwrap(), 5432);
        assert!(parse_port("POSTGRES_PORT", "0").is_err());
        assert!(parse_port("POSTGRES_PORT", "70000").is_err());
    }

    #[test]
    fn string_list_is_decoded_in_order() {
        let list = parse_string_list("FILE_ALLOWED_TYPES", r#"["text/plain", "application/pdf"]"#)
            .unwrap();
        assert_eq!(list, vec!["text/plain", "application/pdf"]);
    }

    #[test]
    fn string_list_rejects_non_json_and_empty() {
        let err = parse_string_list("FILE_ALLOWED_TYPES", "text/plain,application/pdf").unwrap_err();
        match err {
            ConfigError::TypeCoercion { field, raw, .. } => {
                assert_eq!(field, "FILE_ALLOWED_TYPES");
                assert_eq!(raw, "text/plain,application/pdf");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            parse_string_list("FILE_ALLOWED_TYPES", "[]"),
            Err(ConfigError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_string_list("FILE_ALLOWED_TYPES", "[1, 2]"),
            Err(ConfigError::TypeCoercion { .. })
        ));
    }

    #[test]
    fn coercion_errors_redact_secret_values() {
        let err = ConfigError::coercion("POSTGRES_PASSWORD", "hunter2", "string");
        assert!(!err.to_string().contains("hunter2"));
    }

    #[test]
    fn range_check_rejects_nan() {
        assert!(validate_range_f32("T", f32::NAN, 0.0, 2.0, "expected 0.0..=2.0").is_err());
        assert!(validate_range_f32("T", 2.0, 0.0, 2.0, "expected 0.0..=2.0").is_ok());
    }

    #[test]
    fn endpoint_requires_http_scheme() {
        assert!(validate_http_endpoint("OPENAI_API_URL", "https://api.openai.com/v1").is_ok());
        assert!(validate_http_endpoint("OPENAI_API_URL", "api.openai.com").is_err());
    }
}

//! Input and outcome types of an upload check.

/// A proposed file, described only by what the caller declares.
///
/// The size is taken as given; it is not re-measured here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    /// Declared MIME type, compared verbatim (no parameter stripping).
    pub content_type: String,
    /// Declared size in bytes.
    pub size_bytes: u64,
}

impl UploadCandidate {
    /// Creates a candidate from a declared content type and size.
    pub fn new(content_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            content_type: content_type.into(),
            size_bytes,
        }
    }
}

/// Outcome of an upload check. A rejection is a normal result, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The file may proceed to ingestion.
    Accepted,
    /// The file must not be ingested; the reason is meant for the end user.
    Rejected(String),
}

impl ValidationResult {
    /// Message returned with [`ValidationResult::Accepted`].
    pub const ACCEPTED_MESSAGE: &'static str = "File is valid.";

    /// `true` for [`ValidationResult::Accepted`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accepted)
    }

    /// Human-readable message for either outcome.
    pub fn message(&self) -> &str {
        match self {
            ValidationResult::Accepted => Self::ACCEPTED_MESSAGE,
            ValidationResult::Rejected(reason) => reason.as_str(),
        }
    }

    /// `(accepted, message)` pair as expected by the ingestion layer.
    pub fn into_pair(self) -> (bool, String) {
        match self {
            ValidationResult::Accepted => (true, Self::ACCEPTED_MESSAGE.to_string()),
            ValidationResult::Rejected(reason) => (false, reason),
        }
    }
}

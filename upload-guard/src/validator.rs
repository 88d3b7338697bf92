//! Content-type and size policy.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. content type must be one of [`FilePolicy::allowed_content_types`]
//!    (exact, case-sensitive; `text/plain; charset=utf-8` is NOT `text/plain`);
//! 2. size must not exceed `max_file_size_mb * BYTES_PER_MB`. A file of
//!    exactly the limit is accepted; an empty file always passes this check.
//!
//! Only one reason is ever reported, even if both checks would fail.

use app_config::{FilePolicy, Settings};
use tracing::debug;

use crate::candidate::{UploadCandidate, ValidationResult};

/// Bytes per megabyte as used by `FILE_MAX_SIZE` (2^20, not 10^6).
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Validator bound to a file policy.
///
/// Holds only a shared reference, so one instance can serve concurrent
/// callers without locking.
#[derive(Debug, Clone, Copy)]
pub struct UploadValidator<'a> {
    policy: &'a FilePolicy,
}

impl<'a> UploadValidator<'a> {
    /// Binds a validator to `policy`.
    pub fn new(policy: &'a FilePolicy) -> Self {
        Self { policy }
    }

    /// Binds a validator to the file section of `settings`.
    pub fn from_settings(settings: &'a Settings) -> Self {
        Self::new(&settings.files)
    }

    /// Largest accepted size in bytes.
    pub fn max_bytes(&self) -> u64 {
        self.policy.max_file_size_mb.saturating_mul(BYTES_PER_MB)
    }

    /// Checks `candidate` against the policy.
    pub fn validate(&self, candidate: &UploadCandidate) -> ValidationResult {
        let result = validate_upload(candidate, self.policy);
        if let ValidationResult::Rejected(reason) = &result {
            debug!(
                content_type = %candidate.content_type,
                size_bytes = candidate.size_bytes,
                %reason,
                "upload rejected"
            );
        }
        result
    }
}

/// Checks `candidate` against `policy`. Pure and deterministic.
pub fn validate_upload(candidate: &UploadCandidate, policy: &FilePolicy) -> ValidationResult {
    if !policy
        .allowed_content_types
        .iter()
        .any(|allowed| *allowed == candidate.content_type)
    {
        return ValidationResult::Rejected(format!(
            "File type {} is not allowed.",
            candidate.content_type
        ));
    }

    let max_bytes = policy.max_file_size_mb.saturating_mul(BYTES_PER_MB);
    if candidate.size_bytes > max_bytes {
        return ValidationResult::Rejected(format!(
            "File size exceeds the maximum limit of {} MB.",
            policy.max_file_size_mb
        ));
    }

    ValidationResult::Accepted
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn policy() -> FilePolicy {
        FilePolicy {
            allowed_content_types: vec!["application/pdf".into(), "text/plain".into()],
            max_file_size_mb: 5,
            default_chunk_size: 512_000,
        }
    }

    #[test]
    fn disallowed_type_is_rejected_with_its_name() {
        let policy = policy();
        let result = UploadValidator::new(&policy).validate(&UploadCandidate::new("image/png", 100));
        assert_eq!(
            result,
            ValidationResult::Rejected("File type image/png is not allowed.".into())
        );
    }

    #[test]
    fn size_equal_to_limit_is_accepted() {
        let policy = policy();
        let result = UploadValidator::new(&policy)
            .validate(&UploadCandidate::new("text/plain", 5 * 1024 * 1024));
        assert_eq!(result, ValidationResult::Accepted);
        assert_eq!(result.message(), "File is valid.");
    }

    #[test]
    fn one_byte_over_limit_is_rejected() {
        let policy = policy();
        let result = UploadValidator::new(&policy)
            .validate(&UploadCandidate::new("text/plain", 5 * 1024 * 1024 + 1));
        assert_eq!(
            result,
            ValidationResult::Rejected("File size exceeds the maximum limit of 5 MB.".into())
        );
    }

    #[test]
    fn empty_file_passes_size_check() {
        let policy = policy();
        let validator = UploadValidator::new(&policy);
        assert!(validator.validate(&UploadCandidate::new("application/pdf", 0)).is_accepted());
        assert!(!validator.validate(&UploadCandidate::new("image/gif", 0)).is_accepted());
    }

    #[test]
    fn type_rejection_wins_when_both_checks_fail() {
        let policy = policy();
        let result = validate_upload(&UploadCandidate::new("video/mp4", u64::MAX), &policy);
        assert_eq!(result.message(), "File type video/mp4 is not allowed.");
    }

    #[test]
    fn content_type_match_is_exact() {
        let policy = policy();
        let validator = UploadValidator::new(&policy);
        for declared in ["Text/Plain", "text/plain; charset=utf-8", " text/plain", "text/plain "] {
            let result = validator.validate(&UploadCandidate::new(declared, 1));
            assert_eq!(
                result,
                ValidationResult::Rejected(format!("File type {declared} is not allowed."))
            );
        }
    }

    #[test]
    fn megabyte_is_binary() {
        let policy = FilePolicy {
            max_file_size_mb: 1,
            ..policy()
        };
        let validator = UploadValidator::new(&policy);
        assert_eq!(validator.max_bytes(), 1_048_576);
        assert!(validator.validate(&UploadCandidate::new("text/plain", 1_000_001)).is_accepted());
    }

    #[test]
    fn huge_limit_saturates_instead_of_overflowing() {
        let policy = FilePolicy {
            max_file_size_mb: u64::MAX,
            ..policy()
        };
        let validator = UploadValidator::new(&policy);
        assert_eq!(validator.max_bytes(), u64::MAX);
        assert!(validator.validate(&UploadCandidate::new("text/plain", u64::MAX)).is_accepted());
    }

    #[test]
    fn pair_form_matches_ingestion_contract() {
        assert_eq!(
            ValidationResult::Accepted.into_pair(),
            (true, "File is valid.".to_string())
        );
        assert_eq!(
            ValidationResult::Rejected("nope".into()).into_pair(),
            (false, "nope".to_string())
        );
    }

    proptest! {
        #[test]
        fn unknown_type_is_rejected_regardless_of_size(
            content_type in "[a-z]{1,10}/[a-z0-9.+-]{1,12}",
            size in any::<u64>(),
        ) {
            let policy = policy();
            prop_assume!(!policy.allowed_content_types.contains(&content_type));

            let result = validate_upload(&UploadCandidate::new(content_type.clone(), size), &policy);
            prop_assert!(!result.is_accepted());
            prop_assert!(result.message().contains(&content_type));
        }

        #[test]
        fn limit_boundary_holds_for_any_max_size(max_mb in 1u64..=1_000_000) {
            let policy = FilePolicy { max_file_size_mb: max_mb, ..policy() };
            let limit = max_mb * BYTES_PER_MB;

            let at_limit = validate_upload(&UploadCandidate::new("text/plain", limit), &policy);
            prop_assert_eq!(at_limit, ValidationResult::Accepted);

            let over = validate_upload(&UploadCandidate::new("text/plain", limit + 1), &policy);
            prop_assert!(!over.is_accepted());
            prop_assert!(over.message().contains(&max_mb.to_string()));
        }

        #[test]
        fn validation_is_idempotent(
            content_type in prop_oneof![Just("text/plain".to_string()), "[a-z]{1,8}/[a-z]{1,8}"],
            size in 0u64..=(10 * BYTES_PER_MB),
        ) {
            let policy = policy();
            let validator = UploadValidator::new(&policy);
            let candidate = UploadCandidate::new(content_type, size);
            prop_assert_eq!(validator.validate(&candidate), validator.validate(&candidate));
        }
    }
}

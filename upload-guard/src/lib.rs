//! Upload policy check applied before a document enters ingestion.
//!
//! The caller (an HTTP layer) describes the file by its declared content type
//! and size; [`UploadValidator`] answers [`ValidationResult::Accepted`] or
//! [`ValidationResult::Rejected`] with a message fit for the end user.
//!
//! # Example
//! ```
//! use app_config::FilePolicy;
//! use upload_guard::{UploadCandidate, UploadValidator};
//!
//! let policy = FilePolicy {
//!     allowed_content_types: vec!["application/pdf".into(), "text/plain".into()],
//!     max_file_size_mb: 5,
//!     default_chunk_size: 512_000,
//! };
//! let validator = UploadValidator::new(&policy);
//!
//! let result = validator.validate(&UploadCandidate::new("image/png", 100));
//! assert_eq!(result.message(), "File type image/png is not allowed.");
//! ```

pub mod candidate;
pub mod validator;

pub use candidate::{UploadCandidate, ValidationResult};
pub use validator::{BYTES_PER_MB, UploadValidator, validate_upload};

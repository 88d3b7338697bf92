//! Strict application settings for the ingestion service.
//!
//! - Load once at start-up with [`Settings::load`], wrap in `Arc`, and pass
//!   clones to dependents. There is no global accessor.
//! - The schema is closed: unknown keys in the env file fail the load.
//! - List-valued keys are JSON arrays in the raw source and are decoded here,
//!   so consumers only ever see validated `Vec`s and enums.
//! - Secrets are wrapped in [`Secret`] and never reach logs or error messages.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use app_config::Settings;
//!
//! fn main() -> Result<(), app_config::ConfigError> {
//!     let settings = Arc::new(Settings::load()?);
//!     println!("max upload: {} MB", settings.files.max_file_size_mb);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error_handler;
pub mod secret;
pub mod telemetry;

pub use config::backends::{EmbeddingBackend, GenerationBackend, VectorDbBackend};
pub use config::settings::{
    AppInfo, FilePolicy, GenerationDefaults, LanguageSettings, ModelSettings, PostgresSettings,
    ProviderCredentials, Settings, VectorDbSettings,
};
pub use config::source::{DEFAULT_ENV_FILE, RawSource};
pub use error_handler::{ConfigError, Result};
pub use secret::Secret;

//! Closed enumerations for backend selection.
//!
//! Each backend is spelled in configuration as an upper-case literal
//! (`OPENAI`, `COHERE`, `QDRANT`, `PGVECTOR`). Parsing is exact and
//! case-sensitive; anything else is a [`ConfigError::InvalidEnumValue`].
//!
//! # Examples
//!
//! ```
//! use app_config::config::backends::VectorDbBackend;
//!
//! let backend = VectorDbBackend::parse("VECTOR_DB_BACKEND", "PGVECTOR").unwrap();
//! assert_eq!(backend, VectorDbBackend::PgVector);
//! assert!(VectorDbBackend::parse("VECTOR_DB_BACKEND", "pgvector").is_err());
//! ```

use serde::Serialize;

use crate::error_handler::{ConfigError, Result};

/// Provider used for text generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GenerationBackend {
    /// OpenAI or any OpenAI-compatible endpoint.
    OpenAi,
    /// Cohere API.
    Cohere,
}

/// Provider used for embeddings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EmbeddingBackend {
    /// OpenAI or any OpenAI-compatible endpoint.
    OpenAi,
    /// Cohere API.
    Cohere,
}

/// Storage engine for document vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VectorDbBackend {
    /// Qdrant (local path or server).
    Qdrant,
    /// Postgres with the pgvector extension.
    PgVector,
}

impl GenerationBackend {
    /// Literals accepted in configuration.
    pub const LITERALS: &'static [&'static str] = &["OPENAI", "COHERE"];

    /// Configuration literal for this backend.
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationBackend::OpenAi => "OPENAI",
            GenerationBackend::Cohere => "COHERE",
        }
    }

    /// Parses the literal stored under `field`.
    pub fn parse(field: &'static str, raw: &str) -> Result<Self> {
        match raw {
            "OPENAI" => Ok(GenerationBackend::OpenAi),
            "COHERE" => Ok(GenerationBackend::Cohere),
            _ => Err(invalid_literal(field, raw, Self::LITERALS)),
        }
    }
}

impl EmbeddingBackend {
    /// Literals accepted in configuration.
    pub const LITERALS: &'static [&'static str] = &["OPENAI", "COHERE"];

    /// Configuration literal for this backend.
    pub fn as_str(self) -> &'static str {
        match self {
            EmbeddingBackend::OpenAi => "OPENAI",
            EmbeddingBackend::Cohere => "COHERE",
        }
    }

    /// Parses the literal stored under `field`.
    pub fn parse(field: &'static str, raw: &str) -> Result<Self> {
        match raw {
            "OPENAI" => Ok(EmbeddingBackend::OpenAi),
            "COHERE" => Ok(EmbeddingBackend::Cohere),
            _ => Err(invalid_literal(field, raw, Self::LITERALS)),
        }
    }
}

impl VectorDbBackend {
    /// Literals accepted in configuration.
    pub const LITERALS: &'static [&'static str] = &["QDRANT", "PGVECTOR"];

    /// Configuration literal for this backend.
    pub fn as_str(self) -> &'static str {
        match self {
            VectorDbBackend::Qdrant => "QDRANT",
            VectorDbBackend::PgVector => "PGVECTOR",
        }
    }

    /// Parses the literal stored under `field`.
    pub fn parse(field: &'static str, raw: &str) -> Result<Self> {
        match raw {
            "QDRANT" => Ok(VectorDbBackend::Qdrant),
            "PGVECTOR" => Ok(VectorDbBackend::PgVector),
            _ => Err(invalid_literal(field, raw, Self::LITERALS)),
        }
    }
}

fn invalid_literal(field: &'static str, raw: &str, allowed: &[&str]) -> ConfigError {
    ConfigError::InvalidEnumValue {
        field,
        value: raw.to_string(),
        allowed: allowed.iter().map(|s| (*s).to_string()).collect(),
    }
}

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::{
    config::{
        backends::{EmbeddingBackend, GenerationBackend, VectorDbBackend},
        keys,
        source::{RawSource, env_file_path},
    },
    error_handler::{
        ConfigError, Result, parse_f32, parse_port, parse_positive_u32, parse_positive_u64,
        parse_string_list, validate_http_endpoint, validate_range_f32,
    },
    secret::Secret,
};

/// Validated, immutable application settings.
///
/// Built once at start-up by [`Settings::load`] (or [`Settings::load_from`])
/// and then handed by reference (or inside an `Arc`) to every consumer. There
/// is no global accessor.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use app_config::Settings;
///
/// let settings = Arc::new(Settings::load()?);
/// println!("{} v{}", settings.app.name, settings.app.version);
/// # Ok::<(), app_config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    /// Application identity.
    pub app: AppInfo,
    /// Optional credentials and endpoints for hosted backends.
    pub providers: ProviderCredentials,
    /// Upload policy and chunking defaults.
    pub files: FilePolicy,
    /// Postgres connection settings.
    pub postgres: PostgresSettings,
    /// Backend and model selection.
    pub models: ModelSettings,
    /// Defaults applied to generation requests.
    pub generation: GenerationDefaults,
    /// Vector store selection.
    pub vector_db: VectorDbSettings,
    /// Language preferences.
    pub language: LanguageSettings,
}

/// Application identity.
#[derive(Debug, Clone, Serialize)]
pub struct AppInfo {
    /// `APP_NAME`.
    pub name: String,
    /// `APP_VERSION`.
    pub version: String,
}

/// Credentials for hosted providers. Absence means "not configured".
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProviderCredentials {
    /// `OPENAI_API_KEY`.
    pub openai_api_key: Option<Secret>,
    /// `OPENAI_API_URL`, for OpenAI-compatible gateways.
    pub openai_api_url: Option<String>,
    /// `COHERE_API_KEY`.
    pub cohere_api_key: Option<Secret>,
}

/// Upload policy enforced before ingestion, plus the chunking default used
/// downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilePolicy {
    /// `FILE_ALLOWED_TYPES`: exact MIME strings, in configured order.
    pub allowed_content_types: Vec<String>,
    /// `FILE_MAX_SIZE`, in megabytes (2^20 bytes).
    pub max_file_size_mb: u64,
    /// `FILE_DEFAULT_CHUNK_SIZE`. Not used by upload validation.
    pub default_chunk_size: u64,
}

/// Postgres connection settings.
#[derive(Debug, Clone, Serialize)]
pub struct PostgresSettings {
    /// `POSTGRES_USERNAME`.
    pub username: String,
    /// `POSTGRES_PASSWORD`.
    pub password: Secret,
    /// `POSTGRES_HOST`.
    pub host: String,
    /// `POSTGRES_PORT`.
    pub port: u16,
    /// `POSTGRES_MAIN_DATABASE`.
    pub main_database: String,
}

impl PostgresSettings {
    /// Connection URL for the main database. Wrapped in [`Secret`] because it
    /// embeds the password.
    pub fn connection_url(&self) -> Secret {
        Secret::from(format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username,
            self.password.expose(),
            self.host,
            self.port,
            self.main_database
        ))
    }
}

/// Backend and model selection.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSettings {
    /// `GENERATION_BACKEND`.
    pub generation_backend: GenerationBackend,
    /// `EMBEDDING_BACKEND`.
    pub embedding_backend: EmbeddingBackend,
    /// `GENERATION_MODEL_ID_LITERAL`: model ids the deployment allows.
    pub generation_model_ids: Vec<String>,
    /// `GENERATION_MODEL_ID`, always one of `generation_model_ids`.
    pub generation_model_id: String,
    /// `EMBEDDING_MODEL_ID`.
    pub embedding_model_id: String,
    /// `EMBEDDING_MODEL_SIZE`: embedding vector dimensionality.
    pub embedding_model_size: u32,
}

/// Defaults applied to generation requests.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationDefaults {
    /// `INPUT_DEFAULT_MAX_CHARACTERS`.
    pub max_input_characters: u32,
    /// `GENERATION_DEFAULT_MAX_OUTPUT_TOKENS`.
    pub max_output_tokens: u32,
    /// `GENERATION_DEFAULT_TEMPERATURE`, within `0.0..=2.0`.
    pub temperature: f32,
}

/// Vector store selection.
#[derive(Debug, Clone, Serialize)]
pub struct VectorDbSettings {
    /// `VECTOR_DB_BACKEND_LITERAL`: backends the deployment allows.
    pub allowed_backends: Vec<VectorDbBackend>,
    /// `VECTOR_DB_BACKEND`, always one of `allowed_backends`.
    pub backend: VectorDbBackend,
    /// `VECTOR_DB_PATH`.
    pub path: String,
    /// `VECTOR_DB_DISTANCE_METHOD`.
    pub distance_method: String,
    /// `VECTOR_DB_PGVEC_INDEX_THRESHOLD`.
    pub pgvector_index_threshold: u64,
}

/// Language preferences.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageSettings {
    /// `PRIMARY_LANG`.
    pub primary: String,
    /// `DEFAULT_LANG`.
    pub default: String,
}

impl Settings {
    /// Loads settings from the process environment layered over `./.env`.
    ///
    /// A missing `.env` is fine; every required key must then come from the
    /// environment.
    ///
    /// # Errors
    /// Any [`ConfigError`]; no partially built settings are ever returned.
    pub fn load() -> Result<Self> {
        let source = RawSource::from_process(&env_file_path(None))?;
        Self::from_source(&source)
    }

    /// Loads settings from the process environment layered over `env_file`,
    /// which must exist.
    ///
    /// # Errors
    /// [`ConfigError::Source`] if `env_file` cannot be read, otherwise any
    /// validation error from [`Settings::from_source`].
    pub fn load_from(env_file: &Path) -> Result<Self> {
        if !env_file.exists() {
            // Surface dotenvy's own not-found error.
            RawSource::from_env_file(env_file)?;
        }
        let source = RawSource::from_process(env_file)?;
        Self::from_source(&source)
    }

    /// Parses and validates an in-memory source.
    ///
    /// Checks run eagerly: unknown keys first (reported together), then each
    /// field in schema order. The first failing field aborts the load.
    ///
    /// # Errors
    /// - [`ConfigError::UnknownField`] for keys outside the schema.
    /// - [`ConfigError::MissingField`] for absent required keys.
    /// - [`ConfigError::TypeCoercion`] for values of the wrong type.
    /// - [`ConfigError::InvalidEnumValue`] for literals outside their enumeration.
    /// - [`ConfigError::OutOfRange`] for values violating a range.
    pub fn from_source(source: &RawSource) -> Result<Self> {
        let unknown = source.unknown_keys();
        if !unknown.is_empty() {
            return Err(ConfigError::UnknownField(unknown));
        }

        let app = AppInfo {
            name: required(source, keys::APP_NAME)?.to_string(),
            version: required(source, keys::APP_VERSION)?.to_string(),
        };

        let openai_api_url = source.get(keys::OPENAI_API_URL).map(str::to_string);
        if let Some(url) = &openai_api_url {
            validate_http_endpoint(keys::OPENAI_API_URL, url)?;
        }
        let providers = ProviderCredentials {
            openai_api_key: optional_secret(source, keys::OPENAI_API_KEY),
            openai_api_url,
            cohere_api_key: optional_secret(source, keys::COHERE_API_KEY),
        };

        let files = FilePolicy {
            allowed_content_types: parse_string_list(
                keys::FILE_ALLOWED_TYPES,
                required(source, keys::FILE_ALLOWED_TYPES)?,
            )?,
            max_file_size_mb: parse_positive_u64(
                keys::FILE_MAX_SIZE,
                required(source, keys::FILE_MAX_SIZE)?,
            )?,
            default_chunk_size: parse_positive_u64(
                keys::FILE_DEFAULT_CHUNK_SIZE,
                required(source, keys::FILE_DEFAULT_CHUNK_SIZE)?,
            )?,
        };

        let postgres = PostgresSettings {
            username: required(source, keys::POSTGRES_USERNAME)?.to_string(),
            password: Secret::new(required(source, keys::POSTGRES_PASSWORD)?),
            host: required(source, keys::POSTGRES_HOST)?.to_string(),
            port: parse_port(keys::POSTGRES_PORT, required(source, keys::POSTGRES_PORT)?)?,
            main_database: required(source, keys::POSTGRES_MAIN_DATABASE)?.to_string(),
        };

        let models = parse_models(source)?;

        let max_input_characters = parse_positive_u32(
            keys::INPUT_DEFAULT_MAX_CHARACTERS,
            required(source, keys::INPUT_DEFAULT_MAX_CHARACTERS)?,
        )?;
        let max_output_tokens = parse_positive_u32(
            keys::GENERATION_DEFAULT_MAX_OUTPUT_TOKENS,
            required(source, keys::GENERATION_DEFAULT_MAX_OUTPUT_TOKENS)?,
        )?;
        let temperature = parse_f32(
            keys::GENERATION_DEFAULT_TEMPERATURE,
            required(source, keys::GENERATION_DEFAULT_TEMPERATURE)?,
        )?;
        validate_range_f32(
            keys::GENERATION_DEFAULT_TEMPERATURE,
            temperature,
            0.0,
            2.0,
            "expected 0.0..=2.0",
        )?;
        let generation = GenerationDefaults {
            max_input_characters,
            max_output_tokens,
            temperature,
        };

        let vector_db = parse_vector_db(source)?;

        let language = LanguageSettings {
            primary: required(source, keys::PRIMARY_LANG)?.to_string(),
            default: required(source, keys::DEFAULT_LANG)?.to_string(),
        };

        let settings = Self {
            app,
            providers,
            files,
            postgres,
            models,
            generation,
            vector_db,
            language,
        };
        settings.warn_on_missing_credentials();

        info!(
            app = %settings.app.name,
            version = %settings.app.version,
            generation = settings.models.generation_backend.as_str(),
            embedding = settings.models.embedding_backend.as_str(),
            vector_db = settings.vector_db.backend.as_str(),
            "settings loaded"
        );
        Ok(settings)
    }

    /// Logs a warning for each selected backend whose API key is absent.
    ///
    /// Not an error: an OpenAI-compatible gateway may not need a key.
    fn warn_on_missing_credentials(&self) {
        let openai_selected = self.models.generation_backend == GenerationBackend::OpenAi
            || self.models.embedding_backend == EmbeddingBackend::OpenAi;
        let cohere_selected = self.models.generation_backend == GenerationBackend::Cohere
            || self.models.embedding_backend == EmbeddingBackend::Cohere;

        if openai_selected && self.providers.openai_api_key.is_none() {
            warn!(key = keys::OPENAI_API_KEY, "OpenAI backend selected but no API key configured");
        }
        if cohere_selected && self.providers.cohere_api_key.is_none() {
            warn!(key = keys::COHERE_API_KEY, "Cohere backend selected but no API key configured");
        }
    }
}

fn parse_models(source: &RawSource) -> Result<ModelSettings> {
    let generation_backend = GenerationBackend::parse(
        keys::GENERATION_BACKEND,
        required(source, keys::GENERATION_BACKEND)?,
    )?;
    let embedding_backend = EmbeddingBackend::parse(
        keys::EMBEDDING_BACKEND,
        required(source, keys::EMBEDDING_BACKEND)?,
    )?;

    let generation_model_ids = parse_string_list(
        keys::GENERATION_MODEL_ID_LITERAL,
        required(source, keys::GENERATION_MODEL_ID_LITERAL)?,
    )?;
    let generation_model_id = required(source, keys::GENERATION_MODEL_ID)?.to_string();
    if !generation_model_ids.contains(&generation_model_id) {
        return Err(ConfigError::InvalidEnumValue {
            field: keys::GENERATION_MODEL_ID,
            value: generation_model_id,
            allowed: generation_model_ids,
        });
    }

    Ok(ModelSettings {
        generation_backend,
        embedding_backend,
        generation_model_ids,
        generation_model_id,
        embedding_model_id: required(source, keys::EMBEDDING_MODEL_ID)?.to_string(),
        embedding_model_size: parse_positive_u32(
            keys::EMBEDDING_MODEL_SIZE,
            required(source, keys::EMBEDDING_MODEL_SIZE)?,
        )?,
    })
}

fn parse_vector_db(source: &RawSource) -> Result<VectorDbSettings> {
    let literals = parse_string_list(
        keys::VECTOR_DB_BACKEND_LITERAL,
        required(source, keys::VECTOR_DB_BACKEND_LITERAL)?,
    )?;
    let allowed_backends = literals
        .iter()
        .map(|literal| VectorDbBackend::parse(keys::VECTOR_DB_BACKEND_LITERAL, literal))
        .collect::<Result<Vec<_>>>()?;

    let backend = VectorDbBackend::parse(
        keys::VECTOR_DB_BACKEND,
        required(source, keys::VECTOR_DB_BACKEND)?,
    )?;
    if !allowed_backends.contains(&backend) {
        return Err(ConfigError::InvalidEnumValue {
            field: keys::VECTOR_DB_BACKEND,
            value: backend.as_str().to_string(),
            allowed: literals,
        });
    }

    Ok(VectorDbSettings {
        allowed_backends,
        backend,
        path: required(source, keys::VECTOR_DB_PATH)?.to_string(),
        distance_method: required(source, keys::VECTOR_DB_DISTANCE_METHOD)?.to_string(),
        pgvector_index_threshold: parse_positive_u64(
            keys::VECTOR_DB_PGVEC_INDEX_THRESHOLD,
            required(source, keys::VECTOR_DB_PGVEC_INDEX_THRESHOLD)?,
        )?,
    })
}

/// Fetches a required, non-blank value.
fn required<'a>(source: &'a RawSource, key: &'static str) -> Result<&'a str> {
    source.get(key).ok_or(ConfigError::MissingField(key))
}

fn optional_secret(source: &RawSource, key: &'static str) -> Option<Secret> {
    source.get(key).map(Secret::new)
}

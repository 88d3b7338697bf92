//! Catalogue of every key the settings schema accepts.
//!
//! Key names double as environment variable names and `.env` file keys.
//! [`KNOWN_KEYS`] is the closed schema: anything else in an env file is
//! rejected.

/// Key: application name.
pub const APP_NAME: &str = "APP_NAME";
/// Key: application version.
pub const APP_VERSION: &str = "APP_VERSION";

/// Key: OpenAI API key (secret, optional).
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Key: OpenAI-compatible base URL (optional).
pub const OPENAI_API_URL: &str = "OPENAI_API_URL";
/// Key: Cohere API key (secret, optional).
pub const COHERE_API_KEY: &str = "COHERE_API_KEY";

/// Key: allowed upload MIME types, JSON array.
pub const FILE_ALLOWED_TYPES: &str = "FILE_ALLOWED_TYPES";
/// Key: maximum upload size in megabytes.
pub const FILE_MAX_SIZE: &str = "FILE_MAX_SIZE";
/// Key: default chunk size for downstream splitting.
pub const FILE_DEFAULT_CHUNK_SIZE: &str = "FILE_DEFAULT_CHUNK_SIZE";

/// Key: Postgres user.
pub const POSTGRES_USERNAME: &str = "POSTGRES_USERNAME";
/// Key: Postgres password (secret).
pub const POSTGRES_PASSWORD: &str = "POSTGRES_PASSWORD";
/// Key: Postgres host.
pub const POSTGRES_HOST: &str = "POSTGRES_HOST";
/// Key: Postgres port.
pub const POSTGRES_PORT: &str = "POSTGRES_PORT";
/// Key: Postgres database holding the application schema.
pub const POSTGRES_MAIN_DATABASE: &str = "POSTGRES_MAIN_DATABASE";

/// Key: generation backend literal.
pub const GENERATION_BACKEND: &str = "GENERATION_BACKEND";
/// Key: embedding backend literal.
pub const EMBEDDING_BACKEND: &str = "EMBEDDING_BACKEND";
/// Key: allowed generation model ids, JSON array.
pub const GENERATION_MODEL_ID_LITERAL: &str = "GENERATION_MODEL_ID_LITERAL";
/// Key: selected generation model id.
pub const GENERATION_MODEL_ID: &str = "GENERATION_MODEL_ID";
/// Key: embedding model id.
pub const EMBEDDING_MODEL_ID: &str = "EMBEDDING_MODEL_ID";
/// Key: embedding vector dimensionality.
pub const EMBEDDING_MODEL_SIZE: &str = "EMBEDDING_MODEL_SIZE";

/// Key: default cap on prompt input characters.
pub const INPUT_DEFAULT_MAX_CHARACTERS: &str = "INPUT_DEFAULT_MAX_CHARACTERS";
/// Key: default cap on generated tokens.
pub const GENERATION_DEFAULT_MAX_OUTPUT_TOKENS: &str = "GENERATION_DEFAULT_MAX_OUTPUT_TOKENS";
/// Key: default sampling temperature.
pub const GENERATION_DEFAULT_TEMPERATURE: &str = "GENERATION_DEFAULT_TEMPERATURE";

/// Key: allowed vector-db backends, JSON array of literals.
pub const VECTOR_DB_BACKEND_LITERAL: &str = "VECTOR_DB_BACKEND_LITERAL";
/// Key: selected vector-db backend literal.
pub const VECTOR_DB_BACKEND: &str = "VECTOR_DB_BACKEND";
/// Key: on-disk location of the vector store.
pub const VECTOR_DB_PATH: &str = "VECTOR_DB_PATH";
/// Key: distance metric name.
pub const VECTOR_DB_DISTANCE_METHOD: &str = "VECTOR_DB_DISTANCE_METHOD";
/// Key: row count above which a pgvector index is built.
pub const VECTOR_DB_PGVEC_INDEX_THRESHOLD: &str = "VECTOR_DB_PGVEC_INDEX_THRESHOLD";

/// Key: primary language.
pub const PRIMARY_LANG: &str = "PRIMARY_LANG";
/// Key: fallback language.
pub const DEFAULT_LANG: &str = "DEFAULT_LANG";

/// Every key accepted by the schema, in load order.
pub const KNOWN_KEYS: &[&str] = &[
    APP_NAME,
    APP_VERSION,
    OPENAI_API_KEY,
    OPENAI_API_URL,
    COHERE_API_KEY,
    FILE_ALLOWED_TYPES,
    FILE_MAX_SIZE,
    FILE_DEFAULT_CHUNK_SIZE,
    POSTGRES_USERNAME,
    POSTGRES_PASSWORD,
    POSTGRES_HOST,
    POSTGRES_PORT,
    POSTGRES_MAIN_DATABASE,
    GENERATION_BACKEND,
    EMBEDDING_BACKEND,
    GENERATION_MODEL_ID_LITERAL,
    GENERATION_MODEL_ID,
    EMBEDDING_MODEL_ID,
    EMBEDDING_MODEL_SIZE,
    INPUT_DEFAULT_MAX_CHARACTERS,
    GENERATION_DEFAULT_MAX_OUTPUT_TOKENS,
    GENERATION_DEFAULT_TEMPERATURE,
    VECTOR_DB_BACKEND_LITERAL,
    VECTOR_DB_BACKEND,
    VECTOR_DB_PATH,
    VECTOR_DB_DISTANCE_METHOD,
    VECTOR_DB_PGVEC_INDEX_THRESHOLD,
    PRIMARY_LANG,
    DEFAULT_LANG,
];

/// Returns `true` if `key` belongs to the schema.
pub fn is_known_key(key: &str) -> bool {
    KNOWN_KEYS.contains(&key)
}

//! Raw key/value source for settings: process environment layered over an
//! optional `.env` file.
//!
//! # Layers
//!
//! - **file**: every entry of the env file, parsed with `dotenvy`. Keys here
//!   are checked against the closed schema (see [`RawSource::unknown_keys`]).
//! - **env**: process environment variables, read only for keys declared in
//!   [`KNOWN_KEYS`]. Unrelated variables (`PATH`, `HOME`, ...) are never seen.
//!
//! Lookup precedence: env, then file. This mirrors `dotenvy::dotenv()`, which
//! never overrides variables already present in the process.
//!
//! A value that is empty or whitespace-only counts as absent.

use std::{
    collections::BTreeMap,
    env::VarError,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    config::keys::{KNOWN_KEYS, is_known_key},
    error_handler::{ConfigError, Result},
};

/// Env file consulted by [`crate::Settings::load`] when none is given.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Untyped settings as read from the environment and the env file.
#[derive(Debug, Clone, Default)]
pub struct RawSource {
    file: BTreeMap<String, String>,
    env: BTreeMap<String, String>,
}

impl RawSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a source whose file layer holds `pairs`.
    ///
    /// Useful for tests and for callers that already hold a key/value map.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            file: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            env: BTreeMap::new(),
        }
    }

    /// Adds or replaces an entry in the env layer.
    pub fn with_env_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Reads the env file at `path` into the file layer.
    ///
    /// # Errors
    /// [`ConfigError::Source`] if the file is missing, unreadable or malformed.
    pub fn from_env_file(path: &Path) -> Result<Self> {
        let source_err = |source| ConfigError::Source {
            path: path.to_path_buf(),
            source,
        };

        let mut file = BTreeMap::new();
        for item in dotenvy::from_path_iter(path).map_err(source_err)? {
            let (key, value) = item.map_err(source_err)?;
            file.insert(key, value);
        }
        debug!(path = %path.display(), entries = file.len(), "env file parsed");

        Ok(Self {
            file,
            env: BTreeMap::new(),
        })
    }

    /// Assembles the process source: the env file (if `env_file` exists) plus
    /// the declared process environment variables.
    ///
    /// A missing env file is not an error here; an explicit file is enforced
    /// by [`crate::Settings::load_from`].
    ///
    /// # Errors
    /// - [`ConfigError::Source`] if the env file exists but cannot be parsed.
    /// - [`ConfigError::TypeCoercion`] if a declared variable is not valid UTF-8.
    pub fn from_process(env_file: &Path) -> Result<Self> {
        let mut source = if env_file.exists() {
            Self::from_env_file(env_file)?
        } else {
            debug!(path = %env_file.display(), "env file not found, using process environment only");
            Self::new()
        };
        source.env = read_declared_env()?;
        let (file_entries, env_entries) = source.layer_sizes();
        debug!(file_entries, env_entries, "raw settings source assembled");
        Ok(source)
    }

    /// Looks up `key`, env layer first. Blank values are treated as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.env
            .get(key)
            .or_else(|| self.file.get(key))
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Keys of the file layer that are not part of the schema, sorted.
    ///
    /// The env layer is excluded: built from the process it only ever holds
    /// declared keys.
    pub fn unknown_keys(&self) -> Vec<String> {
        self.file
            .keys()
            .filter(|k| !is_known_key(k))
            .cloned()
            .collect()
    }

    /// Number of entries in the file and env layers.
    pub fn layer_sizes(&self) -> (usize, usize) {
        (self.file.len(), self.env.len())
    }
}

/// Reads every declared key from the process environment.
fn read_declared_env() -> Result<BTreeMap<String, String>> {
    let mut env = BTreeMap::new();
    for &key in KNOWN_KEYS {
        match std::env::var(key) {
            Ok(value) => {
                env.insert(key.to_string(), value);
            }
            Err(VarError::NotPresent) => {}
            Err(VarError::NotUnicode(_)) => {
                return Err(ConfigError::TypeCoercion {
                    field: key,
                    raw: "<non-unicode>".into(),
                    expected: "UTF-8 string",
                });
            }
        }
    }
    Ok(env)
}

/// Resolves the env file path: `override_path` if given, else [`DEFAULT_ENV_FILE`].
pub fn env_file_path(override_path: Option<&Path>) -> PathBuf {
    override_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn env_layer_wins_over_file_layer() {
        let source = RawSource::from_pairs([("APP_NAME", "from-file"), ("APP_VERSION", "1.0")])
            .with_env_var("APP_NAME", "from-env");
        assert_eq!(source.get("APP_NAME"), Some("from-env"));
        assert_eq!(source.get("APP_VERSION"), Some("1.0"));
    }

    #[test]
    fn blank_values_read_as_absent() {
        let source = RawSource::from_pairs([("OPENAI_API_KEY", "   ")]);
        assert_eq!(source.get("OPENAI_API_KEY"), None);
    }

    #[test]
    fn unknown_keys_are_sorted_and_only_from_file() {
        let source = RawSource::from_pairs([("ZETA", "1"), ("APP_NAME", "x"), ("ALPHA", "2")])
            .with_env_var("APP_VERSION", "2.0");
        assert_eq!(source.layer_sizes(), (3, 1));
        assert_eq!(source.unknown_keys(), vec!["ALPHA", "ZETA"]);
    }

    #[test]
    fn env_file_is_parsed_with_quotes_and_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# service settings").unwrap();
        writeln!(file, "APP_NAME=\"mini-rag\"").unwrap();
        writeln!(file, "FILE_ALLOWED_TYPES='[\"text/plain\"]'").unwrap();

        let source = RawSource::from_env_file(file.path()).unwrap();
        assert_eq!(source.get("APP_NAME"), Some("mini-rag"));
        assert_eq!(source.get("FILE_ALLOWED_TYPES"), Some("[\"text/plain\"]"));
        assert_eq!(source.layer_sizes(), (2, 0));
    }

    #[test]
    fn missing_explicit_env_file_is_a_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RawSource::from_env_file(&dir.path().join("absent.env")).unwrap_err();
        assert!(matches!(err, ConfigError::Source { .. }));
    }

    #[test]
    fn default_env_file_path() {
        assert_eq!(env_file_path(None), PathBuf::from(".env"));
        assert_eq!(env_file_path(Some(Path::new("/etc/app.env"))), PathBuf::from("/etc/app.env"));
    }
}

use std::{
    env,
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
};

use anyhow::Context;
use app_config::{Settings, telemetry};
use tracing::{Level, info};
use upload_guard::UploadValidator;

/// Process env var naming an explicit env file. Defaults to `./.env`.
const ENV_FILE_VAR: &str = "APP_ENV_FILE";

fn main() -> anyhow::Result<()> {
    telemetry::init("info", Level::INFO).context("failed to install tracing subscriber")?;

    // Fails fast: the service must not start on partial or guessed settings.
    let settings = match env::var_os(ENV_FILE_VAR) {
        Some(path) => Settings::load_from(&PathBuf::from(path)),
        None => Settings::load(),
    }
    .context("invalid configuration")?;
    let settings = Arc::new(settings);

    let validator = UploadValidator::from_settings(&settings);
    info!(
        allowed = ?settings.files.allowed_content_types,
        max_bytes = validator.max_bytes(),
        chunk_size = settings.files.default_chunk_size,
        "upload policy ready"
    );

    let mut output = serde_json::to_string_pretty(settings.as_ref())?;
    output.push('\n');

    let mut stdout = io::stdout();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(())
}

use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Target prefixes of the service's own crates.
pub const TARGET_PREFIXES: &[&str] = &["app_config", "upload_guard", "rag_ingest_backend"];

/// RFC3339 UTC timer implemented via `chrono`.
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        let s = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

/// Formatting layer that renders only events emitted by the service crates
/// (see [`TARGET_PREFIXES`]).
///
/// - RFC3339 UTC timestamps
/// - Compact single-line format with `file:line`
/// - Written to stderr, ANSI colors only when stderr is a terminal
///
/// The per-layer filter leaves logs of third-party crates to other layers.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let use_ansi = io::stderr().is_terminal();

    let only_service_crates = filter::filter_fn(|meta| {
        TARGET_PREFIXES
            .iter()
            .any(|prefix| meta.target().starts_with(prefix))
    });

    fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(use_ansi)
        .event_format(
            fmt::format()
                .compact()
                .with_timer(ChronoRfc3339Utc)
                .with_level(true)
                .with_target(true)
                .with_source_location(true),
        )
        .with_filter(only_service_crates)
}

/// Level directive for a single target, e.g. `upload_guard=debug`.
pub fn level_directive(target: &str, level: Level) -> Result<Directive, ParseError> {
    Directive::from_str(&format!("{target}={}", level.as_str().to_lowercase()))
}

/// `EnvFilter` from `RUST_LOG`. When it is unset or invalid, falls back to
/// `default` with `level` applied to every service crate.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_for(rust_log.as_deref(), default, level)
}

/// Filter for an explicit `RUST_LOG` value. Directives in `rust_log` are
/// used as given; the per-crate `level` only shapes the fallback.
pub fn filter_for(rust_log: Option<&str>, default: &str, level: Level) -> EnvFilter {
    rust_log
        .filter(|spec| !spec.trim().is_empty())
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| fallback_filter(default, level))
}

fn fallback_filter(default: &str, level: Level) -> EnvFilter {
    TARGET_PREFIXES
        .iter()
        .filter_map(|target| level_directive(target, level).ok())
        .fold(EnvFilter::new(default), EnvFilter::add_directive)
}

/// Installs the global subscriber: env filter plus [`layer`].
///
/// # Errors
/// Fails if a global subscriber is already set.
pub fn init(default: &str, level: Level) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter_with_level(default, level))
        .with(layer())
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_targets_a_single_crate() {
        let directive = level_directive("upload_guard", Level::DEBUG).unwrap();
        assert_eq!(directive.to_string(), "upload_guard=debug");
    }

    fn with_filter(filter: EnvFilter, query: impl FnOnce() -> bool) -> bool {
        tracing::subscriber::with_default(tracing_subscriber::registry().with(filter), query)
    }

    #[test]
    fn rust_log_can_raise_service_crates_to_debug() {
        let filter = filter_for(Some("app_config=debug"), "info", Level::INFO);
        assert!(with_filter(filter, || {
            tracing::enabled!(target: "app_config::config::source", Level::DEBUG)
        }));
    }

    #[test]
    fn fallback_applies_level_to_service_crates() {
        let filter = filter_for(None, "warn", Level::INFO);
        assert!(with_filter(filter, || {
            tracing::enabled!(target: "upload_guard::validator", Level::INFO)
        }));

        let filter = filter_for(None, "warn", Level::INFO);
        assert!(!with_filter(filter, || {
            tracing::enabled!(target: "upload_guard::validator", Level::DEBUG)
        }));
    }

    #[test]
    fn blank_rust_log_uses_fallback_for_other_crates() {
        let filter = filter_for(Some("  "), "warn", Level::INFO);
        assert!(!with_filter(filter, || {
            tracing::enabled!(target: "hyper::proto", Level::INFO)
        }));
    }

    #[test]
    fn every_service_crate_gets_a_directive() {
        for target in TARGET_PREFIXES {
            assert!(level_directive(target, Level::INFO).is_ok());
        }
    }
}

//! Observability (structured logging)
//!
//! Logs always go to stderr so generated artifacts printed on stdout can be
//! piped cleanly.

use crate::config::{LogFormat, LogSettings};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging stack
///
/// Sets up:
/// - Environment-based log level filtering (`RUST_LOG`), falling back to
///   the configured level
/// - Pretty, compact or JSON formatting per configuration
///
/// # Example
///
/// ```rust,no_run
/// use entity_scaffold::{config::LogSettings, observability};
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init(&LogSettings::default())?;
/// tracing::info!("generator started");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if the configured level is not a valid filter directive
/// or a global subscriber is already installed.
pub fn init(settings: &LogSettings) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&settings.level))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    match settings.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()?,
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
    }

    Ok(())
}

/// Level directive after applying `-v` flags
///
/// Zero keeps the configured level; one raises it to `debug`, two or more
/// to `trace`.
#[must_use]
pub fn effective_level(settings: &LogSettings, verbosity: u8) -> String {
    match verbosity {
        0 => settings.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

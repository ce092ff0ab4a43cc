//! Subscriber bootstrap for the command-line front end
//!
//! # Invariants
//! - Initialization happens at most once per process.
//! - Repeating it with the same settings is a no-op.
//! - Switching filter or format after the fact is rejected.
//! - `RUST_LOG` takes precedence over the configured filter.

use anyhow::{anyhow, bail, Context as _};
use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static LOGGING_STATE: OnceCell<LogSettings> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LogSettings {
    pub(crate) filter: String,
    pub(crate) json: bool,
}

/// Install the global fmt subscriber writing to stderr
///
/// # Errors
/// - the filter does not parse
/// - logging was already initialized with different settings
/// - another global subscriber is installed
pub(crate) fn init_logging(settings: LogSettings) -> anyhow::Result<()> {
    if let Some(active) = LOGGING_STATE.get() {
        if *active == settings {
            return Ok(());
        }
        bail!(
            "logging already initialized with filter `{}`; refusing to switch to `{}`",
            active.filter,
            settings.filter
        );
    }

    LOGGING_STATE.get_or_try_init(|| -> anyhow::Result<LogSettings> {
        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(&settings.filter)
                .with_context(|| format!("invalid log filter `{}`", settings.filter))?,
        };

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true);
        let installed = if settings.json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
        installed.map_err(|e| anyhow!("failed to install subscriber: {e}"))?;

        tracing::debug!(filter = %settings.filter, json = settings.json, "logging initialized");
        Ok(settings.clone())
    })?;
    Ok(())
}

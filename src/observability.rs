//! Observability utilities.
//!
//! The conversion walk logs field dispatch at `trace`, and skipped keys and
//! failed conversions at `debug`. Nothing is printed unless the host installs
//! a subscriber, e.g. through [`init_tracing`].

use std::sync::OnceLock;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Environment variable selecting the log format.
pub const ENV_LOG_FORMAT: &str = "STRUCTMAP_LOG_FORMAT";

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    /// `json` (any case) selects JSON; anything else, or nothing, is compact.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }

    pub fn from_env() -> Self {
        Self::parse(std::env::var(ENV_LOG_FORMAT).ok().as_deref())
    }
}

/// Initialize tracing subscriber once for the process.
///
/// Format comes from `STRUCTMAP_LOG_FORMAT`; filter defaults to `info` if
/// `RUST_LOG` is unset.
pub fn init_tracing() {
    init_tracing_with(LogFormat::from_env());
}

/// Initialize tracing with an explicit format. Later calls are no-ops.
pub fn init_tracing_with(format: LogFormat) {
    TRACING_INIT.get_or_init(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let result = match format {
            LogFormat::Json => tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .try_init(),
            LogFormat::Compact => tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact())
                .try_init(),
        };

        if let Err(err) = result {
            eprintln!("tracing init skipped: {err}");
        }
    });
}

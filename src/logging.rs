//! Tracing subscriber setup
//!
//! Logs go to stderr so stdout carries only the balance CSV. The level is
//! read from `RUST_LOG` and defaults to `info`.

use crate::cli::LogFormat;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber
///
/// Does nothing if a subscriber is already installed.
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
}

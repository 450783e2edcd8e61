//! Tracing subscriber setup
//!
//! Events go to a daily-rolling `app.log`; with `console` set they are also
//! mirrored to stderr. `RUST_LOG` wins over the configured level.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Base name of the rolling log files
pub const LOG_FILE_NAME: &str = "app.log";

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_logging(log_dir: &Path, level: &str, console: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = std::fs::create_dir_all(log_dir).ok().map(|_| {
        let appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_NAME);
        fmt::layer().with_writer(appender).with_ansi(false)
    });

    let console_layer = console.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed()
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();
}

//! Logging setup for camera-console.
//!
//! Stdout is the view, so console logs go to stderr. `--log-dir` adds a
//! daily-rotated file log; the returned guard must outlive `main`.

use std::env;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

const LOG_ENV: &str = "CAMERA_UI_LOG";
const LOG_FILE_PREFIX: &str = "camera-console.log";

fn env_filter() -> EnvFilter {
    match env::var(LOG_ENV) {
        Ok(value) if !value.trim().is_empty() => EnvFilter::new(value),
        _ => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    }
}

pub fn init(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter());

    let Some(dir) = log_dir else {
        let _ = tracing_subscriber::registry().with(stderr_layer).try_init();
        return None;
    };

    if let Err(err) = fs_err::create_dir_all(dir) {
        let _ = tracing_subscriber::registry().with(stderr_layer).try_init();
        tracing::warn!(error = %err, "Failed to create log directory; file logging disabled");
        return None;
    }

    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(env_filter());

    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
    Some(guard)
}

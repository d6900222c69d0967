use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_FILTER: &str = "dexquiz=info";
const LOG_FILE: &str = "dexquiz.log";

/// `--log-dir` if given, else `<data dir>/dexquiz/logs`.
pub fn log_dir(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| dirs_next::data_local_dir().map(|dir| dir.join("dexquiz").join("logs")))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Installs a file-only subscriber; the terminal belongs to the TUI.
///
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init(explicit_dir: Option<&Path>) -> WorkerGuard {
    let dir = log_dir(explicit_dir);
    if let Err(err) = std::fs::create_dir_all(&dir) {
        eprintln!("Failed to create log directory {}: {err}", dir.display());
    }

    let file_appender = tracing_appender::rolling::daily(&dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(file_layer).init();
    guard
}

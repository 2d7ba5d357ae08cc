//! Usage: Process-wide tracing setup (stderr + rolling file in the app dir).

use crate::app_paths;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

// Keeps the non-blocking file writer alive for the process lifetime.
static FILE_WRITER_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

pub fn init(app: &tauri::AppHandle) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let file_layer = match app_paths::app_log_dir(app) {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "paper-desktop.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_WRITER_GUARD.set(guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false),
            )
        }
        Err(err) => {
            eprintln!("file logging disabled: {err}");
            None
        }
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer);

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        // Already initialized (restart within the same process).
        return;
    }

    // Route `log` records from dependencies through tracing.
    if let Err(err) = tracing_log::LogTracer::init() {
        tracing::warn!("log bridge unavailable: {err}");
    }
}

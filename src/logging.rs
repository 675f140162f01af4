// logging.rs
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Timestamped lines to stdout and, when the file can be opened, the
/// same lines appended to the persistent log file.
pub fn init(log_file: &Path) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stdout_layer = fmt::layer().with_target(false).with_writer(std::io::stdout);

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer);

    match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(file) => {
            let file_layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(file));
            registry.with(file_layer).init();
        }
        Err(e) => {
            registry.init();
            tracing::warn!("Could not open log file {}: {e}", log_file.display());
        }
    }
}

//! File-backed tracing subscriber.
//!
//! The terminal belongs to the UI, so log output goes to `log_path`.
//! `AGENDA_LOG` takes an `EnvFilter` directive and overrides the default.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "agenda_tui=info,warn";

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Failed to open log file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to init subscriber: {0}")]
    Init(String),
}

pub fn init_logging(log_path: &Path) -> Result<(), TelemetryError> {
    if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| TelemetryError::Open {
            path: parent.display().to_string(),
            source,
        })?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|source| TelemetryError::Open {
            path: log_path.display().to_string(),
            source,
        })?;

    let env_filter = EnvFilter::try_from_env("AGENDA_LOG")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))?;

    tracing::info!(log_path = %log_path.display(), "Logging initialized");
    Ok(())
}

//! Scan error types.

use std::path::PathBuf;

/// Errors that abort a scan. Per-directory and per-icon problems are logged
/// and skipped instead.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("game list is not a mapping of game ids to paths")]
    InvalidGameList,
}

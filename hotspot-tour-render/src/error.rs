use std::path::PathBuf;

use thiserror::Error;

/// Errors originating from overlay building and export.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid display dimensions: {width}×{height}")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

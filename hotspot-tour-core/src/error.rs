use std::path::PathBuf;

use thiserror::Error;

/// Errors originating from the tour core.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to read tour data from {path}: {source}")]
    ReadData {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("tour data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("hotspot '{id}' has invalid coordinates: {reason}")]
    InvalidHotspot { id: String, reason: GeometryError },
}

/// Why a hotspot's coordinates could not be resolved to a polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("no pixel or percentage coordinates")]
    MissingCoordinates,

    #[error("only {0} usable point(s), need at least 2")]
    TooFewPoints(usize),
}

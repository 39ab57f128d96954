//! Error types for tilewarp.
//!
//! Every failure the engine can report is a caller configuration problem
//! detected before the parallel pass starts. Pixels that fall outside the
//! source coverage are not errors; they are written as no-data.

use thiserror::Error;

/// The main error type for tilewarp operations.
#[derive(Error, Debug)]
pub enum TilewarpError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Projection identifier that does not resolve to a known projection
    #[error("Unknown projection: {id}")]
    UnknownProjection { id: String },

    /// Grid shape, bounding box or tile placement that cannot be processed
    #[error("Invalid geometry: {message}")]
    InvalidGeometry { message: String },

    /// Raster file errors (size mismatch, truncated data)
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Worker pool construction errors
    #[error("Thread pool error: {message}")]
    ThreadPool { message: String },
}

impl TilewarpError {
    pub(crate) fn geometry(message: impl Into<String>) -> Self {
        TilewarpError::InvalidGeometry {
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results with TilewarpError
pub type Result<T> = std::result::Result<T, TilewarpError>;

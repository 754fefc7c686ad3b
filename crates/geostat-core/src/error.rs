// crates/geostat-core/src/error.rs
use thiserror::Error;

/// Errors produced while loading sources, reading maps or writing output.
#[derive(Debug, Error)]
pub enum GeoStatError {
    /// A required input file does not exist or cannot be opened.
    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input parsed as JSON but does not have the expected shape.
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GeoStatError>;

//! Error types for the wisata crates

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WisataError {
    // Dataset errors
    #[error("Dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    #[error("Invalid dataset: {reason}")]
    InvalidDataset { reason: String },

    #[error("Dataset carries neither x/y attributes nor geometry")]
    MissingBaseData,

    // Query errors
    #[error("No records left after the name filter")]
    EmptyAfterFilter { name: Option<String> },

    #[error("No records within reach of the query point")]
    EmptyAfterRadius { radius_km: Option<f64> },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, WisataError>;

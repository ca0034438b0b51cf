use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Mapping file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read mapping file {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("Invalid mapping file format in {path}: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("Invalid mapping structure: {reason}")]
    InvalidStructure { reason: String },
}

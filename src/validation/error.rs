use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid YAML format: {reason}")]
    YamlParsing { reason: String },

    #[error("File access failed for {path}: {reason}")]
    FileAccess { path: PathBuf, reason: String },
}

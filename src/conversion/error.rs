use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Invalid YAML format: {reason}")]
    YamlParsing { reason: String },

    #[error("File access failed for {path}: {reason}")]
    FileAccess { path: PathBuf, reason: String },

    #[error("Unsupported file type: {file_type}")]
    UnsupportedFileType { file_type: String },
}

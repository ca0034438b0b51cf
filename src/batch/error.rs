use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Discovery failed under {path}: {reason}")]
    Discovery { path: PathBuf, reason: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CareersError {
    #[error("career paths source not found at path: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("failed to read career paths source: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed career paths source: {reason}")]
    Malformed { reason: String },
}

use std::path::PathBuf;
use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog source not found at path: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("failed to read catalog source: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog source: {reason}")]
    Malformed { reason: String },

    #[error("record {code:?}: frequency must be at least 1")]
    InvalidFrequency { code: String },

    #[error("record {code:?}: embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        code: String,
        expected: usize,
        actual: usize,
    },

    #[error("failed to embed record {code:?}: {source}")]
    Embedding {
        code: String,
        #[source]
        source: EmbeddingError,
    },
}

//! Cross-cutting, shared constants.
//!
//! The embedding dimension is treated as an invariant across modules
//! (catalog, embedding, retrieval): every vector in the store and every query
//! vector must agree on it. Use [`validate_embedding_dim`] at module
//! boundaries to catch mismatches at load time rather than mid-request.

use thiserror::Error;

/// Default sentence-embedding dimension (MiniLM-class models).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Default max tokens fed to the embedding model.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Hard cap on the number of results in a ranked response.
pub const MAX_RESULTS: usize = 10;

/// Default number of candidates pulled from the catalog before reduction.
pub const DEFAULT_TOP_K: usize = 20;

/// Language the catalog is authored in.
pub const DEFAULT_NATIVE_LANG: &str = "en";

/// Error returned when an embedding dimension check fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    #[error("embedding dimension cannot be zero")]
    ZeroDimension,

    /// Runtime dimension does not match the expected dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Validates that a runtime embedding dimension matches the expected one.
pub fn validate_embedding_dim(expected: usize, actual: usize) -> Result<(), DimValidationError> {
    if expected == 0 || actual == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if expected != actual {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

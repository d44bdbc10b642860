//! Sentence-embedding generation for catalog records and queries.
//!
//! - [`encoder`] provides the [`SentenceEmbedder`] used at load time and per query.
//! - [`bert`] wraps the underlying candle BERT model.
//!
//! Use [`EmbedderConfig::stub`] for tests/deployments without model files.

/// BERT encoder wrapper (mean pooling).
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// Sentence embedder (model or stub backend).
pub mod encoder;
mod error;
/// Tokenizer loading helpers.
pub(crate) mod utils;

pub use encoder::{EmbedderConfig, SENTENCE_EMBEDDING_DIM, SENTENCE_MAX_SEQ_LEN, SentenceEmbedder};
pub use error::EmbeddingError;

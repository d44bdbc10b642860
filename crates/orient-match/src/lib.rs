//! Orient library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! The exports are organized by module:
//!
//! ## Catalog
//! - [`Catalog`], [`CatalogRecord`] - Immutable occupation catalog snapshot
//! - [`CatalogHandle`] - Atomic whole-store swap for administrative reloads
//! - [`load_catalog`], [`build_catalog`], [`SourceRecord`] - JSON catalog loader
//!
//! ## Embedding
//! - [`SentenceEmbedder`], [`EmbedderConfig`] - Sentence embedding generation
//!   (candle BERT with mean pooling, deterministic stub mode for tests)
//!
//! ## Retrieval & Scoring
//! - [`Retriever`], [`RetrievedCandidate`] - Cosine-similarity top-k retrieval
//! - [`ResultReducer`], [`ScoredResult`] - Dedup + rarity-weighted reduction
//! - [`confidence_score`], [`rarity_factor`] - Pure scoring transforms
//!
//! ## Configuration
//! - [`Config`], [`ConfigError`] - Environment-backed server configuration

pub mod catalog;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod retrieval;
pub mod scoring;

pub use catalog::{Catalog, CatalogError, CatalogHandle, CatalogRecord, SourceRecord, build_catalog, load_catalog};
pub use config::{Config, ConfigError};
pub use constants::{DEFAULT_TOP_K, MAX_RESULTS, DimValidationError, validate_embedding_dim};
pub use embedding::{EmbedderConfig, EmbeddingError, SENTENCE_EMBEDDING_DIM, SENTENCE_MAX_SEQ_LEN, SentenceEmbedder};
pub use retrieval::{RetrievalError, RetrievedCandidate, Retriever, cosine_similarity};
pub use scoring::{ResultReducer, ScoredResult, confidence_score, rarity_factor};

//! Immutable occupation catalog and its shared snapshot handle.
//!
//! The catalog is loaded exactly once at startup and shared read-only across
//! request handlers. Administrative bulk replace is a whole-store swap via
//! [`CatalogHandle::swap`]; records are never edited in place.

pub mod error;
mod loader;


pub use error::CatalogError;
pub use loader::{SourceRecord, build_catalog, load_catalog};

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

/// One occupation entry. Immutable after catalog construction.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogRecord {
    pub code: String,
    pub title: String,
    pub description: String,
    /// How common this title is across the catalog (>= 1). Rare titles get a
    /// confidence boost from the rarity weighting.
    pub frequency: u32,
    /// Precomputed sentence embedding. Not serialized in API responses.
    #[serde(skip)]
    pub embedding: Vec<f32>,
}

/// Immutable snapshot of the full occupation catalog.
#[derive(Debug)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
    embedding_dim: usize,
}

impl Catalog {
    /// Builds a catalog from finished records, enforcing the store invariants:
    /// every frequency >= 1 and every embedding of dimension `embedding_dim`.
    pub fn from_records(
        records: Vec<CatalogRecord>,
        embedding_dim: usize,
    ) -> Result<Self, CatalogError> {
        if embedding_dim == 0 {
            return Err(CatalogError::Malformed {
                reason: "embedding dimension cannot be zero".to_string(),
            });
        }

        for record in &records {
            if record.frequency == 0 {
                return Err(CatalogError::InvalidFrequency {
                    code: record.code.clone(),
                });
            }
            if record.embedding.len() != embedding_dim {
                return Err(CatalogError::DimensionMismatch {
                    code: record.code.clone(),
                    expected: embedding_dim,
                    actual: record.embedding.len(),
                });
            }
        }

        Ok(Self {
            records,
            embedding_dim,
        })
    }

    /// An empty catalog (valid; retrieval over it yields no candidates).
    pub fn empty(embedding_dim: usize) -> Self {
        Self {
            records: Vec::new(),
            embedding_dim,
        }
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }
}

/// Shared handle over the current catalog snapshot.
///
/// Readers clone the `Arc` and keep their snapshot for the whole request;
/// [`swap`](Self::swap) replaces the store atomically for subsequent readers.
#[derive(Debug)]
pub struct CatalogHandle {
    inner: RwLock<Arc<Catalog>>,
}

impl CatalogHandle {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: RwLock::new(Arc::new(catalog)),
        }
    }

    /// Returns the current snapshot. Cheap (one Arc clone).
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.inner.read().clone()
    }

    /// Replaces the whole store, returning the previous snapshot.
    pub fn swap(&self, catalog: Catalog) -> Arc<Catalog> {
        let mut guard = self.inner.write();
        std::mem::replace(&mut *guard, Arc::new(catalog))
    }
}

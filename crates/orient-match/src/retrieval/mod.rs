//! Cosine-similarity retrieval over the catalog.

pub mod error;


pub use error::RetrievalError;

use std::cmp::Ordering;

use tracing::debug;

use crate::catalog::{Catalog, CatalogRecord};
use crate::constants::DEFAULT_TOP_K;
use crate::embedding::SentenceEmbedder;

/// One retrieval hit: a catalog record plus its raw cosine similarity to the
/// query. Lives for a single request.
#[derive(Debug, Clone)]
pub struct RetrievedCandidate<'a> {
    pub record: &'a CatalogRecord,
    pub raw_score: f32,
}

/// First-stage retriever: embeds the query and scans every catalog embedding.
///
/// The catalog is small enough (thousands of records) that a full scan beats
/// maintaining an index; candidates come back sorted by descending raw score,
/// ties keeping catalog order.
#[derive(Debug)]
pub struct Retriever {
    embedder: SentenceEmbedder,
    top_k: usize,
}

impl Retriever {
    pub fn new(embedder: SentenceEmbedder, top_k: usize) -> Self {
        Self { embedder, top_k }
    }

    pub fn with_default_top_k(embedder: SentenceEmbedder) -> Self {
        Self::new(embedder, DEFAULT_TOP_K)
    }

    pub fn embedder(&self) -> &SentenceEmbedder {
        &self.embedder
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Retrieves the top-k candidates for a query against a catalog snapshot.
    ///
    /// The query must be non-blank; blank queries are rejected at the gateway
    /// before retrieval is ever invoked. An empty catalog yields an empty
    /// candidate list, not an error.
    pub fn retrieve<'a>(
        &self,
        catalog: &'a Catalog,
        query: &str,
    ) -> Result<Vec<RetrievedCandidate<'a>>, RetrievalError> {
        if catalog.is_empty() {
            debug!("Catalog is empty, returning no candidates");
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query)?;

        if query_embedding.len() != catalog.embedding_dim() {
            return Err(RetrievalError::DimensionMismatch {
                expected: catalog.embedding_dim(),
                actual: query_embedding.len(),
            });
        }

        let mut candidates: Vec<RetrievedCandidate<'a>> = catalog
            .records()
            .iter()
            .map(|record| RetrievedCandidate {
                raw_score: cosine_similarity(&query_embedding, &record.embedding),
                record,
            })
            .collect();

        // Stable sort: equal scores keep catalog order.
        candidates.sort_by(|a, b| {
            b.raw_score
                .partial_cmp(&a.raw_score)
                .unwrap_or(Ordering::Equal)
        });

        candidates.truncate(self.top_k);

        debug!(
            candidates = candidates.len(),
            top_score = candidates.first().map(|c| c.raw_score),
            "Retrieval complete"
        );

        Ok(candidates)
    }
}

/// Cosine similarity between two f32 vectors (0.0 on length mismatch or a
/// zero-norm side).
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) =
        a.iter()
            .zip(b.iter())
            .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
                (dot + av * bv, na + av * av, nb + bv * bv)
            });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use super::scorer::confidence_score;
use super::types::ScoredResult;
use crate::constants::MAX_RESULTS;
use crate::retrieval::RetrievedCandidate;

/// Reduces retrieval candidates to the final ranked response:
/// dedup by title (first occurrence wins) -> confidence scoring ->
/// stable sort by confidence descending -> truncate.
#[derive(Debug, Clone, Copy)]
pub struct ResultReducer {
    max_results: usize,
}

impl Default for ResultReducer {
    fn default() -> Self {
        Self {
            max_results: MAX_RESULTS,
        }
    }
}

impl ResultReducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_results(max_results: usize) -> Self {
        Self { max_results }
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Candidates must arrive sorted by descending raw score (the retriever's
    /// output order), so keeping the first occurrence of a duplicated title
    /// keeps its best-scoring occurrence.
    pub fn reduce(
        &self,
        candidates: &[RetrievedCandidate<'_>],
        catalog_size: usize,
    ) -> Vec<ScoredResult> {
        let mut seen_titles: HashSet<&str> = HashSet::with_capacity(candidates.len());
        let mut results: Vec<ScoredResult> = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            if !seen_titles.insert(candidate.record.title.as_str()) {
                continue;
            }

            results.push(ScoredResult {
                code: candidate.record.code.clone(),
                title: candidate.record.title.clone(),
                description: candidate.record.description.clone(),
                raw_score: candidate.raw_score,
                confidence_score: confidence_score(
                    candidate.raw_score,
                    candidate.record.frequency,
                    catalog_size,
                ),
                judge_score: None,
                judge_reasoning: None,
            });
        }

        // Rarity weighting can reorder the raw ranking; stable sort keeps
        // retrieval order for equal rounded confidence.
        results.sort_by(|a, b| {
            b.confidence_score
                .partial_cmp(&a.confidence_score)
                .unwrap_or(Ordering::Equal)
        });

        results.truncate(self.max_results);

        debug!(
            unique = results.len(),
            from = candidates.len(),
            "Reduced candidates"
        );

        results
    }
}

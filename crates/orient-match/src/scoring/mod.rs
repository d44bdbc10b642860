//! Rarity-weighted confidence scoring and result reduction.
//!
//! Raw cosine similarity alone overweights generic, high-frequency titles:
//! "Carpenter" outscores "Master Carpenter" on almost any woodworking query.
//! Multiplying by a log-scaled rarity factor suppresses common titles and
//! boosts rare, specific ones. [`ResultReducer`] applies the transform after
//! deduplicating retrieval candidates by title and re-sorts on the weighted
//! score, which can legitimately reorder the retriever's raw ranking.

pub mod reducer;
pub mod scorer;
pub mod types;


pub use reducer::ResultReducer;
pub use scorer::{confidence_score, rarity_factor};
pub use types::ScoredResult;

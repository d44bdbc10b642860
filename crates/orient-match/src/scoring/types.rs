use serde::{Deserialize, Serialize};

/// Final, display-ready search result.
///
/// `judge_score` / `judge_reasoning` are only present when the optional
/// relevance judge reranked the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub code: String,
    pub title: String,
    pub description: String,
    pub raw_score: f32,
    pub confidence_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judge_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judge_reasoning: Option<String>,
}

use thiserror::Error;

/// Faults on the judge path. None of these ever reach a caller of
/// [`rerank`](super::RelevanceJudge::rerank); they exist for logging and for
/// backend implementations.
#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("judge backend error: {reason}")]
    Backend { reason: String },

    #[error("malformed judge response: {reason}")]
    MalformedResponse { reason: String },

    #[error("judge returned {actual} verdicts for {expected} candidates")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("judge verdict references unknown candidate code {code:?}")]
    UnknownCandidate { code: String },

    #[error("judge score {score} out of range for candidate {code:?}")]
    ScoreOutOfRange { code: String, score: f64 },
}

//! Optional relevance judge: second-stage reranking via an external LLM.
//!
//! The judge is best-effort infrastructure. Retrieval plus confidence scoring
//! already produced a usable ranking, so every fault on this path (transport
//! error, timeout, malformed or partial response) degrades to that
//! first-stage ranking. [`RelevanceJudge::rerank`] has no error type at all;
//! failure is structurally unable to propagate past this module.

pub mod config;
pub mod error;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use config::{DEFAULT_JUDGE_TIMEOUT_MS, JudgeConfig};
pub use error::JudgeError;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use genai::chat::{ChatMessage, ChatRequest};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use orient::scoring::ScoredResult;

const SYSTEM_PROMPT: &str = "You are an AI career matching expert. \
Rank job entries by semantic relevance to the user's query and reply with \
strict JSON only.";

/// How a rerank attempt ended (reported in the `x-orient-rank` header).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RerankOutcome {
    /// No judge configured, or nothing to rerank.
    Skipped,
    /// Judge verdicts applied.
    Reranked,
    /// Judge faulted; first-stage ranking kept.
    Fallback,
}

impl RerankOutcome {
    pub fn as_header_value(&self) -> &'static str {
        match self {
            RerankOutcome::Skipped => "first_stage",
            RerankOutcome::Reranked => "reranked",
            RerankOutcome::Fallback => "fallback",
        }
    }
}

/// Capability seam for the external judge. The live implementation talks to a
/// genai chat model; tests plug in mocks.
#[async_trait]
pub trait JudgeBackend: Send + Sync + 'static {
    async fn complete(&self, prompt: &str) -> Result<String, JudgeError>;
}

/// Live judge backed by a genai chat model (Gemini, GPT, Claude, ...).
#[derive(Clone)]
pub struct GenaiJudge {
    client: genai::Client,
    model: String,
}

impl GenaiJudge {
    pub fn new<S: Into<String>>(model: S) -> Self {
        Self {
            client: genai::Client::default(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl JudgeBackend for GenaiJudge {
    async fn complete(&self, prompt: &str) -> Result<String, JudgeError> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ]);

        let response = self
            .client
            .exec_chat(&self.model, request, None)
            .await
            .map_err(|e| JudgeError::Backend {
                reason: e.to_string(),
            })?;

        Ok(response.first_text().unwrap_or_default().to_string())
    }
}

/// Two-stage reranker with a guaranteed identity fallback.
pub struct RelevanceJudge<J: JudgeBackend> {
    backend: Option<J>,
    timeout: Duration,
}

impl RelevanceJudge<GenaiJudge> {
    /// Builds the live judge from config; no model configured means the
    /// reranker is a pass-through.
    pub fn from_config(config: JudgeConfig) -> Self {
        match config.model {
            Some(model) => Self::new(GenaiJudge::new(model), config.timeout),
            None => Self::disabled(),
        }
    }
}

impl<J: JudgeBackend> RelevanceJudge<J> {
    pub fn new(backend: J, timeout: Duration) -> Self {
        Self {
            backend: Some(backend),
            timeout,
        }
    }

    /// A judge that is always the identity function.
    pub fn disabled() -> Self {
        Self {
            backend: None,
            timeout: Duration::ZERO,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Reorders `results` by external relevance judgment.
    ///
    /// Single attempt, time-bounded. Never fails, never drops results: any
    /// fault returns the input sequence unchanged, in the same order.
    pub async fn rerank(
        &self,
        query: &str,
        results: Vec<ScoredResult>,
    ) -> (Vec<ScoredResult>, RerankOutcome) {
        let Some(backend) = &self.backend else {
            return (results, RerankOutcome::Skipped);
        };
        if results.is_empty() {
            return (results, RerankOutcome::Skipped);
        }

        let prompt = build_prompt(query, &results);

        let reply = match tokio::time::timeout(self.timeout, backend.complete(&prompt)).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!(error = %e, "Judge call failed, keeping first-stage ranking");
                return (results, RerankOutcome::Fallback);
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Judge call timed out, keeping first-stage ranking"
                );
                return (results, RerankOutcome::Fallback);
            }
        };

        match apply_verdicts(&results, &reply) {
            Ok(reranked) => {
                debug!(results = reranked.len(), "Judge reranked results");
                (reranked, RerankOutcome::Reranked)
            }
            Err(e) => {
                warn!(error = %e, "Judge response rejected, keeping first-stage ranking");
                (results, RerankOutcome::Fallback)
            }
        }
    }
}

#[derive(Serialize)]
struct CandidateDoc<'a> {
    code: &'a str,
    title: &'a str,
    description: &'a str,
}

fn build_prompt(query: &str, results: &[ScoredResult]) -> String {
    let docs: Vec<CandidateDoc> = results
        .iter()
        .map(|r| CandidateDoc {
            code: &r.code,
            title: &r.title,
            description: &r.description,
        })
        .collect();
    let docs_json = serde_json::to_string_pretty(&docs).unwrap_or_else(|_| "[]".to_string());

    format!(
        "Query: {query:?}\n\n\
         Rank the following job entries from most to least relevant to the query.\n\
         Each job includes 'code', 'title', and 'description'.\n\n\
         Jobs:\n{docs_json}\n\n\
         Return ONLY a valid JSON array with one object per job:\n\
         - code\n\
         - title\n\
         - score (0-100 relevance)\n\
         - reasoning (short explanation)"
    )
}

/// One entry of the judge's reply. The schema is strict: unknown fields,
/// missing fields or non-numeric scores all make the whole reply unusable.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JudgeVerdict {
    code: String,
    #[allow(dead_code)]
    title: String,
    score: f64,
    reasoning: String,
}

/// Parses the judge reply into verdicts, tolerating a markdown code fence
/// around the JSON but nothing else.
fn parse_verdicts(reply: &str) -> Result<Vec<JudgeVerdict>, JudgeError> {
    let body = strip_code_fence(reply.trim());

    let verdicts: Vec<JudgeVerdict> =
        serde_json::from_str(body).map_err(|e| JudgeError::MalformedResponse {
            reason: e.to_string(),
        })?;

    for verdict in &verdicts {
        if !verdict.score.is_finite() || !(0.0..=100.0).contains(&verdict.score) {
            return Err(JudgeError::ScoreOutOfRange {
                code: verdict.code.clone(),
                score: verdict.score,
            });
        }
    }

    Ok(verdicts)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the fence line ("```json" or bare "```"), then the closing fence.
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    rest.trim().strip_suffix("```").unwrap_or(rest).trim()
}

/// Maps verdicts back onto the input results, enforcing an exact cover: the
/// judge must score every candidate exactly once and nothing else. Verdict
/// order is ignored; the returned ranking is our own stable sort by judge
/// score descending.
fn apply_verdicts(
    results: &[ScoredResult],
    reply: &str,
) -> Result<Vec<ScoredResult>, JudgeError> {
    let mut verdicts = parse_verdicts(reply)?;

    if verdicts.len() != results.len() {
        return Err(JudgeError::ShapeMismatch {
            expected: results.len(),
            actual: verdicts.len(),
        });
    }

    verdicts.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut by_code: HashMap<&str, &ScoredResult> =
        results.iter().map(|r| (r.code.as_str(), r)).collect();

    let mut reranked = Vec::with_capacity(results.len());
    for verdict in verdicts {
        let Some(result) = by_code.remove(verdict.code.as_str()) else {
            return Err(JudgeError::UnknownCandidate { code: verdict.code });
        };

        let mut annotated = result.clone();
        annotated.judge_score = Some(verdict.score);
        annotated.judge_reasoning = Some(verdict.reasoning);
        reranked.push(annotated);
    }

    Ok(reranked)
}

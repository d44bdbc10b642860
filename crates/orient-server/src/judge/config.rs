use std::time::Duration;

/// Default upper bound on one judge call.
pub const DEFAULT_JUDGE_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct JudgeConfig {
    /// Chat model id handed to genai (e.g. `gemini-2.0-flash`). Absent means
    /// reranking is disabled.
    pub model: Option<String>,

    /// Upper bound on one judge call.
    pub timeout: Duration,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            model: None,
            timeout: Duration::from_millis(DEFAULT_JUDGE_TIMEOUT_MS),
        }
    }
}

impl JudgeConfig {
    pub const ENV_MODEL: &'static str = "ORIENT_JUDGE_MODEL";
    pub const ENV_TIMEOUT_MS: &'static str = "ORIENT_JUDGE_TIMEOUT_MS";

    pub fn from_env() -> Self {
        let model = std::env::var(Self::ENV_MODEL)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let timeout_ms = std::env::var(Self::ENV_TIMEOUT_MS)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_JUDGE_TIMEOUT_MS);

        Self {
            model,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn with_model<S: Into<String>>(model: S) -> Self {
        Self {
            model: Some(model.into()),
            ..Default::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.model.is_some()
    }
}

//! Best-effort localization of result display fields.
//!
//! Translation is decoration, not ranking: a failed translation leaves the
//! affected field in its catalog-native form and never fails the request.
//! Requesting the catalog's native language is a byte-identical no-op.

pub mod error;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use error::TranslateError;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use orient::scoring::ScoredResult;

/// Default translation endpoint base URL.
pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com";

/// Default upper bound on one translation call.
pub const DEFAULT_TRANSLATE_TIMEOUT_MS: u64 = 5_000;

/// Max memoized translations.
const TRANSLATION_CACHE_CAPACITY: u64 = 8_192;

#[derive(Debug, Clone)]
pub struct TranslateConfig {
    /// Base URL of the translation endpoint.
    pub base_url: String,

    /// Per-request timeout applied to the HTTP client.
    pub timeout: Duration,

    /// Language the catalog is authored in.
    pub native_lang: String,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TRANSLATE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TRANSLATE_TIMEOUT_MS),
            native_lang: orient::constants::DEFAULT_NATIVE_LANG.to_string(),
        }
    }
}

impl TranslateConfig {
    pub const ENV_URL: &'static str = "ORIENT_TRANSLATE_URL";
    pub const ENV_TIMEOUT_MS: &'static str = "ORIENT_TRANSLATE_TIMEOUT_MS";
    pub const ENV_NATIVE_LANG: &'static str = "ORIENT_NATIVE_LANG";

    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = std::env::var(Self::ENV_URL)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.base_url);

        let timeout_ms = std::env::var(Self::ENV_TIMEOUT_MS)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TRANSLATE_TIMEOUT_MS);

        let native_lang = std::env::var(Self::ENV_NATIVE_LANG)
            .ok()
            .map(|v| v.trim().to_lowercase())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.native_lang);

        Self {
            base_url,
            timeout: Duration::from_millis(timeout_ms),
            native_lang,
        }
    }
}

/// Capability seam for the translation service.
#[async_trait]
pub trait TranslationBackend: Send + Sync + 'static {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError>;
}

/// Live translator against the `translate_a/single` GET endpoint.
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTranslator {
    pub fn new(config: &TranslateConfig) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl TranslationBackend for HttpTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError> {
        let url = format!("{}/translate_a/single", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source_lang),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TranslateError::Status {
                code: response.status().as_u16(),
            });
        }

        let body: Value = response.json().await?;
        parse_translation(&body)
    }
}

/// The endpoint replies with nested arrays; the first element is a list of
/// `[translated, original, ...]` segments covering the input text.
pub(crate) fn parse_translation(body: &Value) -> Result<String, TranslateError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::MalformedResponse {
            reason: "missing segment array".to_string(),
        })?;

    let mut translated = String::new();
    for segment in segments {
        if let Some(text) = segment.get(0).and_then(Value::as_str) {
            translated.push_str(text);
        }
    }

    if translated.is_empty() {
        return Err(TranslateError::MalformedResponse {
            reason: "no translated segments".to_string(),
        });
    }

    Ok(translated)
}

/// Localizes result display fields, memoizing successes.
pub struct Localizer<T: TranslationBackend> {
    backend: T,
    native_lang: String,
    cache: moka::sync::Cache<(String, String), String>,
}

impl<T: TranslationBackend> Localizer<T> {
    pub fn new<S: Into<String>>(backend: T, native_lang: S) -> Self {
        Self {
            backend,
            native_lang: native_lang.into().to_lowercase(),
            cache: moka::sync::Cache::new(TRANSLATION_CACHE_CAPACITY),
        }
    }

    pub fn native_lang(&self) -> &str {
        &self.native_lang
    }

    /// Translates `title` and `description` of every result into
    /// `target_lang`. Ranking, scores and all other fields pass through
    /// unchanged; so does any field whose translation fails.
    pub async fn localize(
        &self,
        mut results: Vec<ScoredResult>,
        target_lang: &str,
    ) -> Vec<ScoredResult> {
        let target = target_lang.trim().to_lowercase();
        if target.is_empty() || target == self.native_lang {
            return results;
        }

        debug!(target = %target, results = results.len(), "Localizing results");

        for result in &mut results {
            result.title = self.translate_field(&result.title, &target).await;
            result.description = self.translate_field(&result.description, &target).await;
        }

        results
    }

    async fn translate_field(&self, text: &str, target_lang: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let key = (target_lang.to_string(), text.to_string());
        if let Some(hit) = self.cache.get(&key) {
            return hit;
        }

        match self
            .backend
            .translate(text, &self.native_lang, target_lang)
            .await
        {
            Ok(translated) => {
                self.cache.insert(key, translated.clone());
                translated
            }
            Err(e) => {
                warn!(error = %e, target = %target_lang, "Translation failed, keeping original text");
                text.to_string()
            }
        }
    }
}

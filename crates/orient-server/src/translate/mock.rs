//! Mock translation backends for tests.

use async_trait::async_trait;

use super::{TranslateError, TranslationBackend};

/// Scripted translator: tags text with the target language, or always fails.
#[derive(Debug, Clone)]
pub enum MockTranslator {
    Tagging,
    Fail,
}

impl MockTranslator {
    pub fn tagging() -> Self {
        MockTranslator::Tagging
    }

    pub fn failing() -> Self {
        MockTranslator::Fail
    }
}

#[async_trait]
impl TranslationBackend for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        _source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TranslateError> {
        match self {
            MockTranslator::Tagging => Ok(format!("[{target_lang}] {text}")),
            MockTranslator::Fail => Err(TranslateError::Status { code: 503 }),
        }
    }
}

//! Mock judge backends for tests.

use std::time::Duration;

use async_trait::async_trait;

use super::{JudgeBackend, JudgeError};

/// Scripted judge backend: replies with a canned string, errors out, or
/// sleeps past any reasonable timeout.
#[derive(Debug, Clone)]
pub enum MockJudge {
    Reply(String),
    Fail,
    Hang(Duration),
}

impl MockJudge {
    pub fn replying<S: Into<String>>(reply: S) -> Self {
        MockJudge::Reply(reply.into())
    }

    pub fn failing() -> Self {
        MockJudge::Fail
    }

    pub fn hanging(for_duration: Duration) -> Self {
        MockJudge::Hang(for_duration)
    }
}

#[async_trait]
impl JudgeBackend for MockJudge {
    async fn complete(&self, _prompt: &str) -> Result<String, JudgeError> {
        match self {
            MockJudge::Reply(text) => Ok(text.clone()),
            MockJudge::Fail => Err(JudgeError::Backend {
                reason: "mock backend failure".to_string(),
            }),
            MockJudge::Hang(duration) => {
                tokio::time::sleep(*duration).await;
                Ok("[]".to_string())
            }
        }
    }
}

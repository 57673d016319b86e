//! Mock provider implementation for testing.

use super::{ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Succeed with this completion text.
    Text(String),
    /// Succeed, but without any text part.
    Empty,
    /// Fail as a non-success upstream response would.
    ApiFailure,
}

/// Mock text provider for testing.
pub struct MockTextProvider {
    reply: MockReply,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(text: &str) -> Self {
        Self::new(MockReply::Text(text.to_string()))
    }

    pub fn failing() -> Self {
        Self::new(MockReply::ApiFailure)
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.reply {
            MockReply::Text(text) => Ok(ProviderResponse {
                text: Some(text.clone()),
                input_tokens: prompt.len() as i32 / 4,
                output_tokens: 1,
            }),
            MockReply::Empty => Ok(ProviderResponse::default()),
            MockReply::ApiFailure => Err(ProviderError::ApiError(
                "Mock upstream returned 503".to_string(),
            )),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match self.reply {
            MockReply::ApiFailure => Err(ProviderError::ApiError(
                "Mock upstream unavailable".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

//! Mock LLM Provider for Testing and Keyless Demos
//!
//! A configurable mock provider that stands in for the hosted deployment.
//! It is the default provider in a freshly written config so the console
//! runs without credentials, and tests use it to script replies, force
//! failures, and inspect the requests the call path produced.

use crate::{CompletionRequest, CompletionResponse, LLMProvider, Usage};
use anyhow::Result;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Reply used when no scripted responses remain.
const DEMO_REPLY: &str = "I'm running in demo mode without a model connection.|||\
Add a hosted deployment to advisor.toml to get live answers.";

#[derive(Clone)]
pub struct MockProvider {
    responses: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    fallback_reply: String,
    fail: bool,
    name: String,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            fallback_reply: DEMO_REPLY.to_string(),
            fail: false,
            name: "mock".to_string(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Queue a scripted reply; replies are consumed in order.
    pub fn with_response(self, content: &str) -> Self {
        self.responses.lock().unwrap().push_back(content.to_string());
        self
    }

    /// Replace the canned reply returned once scripted replies run out.
    pub fn with_fallback_reply(mut self, content: impl Into<String>) -> Self {
        self.fallback_reply = content.into();
        self
    }

    /// Make every completion call fail, for exercising error paths.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LLMProvider for MockProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.requests.lock().unwrap().push(request);

        if self.fail {
            anyhow::bail!("Mock provider failure");
        }

        let content = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback_reply.clone());

        Ok(CompletionResponse {
            content,
            usage: Usage {
                prompt_tokens: 100,
                completion_tokens: 50,
                total_tokens: 150,
            },
            model: "mock".to_string(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn max_tokens(&self) -> u32 {
        1024
    }

    fn temperature(&self) -> f32 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Message;

    fn request(text: &str) -> CompletionRequest {
        CompletionRequest {
            messages: vec![Message::user(text)],
            max_tokens: None,
            temperature: None,
        }
    }

    #[tokio::test]
    async fn test_scripted_replies_consumed_in_order() {
        let provider = MockProvider::new()
            .with_response("first")
            .with_response("second");

        assert_eq!(provider.complete(request("a")).await.unwrap().content, "first");
        assert_eq!(provider.complete(request("b")).await.unwrap().content, "second");
        // exhausted scripts fall back to the canned demo reply
        assert!(provider
            .complete(request("c"))
            .await
            .unwrap()
            .content
            .contains("demo mode"));
    }

    #[tokio::test]
    async fn test_failing_provider_errors() {
        let provider = MockProvider::new().failing();
        assert!(provider.complete(request("a")).await.is_err());
    }

    #[tokio::test]
    async fn test_requests_are_recorded() {
        let provider = MockProvider::new().with_response("ok");
        provider.complete(request("what's on today?")).await.unwrap();

        let seen = provider.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].messages[0].content, "what's on today?");
    }
}

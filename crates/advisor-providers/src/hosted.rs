//! Hosted chat-completion provider.
//!
//! Talks to an OpenAI-compatible hosted deployment: requests go to
//! `{endpoint}/openai/deployments/{deployment}/chat/completions` with the
//! API version as a query parameter and the key in the `api-key` header.
//! One request per completion, no retries.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::{CompletionRequest, CompletionResponse, LLMProvider, Message, MessageRole, Usage};

pub const HOSTED_DEFAULT_API_VERSION: &str = "2024-06-01";

#[derive(Clone)]
pub struct HostedProvider {
    client: Client,
    api_key: String,
    endpoint: String,
    api_version: String,
    deployment: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    name: String,
}

impl HostedProvider {
    pub fn new(
        api_key: String,
        endpoint: String,
        deployment: String,
        api_version: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<Self> {
        Self::new_with_name(
            "hosted".to_string(),
            api_key,
            endpoint,
            deployment,
            api_version,
            max_tokens,
            temperature,
        )
    }

    pub fn new_with_name(
        name: String,
        api_key: String,
        endpoint: String,
        deployment: String,
        api_version: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> Result<Self> {
        if api_key.is_empty() {
            anyhow::bail!("Hosted provider '{}' has an empty API key", name);
        }

        Ok(Self {
            client: Client::new(),
            api_key,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_version: api_version.unwrap_or_else(|| HOSTED_DEFAULT_API_VERSION.to_string()),
            deployment,
            max_tokens,
            temperature,
            name,
        })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }

    fn create_request_body(
        &self,
        messages: &[Message],
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    ) -> serde_json::Value {
        let mut body = json!({
            "messages": convert_messages(messages),
        });

        if let Some(max_tokens) = max_tokens.or(self.max_tokens) {
            body["max_tokens"] = json!(max_tokens);
        }

        if let Some(temperature) = temperature.or(self.temperature) {
            body["temperature"] = json!(temperature);
        }

        body
    }
}

#[async_trait]
impl LLMProvider for HostedProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        debug!(
            "Processing hosted completion request with {} messages",
            request.messages.len()
        );

        let body =
            self.create_request_body(&request.messages, request.max_tokens, request.temperature);

        debug!(
            "Sending request to hosted deployment: {}",
            self.deployment
        );

        let response = self
            .client
            .post(self.completions_url())
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "Hosted API error {}: {}",
                status,
                error_text
            ));
        }

        let hosted_response: HostedResponse = response.json().await?;

        let content = hosted_response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default();

        let usage = Usage {
            prompt_tokens: hosted_response.usage.prompt_tokens,
            completion_tokens: hosted_response.usage.completion_tokens,
            total_tokens: hosted_response.usage.total_tokens,
        };

        debug!(
            "Hosted completion successful: {} tokens generated",
            usage.completion_tokens
        );

        Ok(CompletionResponse {
            content,
            usage,
            model: self.deployment.clone(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.deployment
    }

    fn max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(1024)
    }

    fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(0.2)
    }
}

fn convert_messages(messages: &[Message]) -> Vec<serde_json::Value> {
    messages
        .iter()
        .map(|msg| {
            json!({
                "role": match msg.role {
                    MessageRole::System => "system",
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                },
                "content": msg.content,
            })
        })
        .collect()
}

// Hosted API response structures
#[derive(Debug, Deserialize)]
struct HostedResponse {
    choices: Vec<HostedChoice>,
    usage: HostedUsage,
}

#[derive(Debug, Deserialize)]
struct HostedChoice {
    message: HostedMessage,
}

#[derive(Debug, Deserialize)]
struct HostedMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HostedUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> HostedProvider {
        HostedProvider::new(
            "test-key".to_string(),
            "https://example.openai.azure.example/".to_string(),
            "advisor-gpt".to_string(),
            None,
            Some(512),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_completions_url_carries_deployment_and_api_version() {
        let url = provider().completions_url();

        assert!(url.contains("/openai/deployments/advisor-gpt/chat/completions"));
        assert!(url.contains(&format!("api-version={}", HOSTED_DEFAULT_API_VERSION)));
        // trailing slash on the endpoint must not double up
        assert!(!url.contains(".example//openai"));
    }

    #[test]
    fn test_request_body_shape() {
        let provider = provider();
        let messages = vec![
            Message::system("persona"),
            Message::user("Show my day"),
        ];

        let body = provider.create_request_body(&messages, None, Some(0.5));

        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Show my day");
        assert_eq!(body["max_tokens"], 512);
        assert_eq!(body["temperature"], 0.5);
    }

    #[test]
    fn test_request_max_tokens_overrides_configured() {
        let body = provider().create_request_body(&[Message::user("hi")], Some(64), None);
        assert_eq!(body["max_tokens"], 64);
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_empty_api_key_is_rejected() {
        let result = HostedProvider::new(
            String::new(),
            "https://example.openai.azure.example".to_string(),
            "advisor-gpt".to_string(),
            None,
            None,
            None,
        );
        assert!(result.is_err());
    }
}

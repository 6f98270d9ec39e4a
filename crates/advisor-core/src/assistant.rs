use anyhow::Result;
use tracing::debug;

use advisor_providers::{CompletionRequest, Message, ProviderRegistry};

/// Persona sent ahead of every instruction. The delimiter instruction keeps
/// replies renderable by the page's paragraph substitution.
const SYSTEM_PERSONA: &str = "You are an assistant for a financial advisor. \
Answer questions about their day, their clients, and their follow-ups in a \
concise, professional tone. Separate paragraphs with '|||' instead of blank \
lines.";

/// Wraps the single chat-completion call the console makes per interaction.
pub struct Assistant {
    registry: ProviderRegistry,
}

impl Assistant {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    /// Send one instruction to the default provider and return its text.
    /// Either a text result comes back or the error propagates; there is no
    /// retry and no other outcome.
    pub async fn ask(&self, instruction: &str) -> Result<String> {
        let provider = self.registry.get(None)?;

        debug!(
            "Sending instruction to '{}' ({} chars)",
            provider.name(),
            instruction.len()
        );

        let request = CompletionRequest {
            messages: vec![
                Message::system(SYSTEM_PERSONA),
                Message::user(instruction),
            ],
            max_tokens: None,
            temperature: None,
        };

        let response = provider.complete(request).await?;

        debug!(
            "Completion from '{}' used {} tokens",
            provider.name(),
            response.usage.total_tokens
        );

        Ok(response.content)
    }
}

mod client;
mod types;

use anyhow::{anyhow, Result};
use tracing::debug;

use client::ClaudeClient;
use types::{ChatRequest, WireMessage};

const DEFAULT_MODEL: &str = "claude-haiku-4-5-20251001";
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Per-call generation knobs. All fields optional; unset fields fall back
/// to the client's defaults.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// Blocking-completion client for the Anthropic Messages API. One call,
/// one finished answer; no streaming, no tool use.
pub struct Claude {
    client: ClaudeClient,
    model: String,
}

impl Claude {
    pub fn new(api_key: &str, model: &str) -> Self {
        let model = if model.is_empty() {
            DEFAULT_MODEL.to_string()
        } else {
            model.to_string()
        };
        Self {
            client: ClaudeClient::new(api_key),
            model,
        }
    }

    /// Point the client at a different API host (for test doubles).
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.client = self.client.with_base_url(url);
        self
    }

    /// Send one user prompt with a system prompt and return the completed
    /// answer text.
    pub async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        options: Option<GenerateOptions>,
    ) -> Result<String> {
        let options = options.unwrap_or_default();

        let request = ChatRequest {
            model: options.model.unwrap_or_else(|| self.model.clone()),
            max_tokens: options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            messages: vec![WireMessage::user(prompt)],
            system: if system_prompt.is_empty() {
                None
            } else {
                Some(system_prompt.to_string())
            },
            temperature: options.temperature,
        };

        let response = self.client.chat(&request).await?;
        let text = response.text();
        if text.is_empty() {
            return Err(anyhow!(
                "Claude returned no text content (stop_reason: {:?})",
                response.stop_reason
            ));
        }

        debug!(chars = text.len(), "Claude generation complete");
        Ok(text)
    }
}

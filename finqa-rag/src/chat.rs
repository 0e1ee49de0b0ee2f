//! Chat-completion client for answer generation.
//!
//! Two OpenAI-compatible provider variants are supported: the OpenAI API
//! itself and the OpenRouter gateway (same wire format, different base
//! endpoint). The variant is resolved once at setup from whichever
//! credential is configured; see [`crate::config::AppConfig::provider`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{RagError, Result};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Near-deterministic sampling for report Q&A.
const TEMPERATURE: f32 = 0.1;

/// The language-model provider variant, chosen once at setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmProvider {
    /// Direct OpenAI API access.
    OpenAi {
        /// API credential.
        api_key: String,
        /// Chat model identifier.
        model: String,
    },
    /// The OpenRouter gateway, speaking the OpenAI wire format.
    OpenRouter {
        /// API credential.
        api_key: String,
        /// Chat model identifier.
        model: String,
    },
}

impl LlmProvider {
    fn base_url(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi { .. } => OPENAI_BASE_URL,
            LlmProvider::OpenRouter { .. } => OPENROUTER_BASE_URL,
        }
    }

    fn api_key(&self) -> &str {
        match self {
            LlmProvider::OpenAi { api_key, .. } | LlmProvider::OpenRouter { api_key, .. } => {
                api_key
            }
        }
    }

    /// The chat model identifier this provider was configured with.
    pub fn model(&self) -> &str {
        match self {
            LlmProvider::OpenAi { model, .. } | LlmProvider::OpenRouter { model, .. } => model,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi { .. } => "OpenAI",
            LlmProvider::OpenRouter { .. } => "OpenRouter",
        }
    }
}

/// A language model that turns a composed prompt into an answer.
///
/// Stateless single-call delegation: no caching, no retries. Call failures
/// propagate as [`RagError::Generation`] with descriptive text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate an answer given the composed system prompt and the verbatim
    /// user question.
    async fn generate(&self, system_prompt: &str, question: &str) -> Result<String>;
}

/// A [`ChatModel`] over the OpenAI-compatible chat-completions endpoint.
pub struct OpenAiChatModel {
    client: reqwest::Client,
    provider: LlmProvider,
}

impl OpenAiChatModel {
    /// Create a chat model for the given provider variant.
    pub fn new(provider: LlmProvider) -> Self {
        Self { client: reqwest::Client::new(), provider }
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn generate(&self, system_prompt: &str, question: &str) -> Result<String> {
        let provider = self.provider.name();
        debug!(provider, model = %self.provider.model(), "generating answer");

        let body = ChatRequest {
            model: self.provider.model(),
            messages: vec![
                ChatMessage { role: "system", content: system_prompt },
                ChatMessage { role: "user", content: question },
            ],
            temperature: TEMPERATURE,
        };

        let url = format!("{}/chat/completions", self.provider.base_url());
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.provider.api_key())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(provider, error = %e, "chat request failed");
                RagError::Generation(format!("{provider} request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            error!(provider, %status, "chat API error");
            return Err(RagError::Generation(format!(
                "{provider} API returned {status}: {detail}"
            )));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            RagError::Generation(format!("{provider} response could not be parsed: {e}"))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| RagError::Generation(format!("{provider} returned no answer text")))
    }
}

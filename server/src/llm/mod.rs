//! LLM — multi-provider adapter for the AI study tools.
//!
//! DESIGN
//! ======
//! Uses environment variables instead of config files. The `LlmClient` enum
//! dispatches to Anthropic or `OpenAI` based on `LLM_PROVIDER`. Image
//! generation is only available through the `OpenAI` provider; Anthropic
//! reports [`LlmError::Unsupported`] and callers fall back.

pub mod anthropic;
pub mod config;
pub mod openai;
pub mod types;

use config::{LlmConfig, LlmProviderKind};
pub use types::LlmChat;
use types::{ChatResponse, LlmError, Message};

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete LLM client that dispatches to either Anthropic or OpenAI.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: LlmProvider,
    model: String,
    image_model: String,
}

enum LlmProvider {
    Anthropic(anthropic::AnthropicClient),
    OpenAi(openai::OpenAiClient),
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// - `LLM_PROVIDER`: "anthropic" (default) or "openai"
    /// - `LLM_API_KEY_ENV`: name of env var holding the API key; defaults to
    ///   `ANTHROPIC_API_KEY` or `OPENAI_API_KEY` by provider
    /// - `LLM_BASE_URL`: API root override (either provider)
    /// - `LLM_MODEL`: model name (e.g. "claude-sonnet-4-5-20250929")
    /// - `LLM_OPENAI_MODE`: "responses" (default) or `"chat_completions"`
    /// - `LLM_OPENAI_BASE_URL`: custom base URL for OpenAI-compatible APIs
    /// - `LLM_IMAGE_MODEL`: image generation model (`OpenAI` only)
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let model = config.model.clone();
        let image_model = config.image_model.clone();
        let inner = match config.provider {
            LlmProviderKind::Anthropic => {
                LlmProvider::Anthropic(anthropic::AnthropicClient::new(config.api_key, &config.base_url, config.timeouts)?)
            }
            LlmProviderKind::OpenAi => LlmProvider::OpenAi(openai::OpenAiClient::new(
                config.api_key,
                config.openai_mode,
                config.base_url,
                config.timeouts,
            )?),
        };
        Ok(Self { inner, model, image_model })
    }

    /// Return the configured model name (e.g. `"claude-sonnet-4-5-20250929"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(&self, max_tokens: u32, system: &str, messages: &[Message]) -> Result<ChatResponse, LlmError> {
        match &self.inner {
            LlmProvider::Anthropic(c) => c.chat(&self.model, max_tokens, system, messages).await,
            LlmProvider::OpenAi(c) => c.chat(&self.model, max_tokens, system, messages).await,
        }
    }

    fn accepts_media(&self, media_type: &str) -> bool {
        match &self.inner {
            LlmProvider::Anthropic(_) => anthropic::accepts_media(media_type),
            LlmProvider::OpenAi(_) => media_type.starts_with("image/"),
        }
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, LlmError> {
        match &self.inner {
            LlmProvider::Anthropic(_) => Err(LlmError::Unsupported("image generation".into())),
            LlmProvider::OpenAi(c) => c.generate_image(&self.image_model, prompt).await,
        }
    }
}

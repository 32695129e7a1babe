//! LLM provider settings.
//!
//! Everything is read through a key lookup so tests can pass a map instead of
//! mutating the process environment. [`LlmConfig::from_env`] binds the lookup
//! to `std::env`.
//!
//! The API key is found through `LLM_API_KEY_ENV` (the name of the variable
//! holding the key). Without it the provider's usual variable is tried:
//! `ANTHROPIC_API_KEY` or `OPENAI_API_KEY`.

use std::str::FromStr;
use std::time::Duration;

use super::types::LlmError;

pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_IMAGE_MODEL: &str = "gpt-image-1";
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProviderKind {
    Anthropic,
    OpenAi,
}

impl LlmProviderKind {
    #[must_use]
    pub fn default_model(self) -> &'static str {
        match self {
            Self::Anthropic => "claude-sonnet-4-5-20250929",
            Self::OpenAi => "gpt-4o",
        }
    }

    #[must_use]
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::Anthropic => DEFAULT_ANTHROPIC_BASE_URL,
            Self::OpenAi => DEFAULT_OPENAI_BASE_URL,
        }
    }

    /// Conventional variable holding this provider's key.
    #[must_use]
    pub fn key_var(self) -> &'static str {
        match self {
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
        }
    }
}

impl FromStr for LlmProviderKind {
    type Err = LlmError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "anthropic" => Ok(Self::Anthropic),
            "openai" => Ok(Self::OpenAi),
            other => Err(LlmError::ConfigParse(format!("unknown LLM_PROVIDER: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAiApiMode {
    ChatCompletions,
    Responses,
}

impl FromStr for OpenAiApiMode {
    type Err = LlmError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "responses" => Ok(Self::Responses),
            "chat_completions" => Ok(Self::ChatCompletions),
            other => Err(LlmError::ConfigParse(format!(
                "LLM_OPENAI_MODE must be 'responses' or 'chat_completions', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for LlmTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_LLM_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_LLM_CONNECT_TIMEOUT_SECS }
    }
}

impl LlmTimeouts {
    /// HTTP client shared by both providers.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the TLS backend fails to load.
    pub fn http_client(self) -> Result<reqwest::Client, LlmError> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.request_secs))
            .connect_timeout(Duration::from_secs(self.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub provider: LlmProviderKind,
    pub api_key: String,
    pub model: String,
    /// API root without a trailing slash (`LLM_BASE_URL`, or
    /// `LLM_OPENAI_BASE_URL` for the OpenAI provider).
    pub base_url: String,
    pub openai_mode: OpenAiApiMode,
    /// Model used by `images/generations` (`OpenAI` only).
    pub image_model: String,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// # Errors
    ///
    /// Returns an error for a missing key or an unknown provider / mode.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from `lookup`, which returns a variable's value.
    ///
    /// # Errors
    ///
    /// Returns an error for a missing key or an unknown provider / mode.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LlmError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = non_empty("LLM_PROVIDER")
            .map_or(Ok(LlmProviderKind::Anthropic), |raw| raw.parse())?;

        let key_var = non_empty("LLM_API_KEY_ENV").unwrap_or_else(|| provider.key_var().to_owned());
        let api_key = non_empty(&key_var).ok_or(LlmError::MissingApiKey { var: key_var })?;

        let base_url = match provider {
            LlmProviderKind::OpenAi => non_empty("LLM_OPENAI_BASE_URL").or_else(|| non_empty("LLM_BASE_URL")),
            LlmProviderKind::Anthropic => non_empty("LLM_BASE_URL"),
        }
        .unwrap_or_else(|| provider.default_base_url().to_owned())
        .trim_end_matches('/')
        .to_owned();

        let parse_secs =
            |key: &str, default: u64| non_empty(key).and_then(|v| v.trim().parse().ok()).unwrap_or(default);

        Ok(Self {
            provider,
            api_key,
            model: non_empty("LLM_MODEL").unwrap_or_else(|| provider.default_model().to_owned()),
            base_url,
            openai_mode: non_empty("LLM_OPENAI_MODE").map_or(Ok(OpenAiApiMode::Responses), |raw| raw.parse())?,
            image_model: non_empty("LLM_IMAGE_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_IMAGE_MODEL.to_owned()),
            timeouts: LlmTimeouts {
                request_secs: parse_secs("LLM_REQUEST_TIMEOUT_SECS", DEFAULT_LLM_REQUEST_TIMEOUT_SECS),
                connect_secs: parse_secs("LLM_CONNECT_TIMEOUT_SECS", DEFAULT_LLM_CONNECT_TIMEOUT_SECS),
            },
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

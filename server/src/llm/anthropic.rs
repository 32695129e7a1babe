//! Anthropic Messages API client.
//!
//! Knix messages already carry Anthropic-shaped image blocks, so the request
//! body is the conversation as-is. Thinking and unknown response blocks are
//! dropped before they reach the tutor reply.

use super::config::LlmTimeouts;
use super::types::{ChatResponse, ContentBlock, LlmError, Message};

const API_VERSION: &str = "2023-06-01";

/// Media types accepted as inline `image` blocks.
const IMAGE_MEDIA_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    messages_url: String,
}

impl AnthropicClient {
    pub fn new(api_key: String, base_url: &str, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        Ok(Self { http: timeouts.http_client()?, api_key, messages_url: format!("{base_url}/messages") })
    }

    pub async fn chat(
        &self,
        model: &str,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        let response = self
            .http
            .post(&self.messages_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&ApiRequest { model, max_tokens, system, messages })
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: error_message(&text) });
        }
        parse_response(&text)
    }
}

pub(crate) fn accepts_media(media_type: &str) -> bool {
    IMAGE_MEDIA_TYPES.contains(&media_type)
}

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [Message],
}

#[derive(serde::Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
    model: String,
    stop_reason: String,
    usage: Usage,
}

#[derive(serde::Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}

#[derive(serde::Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(serde::Deserialize)]
struct ApiErrorDetail {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

/// `"{type}: {message}"` from an error envelope, else the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map_or_else(|_| body.to_owned(), |e| format!("{}: {}", e.error.kind, e.error.message))
}

fn parse_response(json: &str) -> Result<ChatResponse, LlmError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    Ok(ChatResponse {
        content: api
            .content
            .into_iter()
            .filter(|block| !matches!(block, ContentBlock::Unknown | ContentBlock::Thinking { .. }))
            .collect(),
        model: api.model,
        stop_reason: api.stop_reason,
        input_tokens: api.usage.input_tokens,
        output_tokens: api.usage.output_tokens,
    })
}

#[cfg(test)]
#[path = "anthropic_test.rs"]
mod tests;

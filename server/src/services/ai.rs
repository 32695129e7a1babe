//! AI service — tutoring, media analysis, search, and image generation.
//!
//! DESIGN
//! ======
//! Each endpoint builds a prompt, checks the rate limiter, calls the
//! configured [`LlmChat`] provider, and records token usage. Every failure
//! path (no provider, rate limited, unsupported media, provider error)
//! degrades to a static fallback payload with `fallback: true`, so the UI
//! always gets a 200 with something to show.
//!
//! Search grounding is prompt-based: the model is asked to cite full URLs and
//! the distinct URLs found in the answer become the source list.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm::LlmChat;
use crate::llm::types::{Content, ContentBlock, LlmError, MediaSource, Message};
use crate::rate_limit::RateLimitError;
use crate::state::AppState;

pub const TUTOR_FALLBACK: &str = "AI Tutor is currently disabled.";
pub const IMAGE_FALLBACK: &str = "Image analysis is disabled.";
pub const VIDEO_FALLBACK: &str = "Video analysis is disabled.";
pub const SEARCH_FALLBACK: &str = "Search disabled.";

pub const DEFAULT_IMAGE_PROMPT: &str = "Explain this scientific diagram in detail for an A/L student.";
pub const DEFAULT_VIDEO_PROMPT: &str = "Summarize the key scientific concepts in this video.";

const TUTOR_SYSTEM: &str = "You are Knix, a patient tutor for Sri Lankan A/L students studying Biology, \
Physics, Chemistry, Combined Maths and ICT. Explain step by step, use simple examples, and keep answers \
short enough to read on a phone. Students may write in Sinhala or English; reply in the language they use.";

const MEDIA_SYSTEM: &str = "You are Knix, a science tutor for Sri Lankan A/L students. Describe what you \
see accurately and relate it to the A/L syllabus.";

const SEARCH_SYSTEM: &str = "You are a research assistant for Sri Lankan A/L science students. Answer \
concisely and factually. Cite every source you rely on as a full https:// URL on its own line.";

const IMAGE_STYLE: &str = "Clear, labelled educational illustration for A/L science students: ";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("LLM not configured")]
    LlmNotConfigured,
    #[error("empty input")]
    EmptyInput,
    #[error("invalid media: {0}")]
    InvalidMedia(String),
    #[error("provider does not accept {0}")]
    UnsupportedMedia(String),
    #[error("rate limited: {0}")]
    RateLimited(#[from] RateLimitError),
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("LLM returned no text")]
    EmptyResponse,
}

/// One turn of the lesson chat as kept by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatTurn {
    /// `user`, or `model` / `assistant` for tutor turns.
    pub role: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TutorRequest {
    #[serde(default)]
    pub history: Vec<ChatTurn>,
    pub message: String,
    /// Lesson text the question is about.
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeImageRequest {
    /// `data:<mime>;base64,<payload>`
    pub image: String,
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeVideoRequest {
    pub video: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateImageRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextReply {
    pub text: String,
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReply {
    pub text: String,
    pub sources: Vec<Source>,
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageReply {
    /// `data:image/png;base64,...`, or `None` on fallback.
    pub image: Option<String>,
    pub fallback: bool,
}

impl TextReply {
    fn ok(text: String) -> Self {
        Self { text, fallback: false }
    }

    fn fallback(text: &str) -> Self {
        Self { text: text.to_owned(), fallback: true }
    }
}

// =============================================================================
// ENDPOINTS
// =============================================================================

pub async fn tutor(state: &AppState, user_id: &str, req: TutorRequest) -> TextReply {
    let result: Result<String, AiError> = async {
        if req.message.trim().is_empty() {
            return Err(AiError::EmptyInput);
        }
        let system = tutor_system_prompt(req.context.as_deref());
        let messages = build_tutor_messages(&req.history, &req.message);
        complete(state, user_id, &system, &messages).await
    }
    .await;

    match result {
        Ok(text) => TextReply::ok(text),
        Err(e) => {
            warn!(error = %e, %user_id, "ai: tutor fallback");
            TextReply::fallback(TUTOR_FALLBACK)
        }
    }
}

pub async fn analyze_image(state: &AppState, user_id: &str, req: AnalyzeImageRequest) -> TextReply {
    let prompt = prompt_or(req.prompt.as_deref(), DEFAULT_IMAGE_PROMPT);
    match analyze_media(state, user_id, &req.image, None, prompt).await {
        Ok(text) => TextReply::ok(text),
        Err(e) => {
            warn!(error = %e, %user_id, "ai: image analysis fallback");
            TextReply::fallback(IMAGE_FALLBACK)
        }
    }
}

pub async fn analyze_video(state: &AppState, user_id: &str, req: AnalyzeVideoRequest) -> TextReply {
    let prompt = prompt_or(req.prompt.as_deref(), DEFAULT_VIDEO_PROMPT);
    match analyze_media(state, user_id, &req.video, req.mime_type.as_deref(), prompt).await {
        Ok(text) => TextReply::ok(text),
        Err(e) => {
            warn!(error = %e, %user_id, "ai: video analysis fallback");
            TextReply::fallback(VIDEO_FALLBACK)
        }
    }
}

pub async fn search(state: &AppState, user_id: &str, req: SearchRequest) -> SearchReply {
    let result: Result<String, AiError> = async {
        let query = req.query.trim();
        if query.is_empty() {
            return Err(AiError::EmptyInput);
        }
        complete(state, user_id, SEARCH_SYSTEM, &[Message::user(query)]).await
    }
    .await;

    match result {
        Ok(text) => {
            let sources = extract_sources(&text);
            info!(%user_id, sources = sources.len(), "ai: search answered");
            SearchReply { text, sources, fallback: false }
        }
        Err(e) => {
            warn!(error = %e, %user_id, "ai: search fallback");
            SearchReply { text: SEARCH_FALLBACK.to_owned(), sources: Vec::new(), fallback: true }
        }
    }
}

pub async fn generate_image(state: &AppState, user_id: &str, req: GenerateImageRequest) -> ImageReply {
    let result: Result<String, AiError> = async {
        let prompt = req.prompt.trim();
        if prompt.is_empty() {
            return Err(AiError::EmptyInput);
        }
        let llm = llm(state)?;
        state.rate_limiter.check_and_record(user_id)?;
        let data = llm.generate_image(&format!("{IMAGE_STYLE}{prompt}")).await?;
        Ok(format!("data:image/png;base64,{data}"))
    }
    .await;

    match result {
        Ok(image) => ImageReply { image: Some(image), fallback: false },
        Err(e) => {
            warn!(error = %e, %user_id, "ai: image generation fallback");
            ImageReply { image: None, fallback: true }
        }
    }
}

// =============================================================================
// INTERNALS
// =============================================================================

fn llm(state: &AppState) -> Result<&dyn LlmChat, AiError> {
    state.llm.as_deref().ok_or(AiError::LlmNotConfigured)
}

async fn complete(state: &AppState, user_id: &str, system: &str, messages: &[Message]) -> Result<String, AiError> {
    let llm = llm(state)?;
    state.rate_limiter.check_and_record(user_id)?;

    let response = llm
        .chat(state.config.ai_max_tokens, system, messages)
        .await?;
    state
        .rate_limiter
        .record_tokens(user_id, response.total_tokens());

    let text = response.text();
    if text.trim().is_empty() {
        return Err(AiError::EmptyResponse);
    }
    Ok(text)
}

async fn analyze_media(
    state: &AppState,
    user_id: &str,
    data_url: &str,
    declared_type: Option<&str>,
    prompt: &str,
) -> Result<String, AiError> {
    let (url_type, data) = parse_data_url(data_url)?;
    let media_type = declared_type
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(url_type);
    if !llm(state)?.accepts_media(media_type) {
        return Err(AiError::UnsupportedMedia(media_type.to_owned()));
    }

    let message = Message {
        role: "user".into(),
        content: Content::Blocks(vec![
            ContentBlock::Image { source: MediaSource::base64(media_type, data) },
            ContentBlock::Text { text: prompt.to_owned() },
        ]),
    };
    complete(state, user_id, MEDIA_SYSTEM, &[message]).await
}

fn prompt_or<'a>(prompt: Option<&'a str>, default: &'a str) -> &'a str {
    prompt
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(default)
}

pub(crate) fn tutor_system_prompt(context: Option<&str>) -> String {
    match context.map(str::trim).filter(|c| !c.is_empty()) {
        Some(lesson) => format!("{TUTOR_SYSTEM}\n\nThe student is reading this lesson:\n---\n{lesson}\n---"),
        None => TUTOR_SYSTEM.to_owned(),
    }
}

/// Convert the client chat log into provider messages.
///
/// Leading tutor turns (the greeting) are dropped so the conversation opens
/// with the user, and consecutive turns from the same side are merged.
pub(crate) fn build_tutor_messages(history: &[ChatTurn], message: &str) -> Vec<Message> {
    let mut out: Vec<Message> = Vec::new();
    let turns = history
        .iter()
        .map(|t| (is_tutor_role(&t.role), t.text.trim()))
        .chain(std::iter::once((false, message.trim())))
        .filter(|(_, text)| !text.is_empty());

    for (from_tutor, text) in turns {
        if out.is_empty() && from_tutor {
            continue;
        }
        let role = if from_tutor { "assistant" } else { "user" };
        match out.last_mut() {
            Some(Message { role: last_role, content: Content::Text(last) }) if *last_role == role => {
                last.push_str("\n\n");
                last.push_str(text);
            }
            _ => out.push(Message { role: role.to_owned(), content: Content::Text(text.to_owned()) }),
        }
    }
    out
}

fn is_tutor_role(role: &str) -> bool {
    matches!(role, "model" | "assistant")
}

/// Split `data:<mime>;base64,<payload>` into media type and payload.
pub(crate) fn parse_data_url(url: &str) -> Result<(&str, &str), AiError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| AiError::InvalidMedia("not a data URL".into()))?;
    let (meta, data) = rest
        .split_once(',')
        .ok_or_else(|| AiError::InvalidMedia("missing payload".into()))?;
    let media_type = meta
        .strip_suffix(";base64")
        .ok_or_else(|| AiError::InvalidMedia("payload is not base64".into()))?;
    if media_type.is_empty() || data.is_empty() {
        return Err(AiError::InvalidMedia("empty media type or payload".into()));
    }
    Ok((media_type, data))
}

/// Distinct http(s) URLs in `text`, in order of first appearance, titled by host.
pub(crate) fn extract_sources(text: &str) -> Vec<Source> {
    let mut sources: Vec<Source> = Vec::new();
    for token in text.split_whitespace() {
        let Some(start) = token.find("https://").or_else(|| token.find("http://")) else {
            continue;
        };
        let candidate = &token[start..];
        let end = candidate
            .find(|c| matches!(c, ')' | ']' | '>' | '<' | '"' | '\''))
            .unwrap_or(candidate.len());
        let uri = candidate[..end].trim_end_matches(['.', ',', ';', ':', '!', '?']);
        let Some(host) = url_host(uri) else {
            continue;
        };
        if sources.iter().any(|s| s.uri == uri) {
            continue;
        }
        sources.push(Source { title: host.to_owned(), uri: uri.to_owned() });
    }
    sources
}

fn url_host(uri: &str) -> Option<&str> {
    let rest = uri
        .strip_prefix("https://")
        .or_else(|| uri.strip_prefix("http://"))?;
    let host = rest.split(['/', '?', '#']).next()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    if host.is_empty() { None } else { Some(host) }
}

#[cfg(test)]
#[path = "ai_test.rs"]
mod tests;

//! Live Tutor upstream — connect, setup, and message translation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser speaks binary [`LiveFrame`]s over `/api/live`. The realtime
//! voice provider speaks its own websocket dialect: raw PCM16 binary messages
//! for audio in both directions and small JSON text messages for control
//! events. This module owns the provider side; `routes::live` owns the
//! browser socket and the relay loop.

use futures::SinkExt;
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message as UpstreamMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use voice::{INPUT_SAMPLE_RATE, LiveFrame, OUTPUT_SAMPLE_RATE, pcm_mime};

use crate::config::LiveConfig;

pub const LIVE_SYSTEM_INSTRUCTION: &str = "You are Knix Live, a friendly and energetic Biology and Physics \
tutor for A/L students in Sri Lanka. Speak clearly, use simple analogies, and be encouraging.";

pub const NOT_CONFIGURED_MESSAGE: &str = "Live tutor is not configured";
pub const CONNECTION_ERROR_MESSAGE: &str = "Connection error.";

pub type Upstream = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Debug, thiserror::Error)]
pub enum LiveError {
    #[error("live upstream not configured")]
    NotConfigured,
    #[error("upstream websocket: {0}")]
    Upstream(#[from] tokio_tungstenite::tungstenite::Error),
}

impl LiveError {
    /// Message shown in the browser's error banner.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotConfigured => NOT_CONFIGURED_MESSAGE,
            Self::Upstream(_) => CONNECTION_ERROR_MESSAGE,
        }
    }
}

/// Session setup sent as the first upstream message.
#[must_use]
pub fn setup_message(voice: &str) -> Value {
    json!({
        "setup": {
            "responseModalities": ["AUDIO"],
            "voice": voice,
            "systemInstruction": LIVE_SYSTEM_INSTRUCTION,
            "inputAudio": pcm_mime(INPUT_SAMPLE_RATE),
            "outputAudio": pcm_mime(OUTPUT_SAMPLE_RATE),
        }
    })
}

/// Open the upstream socket and send the setup message.
///
/// # Errors
///
/// `NotConfigured` without an upstream URL; `Upstream` when the connect or
/// the setup send fails.
pub async fn connect_upstream(config: &LiveConfig) -> Result<Upstream, LiveError> {
    let url = config
        .upstream_url
        .as_deref()
        .ok_or(LiveError::NotConfigured)?;
    let (mut upstream, _response) = tokio_tungstenite::connect_async(url).await?;
    upstream
        .send(UpstreamMessage::Text(setup_message(&config.voice).to_string().into()))
        .await?;
    Ok(upstream)
}

// =============================================================================
// TRANSLATION
// =============================================================================

/// Translate one upstream message into the frame the browser should see.
#[must_use]
pub fn translate_upstream(message: UpstreamMessage) -> Option<LiveFrame> {
    match message {
        UpstreamMessage::Binary(pcm) => Some(LiveFrame::Audio { pcm: pcm.to_vec(), sample_rate: OUTPUT_SAMPLE_RATE }),
        UpstreamMessage::Text(text) => translate_upstream_text(text.as_str()),
        UpstreamMessage::Close(_) => Some(LiveFrame::Close),
        UpstreamMessage::Ping(_) | UpstreamMessage::Pong(_) | UpstreamMessage::Frame(_) => None,
    }
}

/// Control events arrive either at the top level or under `serverContent`.
#[must_use]
pub fn translate_upstream_text(text: &str) -> Option<LiveFrame> {
    let root: Value = serde_json::from_str(text).ok()?;
    if let Some(message) = root.get("error") {
        let message = message
            .as_str()
            .or_else(|| message.get("message").and_then(Value::as_str))
            .unwrap_or(CONNECTION_ERROR_MESSAGE);
        return Some(LiveFrame::error(message));
    }

    let body = root.get("serverContent").unwrap_or(&root);
    let flag = |key: &str| body.get(key).and_then(Value::as_bool) == Some(true);
    if flag("interrupted") {
        Some(LiveFrame::Interrupted)
    } else if flag("turnComplete") {
        Some(LiveFrame::TurnComplete)
    } else {
        None
    }
}

/// Translate one browser frame into the upstream message it maps to.
#[must_use]
pub fn browser_to_upstream(frame: LiveFrame) -> Option<UpstreamMessage> {
    match frame {
        LiveFrame::Audio { pcm, .. } if !pcm.is_empty() => Some(UpstreamMessage::Binary(pcm.into())),
        LiveFrame::Close => Some(UpstreamMessage::Close(None)),
        _ => None,
    }
}

#[cfg(test)]
#[path = "live_test.rs"]
mod tests;

//! Binary frame codec for the `/api/live` websocket.
//!
//! Frames travel as protobuf-encoded binary messages. Audio payloads are raw
//! PCM16 bytes; no text encoding sits between the microphone and the wire.

use prost::Message;

/// Error returned by [`decode_frame`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The raw bytes could not be decoded as a protobuf `WireLiveFrame`.
    #[error("failed to decode protobuf frame: {0}")]
    Decode(#[from] prost::DecodeError),
    /// The `kind` integer on the wire does not map to a known frame kind.
    #[error("invalid frame kind: {0}")]
    InvalidKind(i32),
    /// An audio frame arrived without a sample rate.
    #[error("audio frame is missing its sample rate")]
    MissingSampleRate,
}

/// One message of the Live Tutor session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LiveFrame {
    /// Server side: the upstream session is open and audio may flow.
    Ready,
    /// Little-endian PCM16 mono audio.
    Audio { pcm: Vec<u8>, sample_rate: u32 },
    /// The tutor was interrupted; queued playback must stop.
    Interrupted,
    /// The tutor finished its turn.
    TurnComplete,
    Error { message: String },
    /// Either side is ending the session.
    Close,
}

impl LiveFrame {
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { message: message.into() }
    }

    /// Short label for logs.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Audio { .. } => "audio",
            Self::Interrupted => "interrupted",
            Self::TurnComplete => "turn_complete",
            Self::Error { .. } => "error",
            Self::Close => "close",
        }
    }
}

/// Encode a frame into protobuf bytes.
#[must_use]
pub fn encode_frame(frame: &LiveFrame) -> Vec<u8> {
    let wire = frame_to_wire(frame);

    let mut out = Vec::with_capacity(wire.encoded_len());
    // Encoding into a growable Vec cannot fail.
    wire.encode(&mut out).unwrap_or_default();
    out
}

/// Decode protobuf bytes into a frame.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed bytes,
/// [`CodecError::InvalidKind`] for unknown kinds and
/// [`CodecError::MissingSampleRate`] for audio without a rate.
pub fn decode_frame(bytes: &[u8]) -> Result<LiveFrame, CodecError> {
    let wire = WireLiveFrame::decode(bytes)?;
    wire_to_frame(wire)
}

fn frame_to_wire(frame: &LiveFrame) -> WireLiveFrame {
    let mut wire = WireLiveFrame::default();
    let kind = match frame {
        LiveFrame::Ready => WireKind::Ready,
        LiveFrame::Audio { pcm, sample_rate } => {
            wire.pcm.clone_from(pcm);
            wire.sample_rate = *sample_rate;
            WireKind::Audio
        }
        LiveFrame::Interrupted => WireKind::Interrupted,
        LiveFrame::TurnComplete => WireKind::TurnComplete,
        LiveFrame::Error { message } => {
            wire.message = Some(message.clone());
            WireKind::Error
        }
        LiveFrame::Close => WireKind::Close,
    };
    wire.kind = kind as i32;
    wire
}

fn wire_to_frame(wire: WireLiveFrame) -> Result<LiveFrame, CodecError> {
    let kind = WireKind::try_from(wire.kind).map_err(|_| CodecError::InvalidKind(wire.kind))?;
    Ok(match kind {
        WireKind::Ready => LiveFrame::Ready,
        WireKind::Audio => {
            if wire.sample_rate == 0 {
                return Err(CodecError::MissingSampleRate);
            }
            LiveFrame::Audio { pcm: wire.pcm, sample_rate: wire.sample_rate }
        }
        WireKind::Interrupted => LiveFrame::Interrupted,
        WireKind::TurnComplete => LiveFrame::TurnComplete,
        WireKind::Error => LiveFrame::Error { message: wire.message.unwrap_or_default() },
        WireKind::Close => LiveFrame::Close,
    })
}

#[derive(Clone, PartialEq, Message)]
struct WireLiveFrame {
    #[prost(enumeration = "WireKind", tag = "1")]
    kind: i32,
    #[prost(bytes = "vec", tag = "2")]
    pcm: Vec<u8>,
    #[prost(uint32, tag = "3")]
    sample_rate: u32,
    #[prost(string, optional, tag = "4")]
    message: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, prost::Enumeration)]
#[repr(i32)]
enum WireKind {
    Ready = 0,
    Audio = 1,
    Interrupted = 2,
    TurnComplete = 3,
    Error = 4,
    Close = 5,
}

#[cfg(test)]
#[path = "frame_test.rs"]
mod tests;

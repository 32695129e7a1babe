//! Shared Live Tutor wire model and audio helpers.
//!
//! This crate owns everything about the realtime voice session that is not
//! tied to a browser or a socket: the binary [`LiveFrame`] codec spoken
//! between `client` and `server`, PCM16 conversion and voice-activity level
//! for captured microphone blocks, and the gap-free playback cursor used to
//! queue returned audio chunks.

mod frame;
pub mod pcm;
mod schedule;

pub use frame::{CodecError, LiveFrame, decode_frame, encode_frame};
pub use schedule::{BOT_SPEAKING_HOLD_MS, PlaybackScheduler, ScheduledChunk};

/// Sample rate of captured microphone audio.
pub const INPUT_SAMPLE_RATE: u32 = 16_000;

/// Sample rate of tutor audio returned for playback.
pub const OUTPUT_SAMPLE_RATE: u32 = 24_000;

/// Samples per captured block (script processor buffer size).
pub const CAPTURE_BLOCK_SIZE: u32 = 4096;

/// MIME type describing raw little-endian PCM16 at `rate`.
#[must_use]
pub fn pcm_mime(rate: u32) -> String {
    format!("audio/pcm;rate={rate}")
}

#[cfg(test)]
mod lib_test {
    use super::*;

    #[test]
    fn capture_mime_matches_input_rate() {
        assert_eq!(pcm_mime(INPUT_SAMPLE_RATE), "audio/pcm;rate=16000");
    }
}

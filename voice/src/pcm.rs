//! PCM16 conversion and voice-activity level for captured audio.

/// Level above which the local user is shown as speaking.
pub const SPEAKING_THRESHOLD: f32 = 100.0;

const SCALE: f32 = 32_768.0;

/// Convert float samples in `[-1, 1]` to little-endian PCM16 bytes.
///
/// Samples are scaled by 32768 and clamped to the `i16` range, so `1.0`
/// becomes `32767` rather than wrapping.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn encode_pcm16(samples: &[f32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        let scaled = (sample * SCALE).clamp(f32::from(i16::MIN), f32::from(i16::MAX));
        out.extend_from_slice(&(scaled as i16).to_le_bytes());
    }
    out
}

/// Convert little-endian PCM16 bytes to float samples.
///
/// A trailing odd byte is ignored.
#[must_use]
pub fn decode_pcm16(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(2)
        .map(|pair| f32::from(i16::from_le_bytes([pair[0], pair[1]])) / SCALE)
        .collect()
}

/// Sum of absolute sample values for one captured block.
#[must_use]
pub fn voice_level(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).sum()
}

#[must_use]
pub fn is_speaking(samples: &[f32]) -> bool {
    voice_level(samples) > SPEAKING_THRESHOLD
}

/// Playback length in seconds of `bytes` of mono PCM16 at `sample_rate`.
#[must_use]
pub fn pcm16_duration(bytes: usize, sample_rate: u32) -> f64 {
    if sample_rate == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let samples = (bytes / 2) as f64;
    samples / f64::from(sample_rate)
}

#[cfg(test)]
#[path = "pcm_test.rs"]
mod tests;

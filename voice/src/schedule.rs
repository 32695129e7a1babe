//! Gap-free playback cursor for returned tutor audio.
//!
//! Chunks arrive faster than they play. Each chunk starts at the later of the
//! running cursor and the audio clock, and advances the cursor by its own
//! duration, so consecutive chunks play back-to-back without gaps or
//! overlaps. The scheduler is clock-agnostic: callers pass the audio
//! context's `currentTime` in seconds.

use std::collections::BTreeSet;

/// How long the tutor-speaking indicator stays raised after a chunk arrives.
pub const BOT_SPEAKING_HOLD_MS: u32 = 500;

/// Placement of one chunk on the audio clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledChunk {
    /// Handle used to report `ended` and to find the source on interrupt.
    pub id: u64,
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Default)]
pub struct PlaybackScheduler {
    next_start: f64,
    next_id: u64,
    pending: BTreeSet<u64>,
}

impl PlaybackScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a chunk of `duration` seconds, given the clock reading `now`.
    pub fn schedule(&mut self, now: f64, duration: f64) -> ScheduledChunk {
        let start = self.next_start.max(now);
        let end = start + duration.max(0.0);
        self.next_start = end;

        let id = self.next_id;
        self.next_id += 1;
        self.pending.insert(id);

        ScheduledChunk { id, start, end }
    }

    /// A source finished playing. Returns whether it was still pending.
    pub fn ended(&mut self, id: u64) -> bool {
        self.pending.remove(&id)
    }

    /// Withdraw a chunk whose source never started. The cursor rewinds when
    /// it was the most recently placed chunk.
    pub fn cancel(&mut self, chunk: ScheduledChunk) {
        self.pending.remove(&chunk.id);
        if chunk.id + 1 == self.next_id {
            self.next_start = chunk.start;
        }
    }

    /// Drop every pending chunk and reset the cursor to zero.
    ///
    /// Returns the ids whose sources must be stopped.
    pub fn interrupt(&mut self) -> Vec<u64> {
        self.next_start = 0.0;
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    #[must_use]
    pub fn next_start(&self) -> f64 {
        self.next_start
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
#[path = "schedule_test.rs"]
mod tests;

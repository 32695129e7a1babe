//! Focus/break countdown state machine for the study timer widget.
//!
//! The widget drives [`StudyTimer::tick`] once per second while running.
//! When a phase reaches zero the timer stops and switches to the other
//! phase, so each phase is started explicitly.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

pub const FOCUS_SECS: u32 = 25 * 60;
pub const BREAK_SECS: u32 = 5 * 60;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Focus,
    Break,
}

impl Phase {
    #[must_use]
    pub fn duration_secs(self) -> u32 {
        match self {
            Self::Focus => FOCUS_SECS,
            Self::Break => BREAK_SECS,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Focus => "Focus",
            Self::Break => "Break",
        }
    }

    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Focus => Self::Break,
            Self::Break => Self::Focus,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StudyTimer {
    pub phase: Phase,
    pub remaining: u32,
    pub running: bool,
    /// Focus phases finished since the widget mounted.
    pub completed_focus: u32,
}

impl Default for StudyTimer {
    fn default() -> Self {
        Self::new(Phase::Focus)
    }
}

impl StudyTimer {
    #[must_use]
    pub fn new(phase: Phase) -> Self {
        Self { phase, remaining: phase.duration_secs(), running: false, completed_focus: 0 }
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Restart the current phase from its full duration, paused.
    pub fn reset(&mut self) {
        self.remaining = self.phase.duration_secs();
        self.running = false;
    }

    /// Jump to `phase`, paused at its full duration.
    pub fn switch_to(&mut self, phase: Phase) {
        self.phase = phase;
        self.reset();
    }

    /// Advance one second. Returns `true` when the phase just finished.
    pub fn tick(&mut self) -> bool {
        if !self.running || self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        if self.remaining > 0 {
            return false;
        }
        if self.phase == Phase::Focus {
            self.completed_focus += 1;
        }
        self.switch_to(self.phase.other());
        true
    }

    /// Elapsed share of the current phase in `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let total = f64::from(self.phase.duration_secs());
        1.0 - f64::from(self.remaining) / total
    }
}

/// `MM:SS` clock text.
#[must_use]
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

//! Live Tutor session flags rendered by the live screen.

/// Connection and activity indicators for the realtime voice session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LiveState {
    pub connecting: bool,
    pub connected: bool,
    /// Microphone level is above the speaking threshold.
    pub user_speaking: bool,
    /// Tutor audio arrived within the last hold window.
    pub bot_speaking: bool,
    pub error: Option<String>,
}

impl LiveState {
    /// Flags after a disconnect; keeps any error banner visible.
    #[must_use]
    pub fn disconnected(&self) -> Self {
        Self { error: self.error.clone(), ..Self::default() }
    }

    /// Short status line for the session card.
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        if self.connecting {
            "Connecting..."
        } else if !self.connected {
            "Offline"
        } else if self.bot_speaking {
            "Tutor speaking"
        } else if self.user_speaking {
            "Listening to you"
        } else {
            "Listening"
        }
    }
}

#[cfg(test)]
mod live_test {
    use super::*;

    #[test]
    fn disconnected_clears_flags_but_keeps_error() {
        let state = LiveState {
            connecting: false,
            connected: true,
            user_speaking: true,
            bot_speaking: true,
            error: Some("Connection error.".into()),
        };
        let next = state.disconnected();
        assert!(!next.connected && !next.user_speaking && !next.bot_speaking);
        assert_eq!(next.error.as_deref(), Some("Connection error."));
    }

    #[test]
    fn status_prefers_tutor_speech() {
        let mut state = LiveState { connected: true, ..LiveState::default() };
        assert_eq!(state.status_label(), "Listening");
        state.user_speaking = true;
        assert_eq!(state.status_label(), "Listening to you");
        state.bot_speaking = true;
        assert_eq!(state.status_label(), "Tutor speaking");
        assert_eq!(LiveState::default().status_label(), "Offline");
    }
}

//! Local UI chrome state (theme, sidebar).
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of the auth and live state so
//! the layout can evolve independently of data.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// UI state for the sidebar and theme.
#[derive(Clone, Debug)]
pub struct UiState {
    pub dark_mode: bool,
    pub sidebar_open: bool,
    /// Transient toast text such as "Link copied to clipboard!".
    pub notice: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self { dark_mode: true, sidebar_open: true, notice: None }
    }
}

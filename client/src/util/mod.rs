//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic to improve reuse and testability.

#[cfg(feature = "hydrate")]
pub mod audio;
pub mod browser;
pub mod calculator;
pub mod dark_mode;
pub mod editor;
pub mod markdown;
pub mod timer;
pub mod ui_persistence;

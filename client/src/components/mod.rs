//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the shared chrome, cards, widgets, and dialogs while
//! reading/writing shared state from Leptos context providers.

pub mod calculator_pad;
pub mod confirm_dialog;
pub mod layout;
pub mod markdown_view;
pub mod post_card;
pub mod resource_row;
pub mod stat_card;
pub mod study_timer;
pub mod tutor_chat;
pub mod whiteboard;

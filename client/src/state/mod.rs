//! Reactive application state shared through Leptos context.
//!
//! DESIGN
//! ======
//! Each struct is wrapped in one `RwSignal` by `app::App` and read with
//! `expect_context`, so components subscribe to the slice they render.

pub mod auth;
pub mod live;
pub mod ui;

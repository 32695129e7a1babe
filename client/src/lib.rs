//! # client
//!
//! Leptos + WASM frontend for the Knix study platform.
//!
//! The server renders the [`app::shell`] once and the browser hydrates it.
//! Screens are selected by the hash router in [`router`], so every deep link
//! (`/#/course/p1`) is served by the same SSR route. Shared records come from
//! the `catalog` crate and the Live Tutor wire frames from `voice`, which
//! keeps the browser and the server on one schema.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod router;
pub mod state;
pub mod util;

/// WASM entry point: install panic/log hooks and hydrate the SSR body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}

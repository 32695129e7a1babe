//! Domain services used by websocket and HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on protocol translation and auth plumbing.

pub mod ai;
pub mod auth;
pub mod content;
pub mod live;
pub mod persistence;
pub mod session;

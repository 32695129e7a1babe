//! Networking modules for HTTP and the Live Tutor socket.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls, `live` manages the realtime voice websocket,
//! and `types` defines the request/response schema.

pub mod api;
pub mod live;
pub mod types;

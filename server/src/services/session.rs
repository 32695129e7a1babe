//! Session token management.
//!
//! ARCHITECTURE
//! ============
//! HTTP auth uses opaque random tokens carried in the `session_token` cookie.
//! The token table lives in `AppState` and maps a token to a user id; the
//! user record itself is always read from the catalog, so role changes take
//! effect on the next request.
//!
//! TRADE-OFFS
//! ==========
//! Sessions are not persisted. A server restart signs everyone out, which is
//! acceptable because login is a single email form.

use std::fmt::Write;

use catalog::User;
use rand::Rng;

use crate::state::AppState;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Create a session for the given user, returning the token.
pub async fn create_session(state: &AppState, user_id: &str) -> String {
    let token = generate_token();
    state
        .sessions
        .write()
        .await
        .insert(token.clone(), user_id.to_owned());
    token
}

/// Validate a session token and return the associated user.
///
/// A token whose user has since been deleted is treated as invalid and
/// dropped.
pub async fn validate_session(state: &AppState, token: &str) -> Option<User> {
    let user_id = state.sessions.read().await.get(token).cloned()?;
    let user = state
        .catalog
        .read()
        .await
        .catalog
        .find_user(&user_id)
        .cloned();
    if user.is_none() {
        delete_session(state, token).await;
    }
    user
}

/// Delete a session by token.
pub async fn delete_session(state: &AppState, token: &str) {
    state.sessions.write().await.remove(token);
}

/// Drop every session belonging to `user_id`. Returns how many were removed.
pub async fn delete_sessions_for_user(state: &AppState, user_id: &str) -> usize {
    let mut sessions = state.sessions.write().await;
    let before = sessions.len();
    sessions.retain(|_, owner| owner != user_id);
    before - sessions.len()
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

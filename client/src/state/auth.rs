//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the route guard and the sidebar to coordinate login redirects and
//! role-dependent rendering.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use catalog::{Role, User};

/// Authentication state tracking the current user and loading status.
///
/// `loading` stays `true` until `/api/auth/me` has answered once, so guarded
/// screens wait instead of redirecting a signed-in user to `/login`.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    /// State used before the session probe completes.
    #[must_use]
    pub fn pending() -> Self {
        Self { user: None, loading: true }
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role().is_some_and(Role::is_admin)
    }

    #[must_use]
    pub fn can_publish(&self) -> bool {
        self.role().is_some_and(Role::can_publish)
    }

    /// First name for greetings, `"Student"` for guests.
    #[must_use]
    pub fn greeting_name(&self) -> String {
        self.user
            .as_ref()
            .and_then(|u| u.name.split_whitespace().next())
            .map_or_else(|| "Student".to_owned(), str::to_owned)
    }
}

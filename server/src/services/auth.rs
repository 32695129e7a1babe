//! Email login — find-or-create a user by email address.
//!
//! DESIGN
//! ======
//! There are no passwords. Signing in with an unknown email creates a
//! `student` joined today; an existing email signs in as that user with
//! whatever role the admin has assigned. The display name defaults to the
//! local part of the email address.

use catalog::{CatalogError, Collection, Role, User};

use crate::services::content::{new_id, today};
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email address")]
    InvalidEmail,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Minimal shape check: one `@` with a non-empty local part and a dotted domain.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

fn display_name(email: &str, name: Option<&str>) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.to_owned(),
        None => email.split('@').next().unwrap_or(email).to_owned(),
    }
}

/// Resolve the user for a login attempt, creating a student on first sign-in.
///
/// # Errors
///
/// `InvalidEmail` for a malformed address.
pub async fn login(state: &AppState, email: &str, name: Option<&str>) -> Result<User, AuthError> {
    let email = email.trim();
    if !is_valid_email(email) {
        return Err(AuthError::InvalidEmail);
    }

    let mut guard = state.catalog.write().await;
    if let Some(user) = guard.catalog.find_user_by_email(email) {
        return Ok(user.clone());
    }

    let user = User {
        id: new_id(),
        name: display_name(email, name),
        email: email.to_owned(),
        role: Role::Student,
        joined_date: today(),
    };
    let user = guard.catalog.add_user(user)?.clone();
    guard.mark_dirty(Collection::Users);
    tracing::info!(user_id = %user.id, "new student registered");
    Ok(user)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

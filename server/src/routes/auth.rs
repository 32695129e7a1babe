//! Auth routes — email login, session cookie, role guards.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use catalog::User;
use serde::Deserialize;
use time::Duration;

use crate::services::auth::{self as auth_svc, AuthError};
use crate::services::session;
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: User,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state, token)
            .await
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { user, token: token.to_owned() })
    }
}

/// Admin-only endpoints.
pub(crate) fn require_admin(auth: &AuthUser) -> Result<(), StatusCode> {
    if auth.user.role.is_admin() { Ok(()) } else { Err(StatusCode::FORBIDDEN) }
}

/// Endpoints that create or change posts and resources.
pub(crate) fn require_publisher(auth: &AuthUser) -> Result<(), StatusCode> {
    if auth.user.role.can_publish() { Ok(()) } else { Err(StatusCode::FORBIDDEN) }
}

fn session_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

pub(crate) fn auth_error_to_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::InvalidEmail => StatusCode::BAD_REQUEST,
        AuthError::Catalog(e) => super::catalog_error_to_status(e),
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// `POST /api/auth/login` — find or create the user, set the session cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<User>), StatusCode> {
    let user = auth_svc::login(&state, &body.email, body.name.as_deref())
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "login rejected");
            auth_error_to_status(&e)
        })?;

    let token = session::create_session(&state, &user.id).await;
    tracing::info!(user_id = %user.id, role = user.role.as_str(), "user signed in");

    let jar = CookieJar::new().add(session_cookie(token, state.config.cookie_secure));
    Ok((jar, Json(user)))
}

/// `GET /api/auth/me` — return current user.
pub async fn me(auth: AuthUser) -> Json<User> {
    Json(auth.user)
}

/// `POST /api/auth/logout` — delete session, clear cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    session::delete_session(&state, &auth.token).await;

    let mut cookie = session_cookie(String::new(), state.config.cookie_secure);
    cookie.set_max_age(Duration::ZERO);

    let jar = CookieJar::new().add(cookie);
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

//! User administration routes (admin only).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use catalog::{Role, User};
use serde::Deserialize;

use super::auth::{AuthUser, require_admin};
use super::catalog_error_to_status;
use crate::services::content::{self, NewUser};
use crate::services::session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RoleUpdate {
    pub role: Role,
}

/// `GET /api/users`
pub async fn list_users(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<User>>, StatusCode> {
    require_admin(&auth)?;
    Ok(Json(content::list_users(&state).await))
}

/// `POST /api/users`
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), StatusCode> {
    require_admin(&auth)?;
    let user = content::create_user(&state, body)
        .await
        .map_err(|e| catalog_error_to_status(&e))?;
    tracing::info!(admin = %auth.user.id, user_id = %user.id, role = user.role.as_str(), "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// `PATCH /api/users/{id}/role`
pub async fn update_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<RoleUpdate>,
) -> Result<Json<User>, StatusCode> {
    require_admin(&auth)?;
    let user = content::set_user_role(&state, &id, body.role)
        .await
        .map_err(|e| catalog_error_to_status(&e))?;
    tracing::info!(admin = %auth.user.id, user_id = %id, role = body.role.as_str(), "user role changed");
    Ok(Json(user))
}

/// `DELETE /api/users/{id}`: idempotent, but an admin cannot delete their own account.
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    require_admin(&auth)?;
    if id == auth.user.id {
        return Err(StatusCode::BAD_REQUEST);
    }
    if content::remove_user(&state, &id).await {
        let dropped = session::delete_sessions_for_user(&state, &id).await;
        tracing::info!(admin = %auth.user.id, user_id = %id, dropped, "user deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;

//! Spark Post routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use catalog::BlogPost;

use super::auth::{AuthUser, require_publisher};
use super::catalog_error_to_status;
use crate::services::content::{self, PostDraft};
use crate::state::AppState;

/// `GET /api/posts` — newest first.
pub async fn list_posts(State(state): State<AppState>) -> Json<Vec<BlogPost>> {
    Json(content::list_posts(&state).await)
}

/// `POST /api/posts` — authored by the signed-in creator.
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(draft): Json<PostDraft>,
) -> Result<(StatusCode, Json<BlogPost>), StatusCode> {
    require_publisher(&auth)?;
    let post = content::create_post(&state, draft, &auth.user.name)
        .await
        .map_err(|e| catalog_error_to_status(&e))?;
    tracing::info!(user_id = %auth.user.id, post_id = %post.id, subject = %post.subject, "post published");
    Ok((StatusCode::CREATED, Json(post)))
}

/// `PUT /api/posts/{id}`
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(draft): Json<PostDraft>,
) -> Result<Json<BlogPost>, StatusCode> {
    require_publisher(&auth)?;
    let post = content::edit_post(&state, &id, draft)
        .await
        .map_err(|e| catalog_error_to_status(&e))?;
    Ok(Json(post))
}

/// `DELETE /api/posts/{id}` — idempotent.
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    require_publisher(&auth)?;
    if content::remove_post(&state, &id).await {
        tracing::info!(user_id = %auth.user.id, post_id = %id, "post deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/posts/{id}/like`
pub async fn like_post(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<BlogPost>, StatusCode> {
    content::like_post(&state, &id)
        .await
        .map(Json)
        .map_err(|e| catalog_error_to_status(&e))
}

#[cfg(test)]
#[path = "posts_test.rs"]
mod tests;

//! Resource library routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use catalog::{ResourceCategory, ResourceItem, Subject};
use serde::{Deserialize, Serialize};

use super::auth::{AuthUser, require_publisher};
use super::catalog_error_to_status;
use crate::services::content::{self, ResourceDraft};
use crate::state::AppState;

/// An item together with the subject bucket it now lives in.
#[derive(Debug, Serialize)]
pub struct PlacedResource {
    pub category: Subject,
    pub item: ResourceItem,
}

/// Edit form body: the draft plus the subject the item was loaded from.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUpdate {
    #[serde(flatten)]
    pub draft: ResourceDraft,
    pub original_category: Subject,
}

/// `GET /api/resources`
pub async fn list_resources(State(state): State<AppState>) -> Json<Vec<ResourceCategory>> {
    Json(content::list_resources(&state).await)
}

/// `POST /api/resources`
pub async fn create_resource(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(draft): Json<ResourceDraft>,
) -> Result<(StatusCode, Json<PlacedResource>), StatusCode> {
    require_publisher(&auth)?;
    let (category, item) = content::create_resource(&state, draft, &auth.user.name)
        .await
        .map_err(|e| catalog_error_to_status(&e))?;
    tracing::info!(user_id = %auth.user.id, resource_id = %item.id, %category, "resource added");
    Ok((StatusCode::CREATED, Json(PlacedResource { category, item })))
}

/// `PUT /api/resources/{id}` — moves the item when its subject changed.
pub async fn update_resource(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<ResourceUpdate>,
) -> Result<Json<PlacedResource>, StatusCode> {
    require_publisher(&auth)?;
    let original = body.original_category;
    let (category, item) = content::edit_resource(&state, &id, body.draft, original)
        .await
        .map_err(|e| catalog_error_to_status(&e))?;
    if category != original {
        tracing::info!(resource_id = %id, from = %original, to = %category, "resource moved");
    }
    Ok(Json(PlacedResource { category, item }))
}

/// `DELETE /api/resources/{id}` — idempotent.
pub async fn delete_resource(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    require_publisher(&auth)?;
    if content::remove_resource(&state, &id).await {
        tracing::info!(user_id = %auth.user.id, resource_id = %id, "resource deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/resources/{id}/download` — public; counts and returns the item.
pub async fn download_resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResourceItem>, StatusCode> {
    content::record_download(&state, &id)
        .await
        .map(Json)
        .map_err(|e| catalog_error_to_status(&e))
}

#[cfg(test)]
#[path = "resources_test.rs"]
mod tests;

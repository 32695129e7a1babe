//! Content service — catalog mutations on behalf of the REST routes.
//!
//! DESIGN
//! ======
//! Every mutation is a read-modify-write under the catalog write lock and
//! marks the touched collection dirty before the lock is released. The
//! persistence task picks dirty collections up on its next cycle.
//!
//! Request bodies (`PostDraft`, `ResourceDraft`, `NewUser`) are normalized
//! here: blank optional strings become `None`, a blank resource size becomes
//! `"0 MB"`, and counters start at zero. Ids are server-generated UUIDs.

use catalog::{
    BlogPost, CatalogError, CatalogStats, Collection, ResourceCategory, ResourceItem, ResourceKind, Role, Subject,
    User,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::state::AppState;

pub const DEFAULT_RESOURCE_SIZE: &str = "0 MB";

// =============================================================================
// REQUEST BODIES
// =============================================================================

/// Admin "add user" form.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

/// Creator post form, used for both create and edit.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub subject: Subject,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Creator resource form, used for both create and edit.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDraft {
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: ResourceKind,
    #[serde(default)]
    pub size: String,
    pub category: Subject,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Today's date as `YYYY-MM-DD` (UTC).
#[must_use]
pub fn today() -> String {
    time::OffsetDateTime::now_utc().date().to_string()
}

#[must_use]
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn resource_item(id: String, draft: ResourceDraft, downloads: u32, author: Option<String>) -> (Subject, ResourceItem) {
    let size = draft.size.trim();
    let item = ResourceItem {
        id,
        title: draft.title.trim().to_owned(),
        kind: draft.kind,
        size: if size.is_empty() { DEFAULT_RESOURCE_SIZE.to_owned() } else { size.to_owned() },
        downloads,
        url: non_blank(draft.url),
        description: non_blank(draft.description),
        author,
    };
    (draft.category, item)
}

// =============================================================================
// USERS
// =============================================================================

pub async fn list_users(state: &AppState) -> Vec<User> {
    state.catalog.read().await.catalog.users().to_vec()
}

/// Create a user from the admin form.
///
/// # Errors
///
/// `Invalid` for a blank name or email, `Duplicate` for a taken email.
pub async fn create_user(state: &AppState, new_user: NewUser) -> Result<User, CatalogError> {
    let user = User {
        id: new_id(),
        name: new_user.name.trim().to_owned(),
        email: new_user.email.trim().to_owned(),
        role: new_user.role,
        joined_date: today(),
    };
    let mut guard = state.catalog.write().await;
    let user = guard.catalog.add_user(user)?.clone();
    guard.mark_dirty(Collection::Users);
    Ok(user)
}

pub async fn set_user_role(state: &AppState, id: &str, role: Role) -> Result<User, CatalogError> {
    let mut guard = state.catalog.write().await;
    let user = guard.catalog.update_user_role(id, role)?.clone();
    guard.mark_dirty(Collection::Users);
    Ok(user)
}

/// Remove a user. Returns whether anything was removed.
pub async fn remove_user(state: &AppState, id: &str) -> bool {
    let mut guard = state.catalog.write().await;
    let removed = guard.catalog.delete_user(id);
    if removed {
        guard.mark_dirty(Collection::Users);
    }
    removed
}

// =============================================================================
// POSTS
// =============================================================================

pub async fn list_posts(state: &AppState) -> Vec<BlogPost> {
    state.catalog.read().await.catalog.posts().to_vec()
}

/// Publish a new post at the head of the feed.
///
/// # Errors
///
/// `Invalid` when title or content is blank.
pub async fn create_post(state: &AppState, draft: PostDraft, author: &str) -> Result<BlogPost, CatalogError> {
    let post = BlogPost {
        id: new_id(),
        title: draft.title.trim().to_owned(),
        content: draft.content,
        subject: draft.subject,
        author: author.to_owned(),
        date: today(),
        image_url: non_blank(draft.image_url),
        likes: 0,
    };
    let mut guard = state.catalog.write().await;
    let post = guard.catalog.add_post(post)?.clone();
    guard.mark_dirty(Collection::Posts);
    Ok(post)
}

/// Replace the editable fields of post `id`. Author, date and likes are kept.
///
/// # Errors
///
/// `NotFound` for an unknown id, `Invalid` for a blank title or content.
pub async fn edit_post(state: &AppState, id: &str, draft: PostDraft) -> Result<BlogPost, CatalogError> {
    let mut guard = state.catalog.write().await;
    let existing = guard
        .catalog
        .find_post(id)
        .cloned()
        .ok_or_else(|| CatalogError::not_found("post", id))?;
    let post = BlogPost {
        title: draft.title.trim().to_owned(),
        content: draft.content,
        subject: draft.subject,
        image_url: non_blank(draft.image_url),
        ..existing
    };
    let post = guard.catalog.update_post(post)?.clone();
    guard.mark_dirty(Collection::Posts);
    Ok(post)
}

pub async fn remove_post(state: &AppState, id: &str) -> bool {
    let mut guard = state.catalog.write().await;
    let removed = guard.catalog.delete_post(id);
    if removed {
        guard.mark_dirty(Collection::Posts);
    }
    removed
}

pub async fn like_post(state: &AppState, id: &str) -> Result<BlogPost, CatalogError> {
    let mut guard = state.catalog.write().await;
    let post = guard.catalog.like_post(id)?.clone();
    guard.mark_dirty(Collection::Posts);
    Ok(post)
}

// =============================================================================
// RESOURCES
// =============================================================================

pub async fn list_resources(state: &AppState) -> Vec<ResourceCategory> {
    state.catalog.read().await.catalog.resources().to_vec()
}

/// Add a resource to its subject bucket.
///
/// # Errors
///
/// `Invalid` when title or url is blank.
pub async fn create_resource(
    state: &AppState,
    draft: ResourceDraft,
    author: &str,
) -> Result<(Subject, ResourceItem), CatalogError> {
    let (category, item) = resource_item(new_id(), draft, 0, Some(author.to_owned()));
    let mut guard = state.catalog.write().await;
    let item = guard.catalog.add_resource(category, item)?.clone();
    guard.mark_dirty(Collection::Resources);
    Ok((category, item))
}

/// Edit resource `id`, moving it to `draft.category` if that differs from
/// `original_category`. The download count and author are kept.
///
/// # Errors
///
/// `NotFound` for an unknown id, `Invalid` for a blank title or url.
pub async fn edit_resource(
    state: &AppState,
    id: &str,
    draft: ResourceDraft,
    original_category: Subject,
) -> Result<(Subject, ResourceItem), CatalogError> {
    let mut guard = state.catalog.write().await;
    let (downloads, author) = guard
        .catalog
        .find_resource(id)
        .map(|(_, item)| (item.downloads, item.author.clone()))
        .ok_or_else(|| CatalogError::not_found("resource", id))?;
    let (category, item) = resource_item(id.to_owned(), draft, downloads, author);
    let item = guard
        .catalog
        .update_resource(item, category, original_category)?
        .clone();
    guard.mark_dirty(Collection::Resources);
    Ok((category, item))
}

pub async fn remove_resource(state: &AppState, id: &str) -> bool {
    let mut guard = state.catalog.write().await;
    let removed = guard.catalog.delete_resource(id);
    if removed {
        guard.mark_dirty(Collection::Resources);
    }
    removed
}

pub async fn record_download(state: &AppState, id: &str) -> Result<ResourceItem, CatalogError> {
    let mut guard = state.catalog.write().await;
    let (_, item) = guard.catalog.record_download(id)?;
    let item = item.clone();
    guard.mark_dirty(Collection::Resources);
    Ok(item)
}

// =============================================================================
// STATS
// =============================================================================

pub async fn stats(state: &AppState) -> CatalogStats {
    state.catalog.read().await.catalog.stats()
}

#[cfg(test)]
#[path = "content_test.rs"]
mod tests;

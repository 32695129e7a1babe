//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics so fetch failures
//! degrade to empty lists or error banners without crashing hydration. The
//! AI endpoints already answer with fallback text on provider errors, so an
//! `Err` here means the request itself failed.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{
    BlogPost, CatalogStats, ChatTurn, ImageReply, NewUser, PlacedResource, PostDraft, ResourceCategory, ResourceDraft,
    ResourceItem, Role, SearchReply, Subject, TextReply, User,
};

#[cfg(feature = "hydrate")]
use serde::Serialize;
#[cfg(feature = "hydrate")]
use serde::de::DeserializeOwned;

#[cfg(any(test, feature = "hydrate"))]
fn user_endpoint(id: &str) -> String {
    format!("/api/users/{id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn post_endpoint(id: &str) -> String {
    format!("/api/posts/{id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn resource_endpoint(id: &str) -> String {
    format!("/api/resources/{id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(action: &str, status: u16) -> String {
    match status {
        401 => format!("{action} failed: please log in"),
        403 => format!("{action} failed: not allowed"),
        _ => format!("{action} failed: {status}"),
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

#[cfg(feature = "hydrate")]
async fn read_json<T: DeserializeOwned>(action: &str, resp: gloo_net::http::Response) -> Result<T, String> {
    if !resp.ok() {
        return Err(request_failed_message(action, resp.status()));
    }
    resp.json::<T>().await.map_err(|e| e.to_string())
}

#[cfg(feature = "hydrate")]
async fn get_json<T: DeserializeOwned>(action: &str, url: &str) -> Result<T, String> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    read_json(action, resp).await
}

#[cfg(feature = "hydrate")]
async fn send_json<B: Serialize, T: DeserializeOwned>(
    action: &str,
    builder: gloo_net::http::RequestBuilder,
    body: &B,
) -> Result<T, String> {
    let resp = builder
        .json(body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    read_json(action, resp).await
}

#[cfg(feature = "hydrate")]
async fn send_empty(action: &str, builder: gloo_net::http::RequestBuilder) -> Result<(), String> {
    let resp = builder.send().await.map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(request_failed_message(action, resp.status()));
    }
    Ok(())
}

#[cfg(not(feature = "hydrate"))]
fn unavailable<T>() -> Result<T, String> {
    Err("not available on server".to_owned())
}

// =============================================================================
// AUTH
// =============================================================================

/// Sign in (or register) with an email via `POST /api/auth/login`.
///
/// # Errors
///
/// Returns an error string if the request fails or the email is rejected.
pub async fn login(email: &str, name: Option<&str>) -> Result<User, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "email": email, "name": name });
        send_json("login", gloo_net::http::Request::post("/api/auth/login"), &payload).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, name);
        unavailable()
    }
}

/// Fetch the currently authenticated user from `/api/auth/me`.
/// Returns `None` if not authenticated or on the server.
pub async fn fetch_current_user() -> Option<User> {
    #[cfg(feature = "hydrate")]
    {
        get_json::<User>("session", "/api/auth/me").await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Log out the current user by calling `POST /api/auth/logout`.
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        let _ = gloo_net::http::Request::post("/api/auth/logout").send().await;
    }
}

// =============================================================================
// USERS (admin)
// =============================================================================

/// # Errors
///
/// Returns an error string if the request fails or the caller is not an admin.
pub async fn fetch_users() -> Result<Vec<User>, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json("load users", "/api/users").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        unavailable()
    }
}

/// # Errors
///
/// Returns an error string on a failed request or a duplicate email (409).
pub async fn create_user(user: &NewUser) -> Result<User, String> {
    #[cfg(feature = "hydrate")]
    {
        send_json("add user", gloo_net::http::Request::post("/api/users"), user).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = user;
        unavailable()
    }
}

/// # Errors
///
/// Returns an error string if the request fails or the user is unknown.
pub async fn update_user_role(id: &str, role: Role) -> Result<User, String> {
    #[cfg(feature = "hydrate")]
    {
        let url = format!("{}/role", user_endpoint(id));
        let payload = serde_json::json!({ "role": role });
        send_json("change role", gloo_net::http::Request::patch(&url), &payload).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, role);
        unavailable()
    }
}

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn delete_user(id: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        send_empty("delete user", gloo_net::http::Request::delete(&user_endpoint(id))).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        unavailable()
    }
}

// =============================================================================
// POSTS
// =============================================================================

/// Newest-first Spark Posts. Empty on failure or on the server.
pub async fn fetch_posts() -> Vec<BlogPost> {
    #[cfg(feature = "hydrate")]
    {
        get_json("load posts", "/api/posts").await.unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Vec::new()
    }
}

/// # Errors
///
/// Returns an error string if the request fails or validation rejects the draft.
pub async fn create_post(draft: &PostDraft) -> Result<BlogPost, String> {
    #[cfg(feature = "hydrate")]
    {
        send_json("publish post", gloo_net::http::Request::post("/api/posts"), draft).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = draft;
        unavailable()
    }
}

/// # Errors
///
/// Returns an error string if the request fails or the post is gone.
pub async fn update_post(id: &str, draft: &PostDraft) -> Result<BlogPost, String> {
    #[cfg(feature = "hydrate")]
    {
        send_json("update post", gloo_net::http::Request::put(&post_endpoint(id)), draft).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, draft);
        unavailable()
    }
}

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn delete_post(id: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        send_empty("delete post", gloo_net::http::Request::delete(&post_endpoint(id))).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        unavailable()
    }
}

/// # Errors
///
/// Returns an error string if the request fails or the caller is signed out.
pub async fn like_post(id: &str) -> Result<BlogPost, String> {
    #[cfg(feature = "hydrate")]
    {
        let url = format!("{}/like", post_endpoint(id));
        let resp = gloo_net::http::Request::post(&url)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        read_json("like", resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        unavailable()
    }
}

// =============================================================================
// RESOURCES
// =============================================================================

/// Subject-grouped resource library. Empty on failure or on the server.
pub async fn fetch_resources() -> Vec<ResourceCategory> {
    #[cfg(feature = "hydrate")]
    {
        get_json("load resources", "/api/resources").await.unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Vec::new()
    }
}

/// # Errors
///
/// Returns an error string if the request fails or validation rejects the draft.
pub async fn create_resource(draft: &ResourceDraft) -> Result<PlacedResource, String> {
    #[cfg(feature = "hydrate")]
    {
        send_json("add resource", gloo_net::http::Request::post("/api/resources"), draft).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = draft;
        unavailable()
    }
}

/// Save an edited resource, moving it out of `original_category` when the
/// draft's category differs.
///
/// # Errors
///
/// Returns an error string if the request fails or the item is gone.
pub async fn update_resource(id: &str, draft: &ResourceDraft, original_category: Subject) -> Result<PlacedResource, String> {
    #[cfg(feature = "hydrate")]
    {
        let body = super::types::ResourceUpdate { draft, original_category };
        send_json("update resource", gloo_net::http::Request::put(&resource_endpoint(id)), &body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, draft, original_category);
        unavailable()
    }
}

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn delete_resource(id: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        send_empty("delete resource", gloo_net::http::Request::delete(&resource_endpoint(id))).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        unavailable()
    }
}

/// Count a download and return the updated item.
///
/// # Errors
///
/// Returns an error string if the request fails or the item is gone.
pub async fn record_download(id: &str) -> Result<ResourceItem, String> {
    #[cfg(feature = "hydrate")]
    {
        let url = format!("{}/download", resource_endpoint(id));
        let resp = gloo_net::http::Request::post(&url)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        read_json("download", resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        unavailable()
    }
}

/// Platform counters from `/api/stats`.
pub async fn fetch_stats() -> Option<CatalogStats> {
    #[cfg(feature = "hydrate")]
    {
        get_json("load stats", "/api/stats").await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

// =============================================================================
// AI
// =============================================================================

/// Ask the lesson tutor.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn ask_tutor(history: &[ChatTurn], message: &str, context: Option<&str>) -> Result<TextReply, String> {
    #[cfg(feature = "hydrate")]
    {
        let body = super::types::TutorRequest { history, message, context };
        send_json("tutor", gloo_net::http::Request::post("/api/ai/tutor"), &body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (history, message, context);
        unavailable()
    }
}

/// Analyze an uploaded image given as a `data:` URL.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn analyze_image(image: &str, prompt: Option<&str>) -> Result<TextReply, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "image": image, "prompt": prompt });
        send_json("analyze image", gloo_net::http::Request::post("/api/ai/analyze-image"), &payload).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (image, prompt);
        unavailable()
    }
}

/// Analyze an uploaded video given as a `data:` URL.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn analyze_video(video: &str, mime_type: &str, prompt: Option<&str>) -> Result<TextReply, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "video": video, "mimeType": mime_type, "prompt": prompt });
        send_json("analyze video", gloo_net::http::Request::post("/api/ai/analyze-video"), &payload).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (video, mime_type, prompt);
        unavailable()
    }
}

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn search(query: &str) -> Result<SearchReply, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "query": query });
        send_json("search", gloo_net::http::Request::post("/api/ai/search"), &payload).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = query;
        unavailable()
    }
}

/// # Errors
///
/// Returns an error string if the request fails.
pub async fn generate_image(prompt: &str) -> Result<ImageReply, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "prompt": prompt });
        send_json("generate image", gloo_net::http::Request::post("/api/ai/generate-image"), &payload).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = prompt;
        unavailable()
    }
}

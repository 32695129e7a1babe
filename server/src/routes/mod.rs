//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the REST API, the Live Tutor websocket, and Leptos SSR
//! under a single Axum router. The SPA uses hash routes, so the server only
//! ever renders `/`; everything else under `/api` is JSON.

pub mod ai;
pub mod auth;
pub mod live;
pub mod posts;
pub mod resources;
pub mod stats;
pub mod users;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, patch, post, put};
use catalog::CatalogError;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Map catalog failures onto HTTP statuses.
pub(crate) fn catalog_error_to_status(err: &CatalogError) -> StatusCode {
    match err {
        CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
        CatalogError::Invalid(_) => StatusCode::BAD_REQUEST,
        CatalogError::Duplicate(_) => StatusCode::CONFLICT,
        CatalogError::Corrupt(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// REST API and websocket routes.
pub(crate) fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route("/api/users/{id}", axum::routing::delete(users::delete_user))
        .route("/api/users/{id}/role", patch(users::update_role))
        .route("/api/posts", get(posts::list_posts).post(posts::create_post))
        .route("/api/posts/{id}", put(posts::update_post).delete(posts::delete_post))
        .route("/api/posts/{id}/like", post(posts::like_post))
        .route("/api/resources", get(resources::list_resources).post(resources::create_resource))
        .route(
            "/api/resources/{id}",
            put(resources::update_resource).delete(resources::delete_resource),
        )
        .route("/api/resources/{id}/download", post(resources::download_resource))
        .route("/api/stats", get(stats::stats))
        .route("/api/ai/tutor", post(ai::tutor))
        .route("/api/ai/analyze-image", post(ai::analyze_image))
        .route("/api/ai/analyze-video", post(ai::analyze_video))
        .route("/api/ai/search", post(ai::search))
        .route("/api/ai/generate-image", post(ai::generate_image))
        .route("/api/live", get(live::handle_live))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Leptos SSR frontend: API routes + the SPA shell + static `/pkg` assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[[workspace.metadata.leptos]]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    // Serve Leptos static assets (WASM, CSS, JS) from the site root /pkg directory.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

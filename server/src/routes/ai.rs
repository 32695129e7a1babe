//! AI routes. Every endpoint answers 200; failures carry `fallback: true`.

use axum::extract::State;
use axum::response::Json;

use super::auth::AuthUser;
use crate::services::ai::{
    self, AnalyzeImageRequest, AnalyzeVideoRequest, GenerateImageRequest, ImageReply, SearchReply, SearchRequest,
    TextReply, TutorRequest,
};
use crate::state::AppState;

/// `POST /api/ai/tutor`
pub async fn tutor(State(state): State<AppState>, auth: AuthUser, Json(req): Json<TutorRequest>) -> Json<TextReply> {
    Json(ai::tutor(&state, &auth.user.id, req).await)
}

/// `POST /api/ai/analyze-image`
pub async fn analyze_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AnalyzeImageRequest>,
) -> Json<TextReply> {
    Json(ai::analyze_image(&state, &auth.user.id, req).await)
}

/// `POST /api/ai/analyze-video`
pub async fn analyze_video(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AnalyzeVideoRequest>,
) -> Json<TextReply> {
    Json(ai::analyze_video(&state, &auth.user.id, req).await)
}

/// `POST /api/ai/search`
pub async fn search(State(state): State<AppState>, auth: AuthUser, Json(req): Json<SearchRequest>) -> Json<SearchReply> {
    Json(ai::search(&state, &auth.user.id, req).await)
}

/// `POST /api/ai/generate-image`
pub async fn generate_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<GenerateImageRequest>,
) -> Json<ImageReply> {
    Json(ai::generate_image(&state, &auth.user.id, req).await)
}

#[cfg(test)]
#[path = "ai_test.rs"]
mod tests;

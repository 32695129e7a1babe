use super::*;
use crate::state::test_helpers;

async fn signed_in(state: &AppState) -> AuthUser {
    AuthUser { user: test_helpers::seed_admin(state).await, token: "t".into() }
}

#[tokio::test]
async fn tutor_route_returns_fallback_without_provider() {
    let state = test_helpers::test_app_state();
    let auth = signed_in(&state).await;
    let req: TutorRequest = serde_json::from_value(serde_json::json!({
        "history": [{"role": "model", "text": "Hello!"}],
        "message": "Explain osmosis",
        "context": "Cell transport"
    }))
    .unwrap();
    let Json(reply) = tutor(State(state), auth, Json(req)).await;
    assert!(reply.fallback);
    assert_eq!(reply.text, ai::TUTOR_FALLBACK);
}

#[tokio::test]
async fn video_request_reads_camel_case_mime_type() {
    let req: AnalyzeVideoRequest = serde_json::from_value(serde_json::json!({
        "video": "data:video/mp4;base64,AAAA",
        "mimeType": "video/mp4",
        "prompt": ""
    }))
    .unwrap();
    assert_eq!(req.mime_type.as_deref(), Some("video/mp4"));

    let state = test_helpers::test_app_state();
    let auth = signed_in(&state).await;
    let Json(reply) = analyze_video(State(state), auth, Json(req)).await;
    assert_eq!(reply.text, ai::VIDEO_FALLBACK);
}

#[tokio::test]
async fn search_fallback_serializes_empty_sources() {
    let state = test_helpers::test_app_state();
    let auth = signed_in(&state).await;
    let Json(reply) = search(State(state), auth, Json(SearchRequest { query: "DNA".into() })).await;
    let value = serde_json::to_value(&reply).unwrap();
    assert_eq!(value, serde_json::json!({"text": "Search disabled.", "sources": [], "fallback": true}));
}

#[tokio::test]
async fn generate_image_fallback_is_null_image() {
    let state = test_helpers::test_app_state();
    let auth = signed_in(&state).await;
    let Json(reply) = generate_image(State(state), auth, Json(GenerateImageRequest { prompt: "heart".into() })).await;
    assert_eq!(reply.image, None);
    assert!(reply.fallback);
}

#[tokio::test]
async fn analyze_image_fallback_text() {
    let state = test_helpers::test_app_state();
    let auth = signed_in(&state).await;
    let req = AnalyzeImageRequest { image: "data:image/png;base64,AAAA".into(), prompt: None };
    let Json(reply) = analyze_image(State(state), auth, Json(req)).await;
    assert_eq!(reply.text, ai::IMAGE_FALLBACK);
}

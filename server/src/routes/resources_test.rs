use super::*;
use crate::state::test_helpers;
use catalog::{ResourceKind, Role};

async fn creator(state: &AppState) -> AuthUser {
    AuthUser { user: test_helpers::seed_user(state, "c", Role::ContentCreator).await, token: "c".into() }
}

fn draft(category: Subject, url: &str) -> ResourceDraft {
    ResourceDraft {
        title: "Organic reactions chart".into(),
        kind: ResourceKind::Image,
        size: "2 MB".into(),
        category,
        url: Some(url.into()),
        description: None,
    }
}

#[test]
fn update_body_reads_original_category() {
    let raw = r#"{"title":"t","type":"link","size":"","category":"ICT","url":"https://x.lk","originalCategory":"Physics"}"#;
    let body: ResourceUpdate = serde_json::from_str(raw).unwrap();
    assert_eq!(body.original_category, Subject::Physics);
    assert_eq!(body.draft.category, Subject::Ict);
    assert_eq!(body.draft.kind, ResourceKind::Link);
}

#[tokio::test]
async fn missing_url_is_bad_request() {
    let state = test_helpers::test_app_state();
    let auth = creator(&state).await;
    let result = create_resource(State(state), auth, Json(draft(Subject::Chemistry, "  "))).await;
    assert_eq!(result.err(), Some(StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn create_then_move_subject() {
    let state = test_helpers::test_app_state();
    let auth = creator(&state).await;
    let (status, Json(created)) =
        create_resource(State(state.clone()), auth, Json(draft(Subject::Chemistry, "https://x.lk/c.png")))
            .await
            .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.category, Subject::Chemistry);

    let auth = AuthUser { user: test_helpers::seed_user(&state, "c2", Role::Admin).await, token: "c2".into() };
    let body = ResourceUpdate {
        draft: draft(Subject::Biology, "https://x.lk/c.png"),
        original_category: Subject::Chemistry,
    };
    let Json(moved) = update_resource(State(state.clone()), auth, Path(created.item.id.clone()), Json(body))
        .await
        .unwrap();
    assert_eq!(moved.category, Subject::Biology);

    let Json(resources) = list_resources(State(state)).await;
    let bio = resources.iter().find(|c| c.category == Subject::Biology).unwrap();
    assert_eq!(bio.items.last().unwrap().id, created.item.id);
}

#[tokio::test]
async fn update_with_wrong_original_category_is_not_found() {
    let state = test_helpers::test_app_state();
    let auth = creator(&state).await;
    let body = ResourceUpdate { draft: draft(Subject::Ict, "https://x.lk"), original_category: Subject::Physics };
    // r1 is a Biology resource.
    let result = update_resource(State(state), auth, Path("r1".into()), Json(body)).await;
    assert_eq!(result.err(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn download_is_public_and_counts() {
    let state = test_helpers::test_app_state();
    let before = state.catalog.read().await.catalog.find_resource("r2").unwrap().1.downloads;
    let Json(item) = download_resource(State(state), Path("r2".into())).await.unwrap();
    assert_eq!(item.downloads, before + 1);
}

#[tokio::test]
async fn download_unknown_is_not_found() {
    let state = test_helpers::test_app_state();
    let result = download_resource(State(state), Path("missing".into())).await;
    assert_eq!(result.err(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn student_cannot_delete() {
    let state = test_helpers::test_app_state();
    let auth = AuthUser { user: test_helpers::seed_user(&state, "s", Role::Student).await, token: "s".into() };
    assert_eq!(delete_resource(State(state), auth, Path("r1".into())).await, Err(StatusCode::FORBIDDEN));
}

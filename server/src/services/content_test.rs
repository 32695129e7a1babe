use super::*;
use crate::state::test_helpers;

fn draft_post(title: &str) -> PostDraft {
    PostDraft {
        title: title.into(),
        content: "Mitochondria make ATP.".into(),
        subject: Subject::Biology,
        image_url: Some("   ".into()),
    }
}

fn draft_resource(category: Subject) -> ResourceDraft {
    ResourceDraft {
        title: "Past paper 2023".into(),
        kind: ResourceKind::Pdf,
        size: "  ".into(),
        category,
        url: Some("https://example.lk/paper.pdf".into()),
        description: Some(String::new()),
    }
}

// =============================================================================
// helpers
// =============================================================================

#[test]
fn today_is_iso_date() {
    let date = today();
    assert_eq!(date.len(), 10);
    assert_eq!(&date[4..5], "-");
    assert_eq!(&date[7..8], "-");
}

#[test]
fn new_id_is_uuid() {
    assert!(Uuid::parse_str(&new_id()).is_ok());
}

// =============================================================================
// users
// =============================================================================

#[tokio::test]
async fn create_user_marks_users_dirty() {
    let state = test_helpers::test_app_state();
    let user = create_user(
        &state,
        NewUser { name: " Kamal ".into(), email: "kamal@knix.lk".into(), role: Role::ContentCreator },
    )
    .await
    .unwrap();
    assert_eq!(user.name, "Kamal");
    assert_eq!(user.joined_date, today());
    assert!(state.catalog.read().await.is_dirty(Collection::Users));
}

#[tokio::test]
async fn create_user_rejects_taken_email() {
    let state = test_helpers::test_app_state();
    let err = create_user(&state, NewUser { name: "Copy".into(), email: "ADMIN@knix.lk".into(), role: Role::Student })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Duplicate(_)));
    assert!(!state.catalog.read().await.is_dirty(Collection::Users));
}

#[tokio::test]
async fn remove_unknown_user_does_not_mark_dirty() {
    let state = test_helpers::test_app_state();
    assert!(!remove_user(&state, "missing").await);
    assert!(!state.catalog.read().await.is_dirty(Collection::Users));
}

#[tokio::test]
async fn set_user_role_updates_record() {
    let state = test_helpers::test_app_state();
    let user = test_helpers::seed_user(&state, "s1", Role::Student).await;
    let updated = set_user_role(&state, &user.id, Role::ContentCreator).await.unwrap();
    assert_eq!(updated.role, Role::ContentCreator);
}

// =============================================================================
// posts
// =============================================================================

#[tokio::test]
async fn create_post_goes_to_head_with_zero_likes() {
    let state = test_helpers::test_app_state();
    let post = create_post(&state, draft_post("Cell energy"), "Author A").await.unwrap();
    assert_eq!(post.likes, 0);
    assert_eq!(post.author, "Author A");
    assert_eq!(post.image_url, None);
    assert_eq!(list_posts(&state).await[0].id, post.id);
}

#[tokio::test]
async fn create_post_rejects_blank_title() {
    let state = test_helpers::test_app_state();
    let err = create_post(&state, draft_post("  "), "A").await.unwrap_err();
    assert!(matches!(err, CatalogError::Invalid(_)));
}

#[tokio::test]
async fn edit_post_keeps_author_date_and_likes() {
    let state = test_helpers::test_app_state();
    like_post(&state, "p1").await.unwrap();
    let before = state.catalog.read().await.catalog.find_post("p1").cloned().unwrap();

    let edited = edit_post(&state, "p1", draft_post("Renamed")).await.unwrap();
    assert_eq!(edited.title, "Renamed");
    assert_eq!(edited.author, before.author);
    assert_eq!(edited.date, before.date);
    assert_eq!(edited.likes, before.likes);
}

#[tokio::test]
async fn edit_unknown_post_is_not_found() {
    let state = test_helpers::test_app_state();
    let err = edit_post(&state, "nope", draft_post("x")).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { kind: "post", .. }));
}

// =============================================================================
// resources
// =============================================================================

#[tokio::test]
async fn create_resource_defaults_size_and_counts() {
    let state = test_helpers::test_app_state();
    let (category, item) = create_resource(&state, draft_resource(Subject::Ict), "Creator").await.unwrap();
    assert_eq!(category, Subject::Ict);
    assert_eq!(item.size, DEFAULT_RESOURCE_SIZE);
    assert_eq!(item.downloads, 0);
    assert_eq!(item.description, None);
    assert_eq!(item.author.as_deref(), Some("Creator"));

    let resources = list_resources(&state).await;
    let last = resources.last().unwrap();
    assert_eq!(last.category, Subject::Ict);
    assert_eq!(last.items[0].id, item.id);
}

#[tokio::test]
async fn edit_resource_moves_between_subjects_and_keeps_downloads() {
    let state = test_helpers::test_app_state();
    let (_, item) = create_resource(&state, draft_resource(Subject::Biology), "Creator").await.unwrap();
    record_download(&state, &item.id).await.unwrap();

    let (category, moved) = edit_resource(&state, &item.id, draft_resource(Subject::Physics), Subject::Biology)
        .await
        .unwrap();
    assert_eq!(category, Subject::Physics);
    assert_eq!(moved.downloads, 1);

    let guard = state.catalog.read().await;
    assert!(guard.catalog.resources_for(Subject::Biology).iter().all(|i| i.id != item.id));
    assert_eq!(guard.catalog.resources_for(Subject::Physics).last().unwrap().id, item.id);
}

#[tokio::test]
async fn edit_unknown_resource_is_not_found() {
    let state = test_helpers::test_app_state();
    let err = edit_resource(&state, "missing", draft_resource(Subject::Physics), Subject::Physics)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }));
}

#[tokio::test]
async fn record_download_increments_seed_item() {
    let state = test_helpers::test_app_state();
    let before = state.catalog.read().await.catalog.find_resource("r1").unwrap().1.downloads;
    let item = record_download(&state, "r1").await.unwrap();
    assert_eq!(item.downloads, before + 1);
    assert!(state.catalog.read().await.is_dirty(Collection::Resources));
}

#[tokio::test]
async fn remove_resource_is_idempotent() {
    let state = test_helpers::test_app_state();
    assert!(remove_resource(&state, "r1").await);
    assert!(!remove_resource(&state, "r1").await);
}

#[tokio::test]
async fn stats_reflect_seed() {
    let state = test_helpers::test_app_state();
    let stats = stats(&state).await;
    assert_eq!(stats.users, 1);
    assert_eq!(stats.posts, 3);
    assert_eq!(stats.resources, 8);
}

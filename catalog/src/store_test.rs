use super::*;
use crate::records::ResourceKind;

fn post(id: &str, subject: Subject) -> BlogPost {
    BlogPost {
        id: id.into(),
        title: format!("Post {id}"),
        content: "notes".into(),
        subject,
        author: "K.Sithara".into(),
        date: "2025-03-01".into(),
        image_url: None,
        likes: 0,
    }
}

fn resource(id: &str) -> ResourceItem {
    ResourceItem {
        id: id.into(),
        title: format!("Paper {id}"),
        kind: ResourceKind::Pdf,
        size: "1 MB".into(),
        downloads: 0,
        url: Some(format!("https://files.example.lk/{id}.pdf")),
        description: None,
        author: None,
    }
}

fn user(id: &str, email: &str) -> User {
    User {
        id: id.into(),
        name: format!("User {id}"),
        email: email.into(),
        role: Role::Student,
        joined_date: "2025-03-01".into(),
    }
}

// =============================================================================
// collections
// =============================================================================

#[test]
fn collection_keys_are_fixed() {
    assert_eq!(Collection::Users.key(), "knix_users_db");
    assert_eq!(Collection::Posts.key(), "knix_posts_db");
    assert_eq!(Collection::Resources.key(), "knix_resources_db");
    assert_eq!(Collection::from_key("knix_posts_db"), Some(Collection::Posts));
    assert_eq!(Collection::from_key("other"), None);
}

#[test]
fn seeded_catalog_has_initial_data() {
    let catalog = Catalog::seeded();
    assert_eq!(catalog.users().len(), 1);
    assert_eq!(catalog.users()[0].role, Role::Admin);
    assert_eq!(catalog.posts().len(), 3);
    assert_eq!(catalog.resources().len(), 4);
    assert_eq!(catalog.resources()[1].category, Subject::CombinedMaths);
    assert_eq!(catalog.stats().resources, 8);
}

// =============================================================================
// users
// =============================================================================

#[test]
fn add_user_appends() {
    let mut catalog = Catalog::seeded();
    catalog.add_user(user("u2", "nimal@example.lk")).unwrap();
    assert_eq!(catalog.users().last().unwrap().id, "u2");
}

#[test]
fn add_user_rejects_duplicate_email_case_insensitive() {
    let mut catalog = Catalog::seeded();
    let err = catalog.add_user(user("u2", "ADMIN@knix.lk")).unwrap_err();
    assert!(matches!(err, CatalogError::Duplicate(_)));
    assert_eq!(catalog.users().len(), 1);
}

#[test]
fn add_user_rejects_duplicate_id_and_blank_fields() {
    let mut catalog = Catalog::seeded();
    assert!(matches!(catalog.add_user(user("u1", "x@y.lk")), Err(CatalogError::Duplicate(_))));
    let mut blank = user("u3", "  ");
    assert!(matches!(catalog.add_user(blank.clone()), Err(CatalogError::Invalid(_))));
    blank.email = "ok@y.lk".into();
    blank.name = String::new();
    assert!(matches!(catalog.add_user(blank), Err(CatalogError::Invalid(_))));
}

#[test]
fn find_user_by_email_ignores_case_and_whitespace() {
    let catalog = Catalog::seeded();
    assert_eq!(catalog.find_user_by_email(" Admin@Knix.LK ").unwrap().id, "u1");
    assert!(catalog.find_user_by_email("nobody@knix.lk").is_none());
}

#[test]
fn update_user_role_sets_role_or_reports_missing() {
    let mut catalog = Catalog::seeded();
    catalog.add_user(user("u2", "s@knix.lk")).unwrap();
    let updated = catalog.update_user_role("u2", Role::ContentCreator).unwrap();
    assert_eq!(updated.role, Role::ContentCreator);

    let before = catalog.clone();
    let err = catalog.update_user_role("missing", Role::Admin).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { kind: "user", .. }));
    assert_eq!(catalog, before);
}

#[test]
fn delete_user_is_idempotent() {
    let mut catalog = Catalog::seeded();
    catalog.add_user(user("u2", "s@knix.lk")).unwrap();
    assert!(catalog.delete_user("u2"));
    assert!(!catalog.delete_user("u2"));
    assert_eq!(catalog.users().len(), 1);
}

// =============================================================================
// posts
// =============================================================================

#[test]
fn add_post_inserts_at_head() {
    let mut catalog = Catalog::seeded();
    catalog.add_post(post("p9", Subject::Ict)).unwrap();
    assert_eq!(catalog.posts()[0].id, "p9");
    assert_eq!(catalog.posts()[1].id, "p1");
}

#[test]
fn add_post_requires_title_and_content() {
    let mut catalog = Catalog::default();
    let mut p = post("p9", Subject::Ict);
    p.title = "   ".into();
    assert!(matches!(catalog.add_post(p.clone()), Err(CatalogError::Invalid(_))));
    p.title = "ok".into();
    p.content = String::new();
    assert!(matches!(catalog.add_post(p), Err(CatalogError::Invalid(_))));
    assert!(catalog.posts().is_empty());
}

#[test]
fn update_post_replaces_in_place() {
    let mut catalog = Catalog::seeded();
    let mut p2 = catalog.find_post("p2").unwrap().clone();
    p2.title = "Op-Amps revised".into();
    catalog.update_post(p2).unwrap();
    assert_eq!(catalog.posts()[1].title, "Op-Amps revised");
    assert_eq!(catalog.posts().len(), 3);
}

#[test]
fn update_unknown_post_leaves_catalog_unchanged() {
    let mut catalog = Catalog::seeded();
    let before = catalog.clone();
    let err = catalog.update_post(post("nope", Subject::Physics)).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { kind: "post", .. }));
    assert_eq!(catalog, before);
}

#[test]
fn delete_post_filters_by_id() {
    let mut catalog = Catalog::seeded();
    assert!(catalog.delete_post("p2"));
    assert!(!catalog.delete_post("p2"));
    let ids: Vec<_> = catalog.posts().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p3"]);
}

#[test]
fn like_post_increments() {
    let mut catalog = Catalog::seeded();
    assert_eq!(catalog.like_post("p1").unwrap().likes, 46);
    assert!(catalog.like_post("missing").is_err());
}

#[test]
fn posts_for_filters_by_subject() {
    let catalog = Catalog::seeded();
    let ids: Vec<_> = catalog.posts_for(Subject::Physics).map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p2"]);
    assert_eq!(catalog.posts_for(Subject::Ict).count(), 0);
}

// =============================================================================
// resources
// =============================================================================

#[test]
fn add_resource_appends_to_existing_bucket() {
    let mut catalog = Catalog::seeded();
    catalog.add_resource(Subject::Physics, resource("r9")).unwrap();
    let items = catalog.resources_for(Subject::Physics);
    assert_eq!(items.last().unwrap().id, "r9");
    assert_eq!(catalog.resources().len(), 4);
}

#[test]
fn add_resource_creates_bucket_at_end() {
    let mut catalog = Catalog::seeded();
    catalog.add_resource(Subject::Ict, resource("r9")).unwrap();
    let last = catalog.resources().last().unwrap();
    assert_eq!(last.category, Subject::Ict);
    assert_eq!(last.items.len(), 1);
}

#[test]
fn add_resource_requires_title_and_url() {
    let mut catalog = Catalog::default();
    let mut item = resource("r9");
    item.url = Some("  ".into());
    assert!(matches!(catalog.add_resource(Subject::Ict, item.clone()), Err(CatalogError::Invalid(_))));
    item.url = None;
    assert!(matches!(catalog.add_resource(Subject::Ict, item), Err(CatalogError::Invalid(_))));
    assert!(catalog.resources().is_empty());
}

#[test]
fn delete_resource_removes_from_any_bucket_and_keeps_bucket() {
    let mut catalog = Catalog::seeded();
    assert!(catalog.delete_resource("r5"));
    assert!(catalog.delete_resource("r6"));
    assert!(!catalog.delete_resource("r6"));
    assert!(catalog.resources_for(Subject::Physics).is_empty());
    assert!(catalog.resources().iter().any(|c| c.category == Subject::Physics));
}

#[test]
fn update_resource_same_category_replaces_in_place() {
    let mut catalog = Catalog::seeded();
    catalog.add_resource(Subject::Biology, resource("r9")).unwrap();
    let mut item = resource("r9");
    item.title = "Renamed".into();
    catalog.update_resource(item, Subject::Biology, Subject::Biology).unwrap();
    let items = catalog.resources_for(Subject::Biology);
    assert_eq!(items.len(), 3);
    assert_eq!(items[2].title, "Renamed");
}

#[test]
fn update_resource_moves_between_buckets() {
    let mut catalog = Catalog::seeded();
    catalog.add_resource(Subject::Biology, resource("r9")).unwrap();
    catalog
        .update_resource(resource("r9"), Subject::Chemistry, Subject::Biology)
        .unwrap();
    assert!(catalog.resources_for(Subject::Biology).iter().all(|i| i.id != "r9"));
    assert_eq!(catalog.resources_for(Subject::Chemistry).last().unwrap().id, "r9");
    assert_eq!(catalog.find_resource("r9").unwrap().0, Subject::Chemistry);
}

#[test]
fn update_resource_move_creates_missing_bucket() {
    let mut catalog = Catalog::seeded();
    catalog.add_resource(Subject::Physics, resource("r9")).unwrap();
    catalog.update_resource(resource("r9"), Subject::Ict, Subject::Physics).unwrap();
    let last = catalog.resources().last().unwrap();
    assert_eq!(last.category, Subject::Ict);
    assert_eq!(last.items[0].id, "r9");
}

#[test]
fn update_resource_unknown_id_is_not_found() {
    let mut catalog = Catalog::seeded();
    let before = catalog.clone();
    assert!(matches!(
        catalog.update_resource(resource("zz"), Subject::Physics, Subject::Physics),
        Err(CatalogError::NotFound { .. })
    ));
    // present, but not in the bucket the client claimed
    catalog.add_resource(Subject::Physics, resource("r9")).unwrap();
    let snapshot = catalog.clone();
    assert!(matches!(
        catalog.update_resource(resource("r9"), Subject::Ict, Subject::Biology),
        Err(CatalogError::NotFound { .. })
    ));
    assert_eq!(catalog, snapshot);
    assert_ne!(catalog, before);
}

#[test]
fn record_download_increments_counter() {
    let mut catalog = Catalog::seeded();
    let (subject, item) = catalog.record_download("r4").unwrap();
    assert_eq!(subject, Subject::CombinedMaths);
    assert_eq!(item.downloads, 3401);
    assert!(catalog.record_download("missing").is_err());
}

// =============================================================================
// stats + blobs
// =============================================================================

#[test]
fn stats_count_roles_and_subjects() {
    let mut catalog = Catalog::seeded();
    catalog.add_user(user("u2", "a@knix.lk")).unwrap();
    let stats = catalog.stats();
    assert_eq!(stats.users, 2);
    assert_eq!(stats.admins, 1);
    assert_eq!(stats.students, 1);
    assert_eq!(stats.creators, 0);
    assert_eq!(stats.likes, 45 + 32 + 89);
    assert_eq!(stats.downloads, 1240 + 850 + 1800 + 3400 + 1500 + 900 + 1100 + 2200);
    let ict = stats.subjects.iter().find(|s| s.subject == Subject::Ict).unwrap();
    assert_eq!((ict.posts, ict.resources), (0, 0));
    let bio = stats.subjects.iter().find(|s| s.subject == Subject::Biology).unwrap();
    assert_eq!((bio.posts, bio.resources), (1, 2));
}

#[test]
fn collection_blob_round_trips_through_load() {
    let source = Catalog::seeded();
    let mut target = Catalog::default();
    for collection in Collection::ALL {
        let blob = source.collection_json(collection).unwrap();
        target.load_collection(collection, blob).unwrap();
    }
    assert_eq!(target, source);
}

#[test]
fn load_collection_rejects_corrupt_blob_without_change() {
    let mut catalog = Catalog::seeded();
    let before = catalog.clone();
    let err = catalog
        .load_collection(Collection::Posts, serde_json::json!({"not": "an array"}))
        .unwrap_err();
    assert!(matches!(err, CatalogError::Corrupt(_)));
    assert_eq!(catalog, before);
}

#[test]
fn reseed_restores_one_collection() {
    let mut catalog = Catalog::default();
    catalog.reseed(Collection::Posts);
    assert_eq!(catalog.posts().len(), 3);
    assert!(catalog.users().is_empty());
}

use super::*;

#[test]
fn role_wire_values_match_serde() {
    for role in Role::ALL {
        let json = serde_json::to_string(&role).unwrap();
        assert_eq!(json, format!("\"{}\"", role.as_str()));
        assert_eq!(Role::parse(role.as_str()), Some(role));
    }
}

#[test]
fn role_parse_rejects_unknown() {
    assert_eq!(Role::parse("superuser"), None);
    assert_eq!(Role::parse(""), None);
}

#[test]
fn role_publish_permissions() {
    assert!(Role::Admin.can_publish());
    assert!(Role::ContentCreator.can_publish());
    assert!(!Role::Student.can_publish());
    assert!(Role::Admin.is_admin());
    assert!(!Role::ContentCreator.is_admin());
}

#[test]
fn subject_serializes_display_names() {
    assert_eq!(serde_json::to_string(&Subject::CombinedMaths).unwrap(), "\"Combined Maths\"");
    assert_eq!(serde_json::to_string(&Subject::Ict).unwrap(), "\"ICT\"");
    let parsed: Subject = serde_json::from_str("\"Combined Maths\"").unwrap();
    assert_eq!(parsed, Subject::CombinedMaths);
}

#[test]
fn subject_slugs_are_route_segments() {
    assert_eq!(Subject::CombinedMaths.slug(), "maths");
    assert_eq!(Subject::from_slug("maths"), Some(Subject::CombinedMaths));
    assert_eq!(Subject::from_slug("biology"), Some(Subject::Biology));
    assert_eq!(Subject::from_slug("history"), None);
}

#[test]
fn subject_parse_accepts_display_name() {
    assert_eq!(Subject::parse(" Physics "), Some(Subject::Physics));
    assert_eq!(Subject::parse("physics"), None);
    assert_eq!(Subject::Chemistry.to_string(), "Chemistry");
}

#[test]
fn user_uses_camel_case_join_date() {
    let user = User {
        id: "u9".into(),
        name: "Nimal".into(),
        email: "nimal@example.lk".into(),
        role: Role::ContentCreator,
        joined_date: "2025-01-02".into(),
    };
    let value = serde_json::to_value(&user).unwrap();
    assert_eq!(value["joinedDate"], "2025-01-02");
    assert_eq!(value["role"], "content_creator");
}

#[test]
fn post_without_image_omits_field_and_defaults_likes() {
    let raw = r#"{"id":"p","title":"t","content":"c","subject":"ICT","author":"a","date":"2025-01-01"}"#;
    let post: BlogPost = serde_json::from_str(raw).unwrap();
    assert_eq!(post.likes, 0);
    assert_eq!(post.image_url, None);
    let value = serde_json::to_value(&post).unwrap();
    assert!(value.get("imageUrl").is_none());
}

#[test]
fn note_lines_skip_blank_lines() {
    let post = BlogPost {
        id: "p".into(),
        title: "t".into(),
        content: "first\n\n  second  \n\n".into(),
        subject: Subject::Biology,
        author: "a".into(),
        date: "2025-01-01".into(),
        image_url: None,
        likes: 0,
    };
    assert_eq!(post.note_lines().collect::<Vec<_>>(), vec!["first", "second"]);
}

#[test]
fn resource_item_kind_serializes_as_type() {
    let raw = r#"{"id":"r","title":"Paper","type":"image","size":"1 MB","downloads":3}"#;
    let item: ResourceItem = serde_json::from_str(raw).unwrap();
    assert_eq!(item.kind, ResourceKind::Image);
    let value = serde_json::to_value(&item).unwrap();
    assert_eq!(value["type"], "image");
    assert!(value.get("url").is_none());
}

#[test]
fn long_description_threshold_counts_chars() {
    let mut item: ResourceItem =
        serde_json::from_str(r#"{"id":"r","title":"t","type":"pdf","size":"1 MB"}"#).unwrap();
    assert!(!item.has_long_description());
    item.description = Some("x".repeat(LONG_DESCRIPTION_CHARS));
    assert!(!item.has_long_description());
    item.description = Some("ජ".repeat(LONG_DESCRIPTION_CHARS + 1));
    assert!(item.has_long_description());
}

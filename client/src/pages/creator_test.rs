use super::*;

fn post(id: &str, title: &str) -> BlogPost {
    BlogPost {
        id: id.to_owned(),
        title: title.to_owned(),
        content: "body".to_owned(),
        subject: Subject::Chemistry,
        author: "Creator".to_owned(),
        date: "2024-02-02".to_owned(),
        image_url: None,
        likes: 0,
    }
}

fn item(id: &str, title: &str) -> ResourceItem {
    ResourceItem {
        id: id.to_owned(),
        title: title.to_owned(),
        kind: ResourceKind::Pdf,
        size: "1 MB".to_owned(),
        downloads: 7,
        url: Some("https://example.com/a.pdf".to_owned()),
        description: None,
        author: Some("Creator".to_owned()),
    }
}

#[test]
fn post_draft_requires_title_and_content() {
    assert_eq!(post_draft("  ", "body", Subject::Ict, ""), Err("Title is required."));
    assert_eq!(post_draft("Title", " \n ", Subject::Ict, ""), Err("Content is required."));
}

#[test]
fn post_draft_trims_title_and_drops_blank_image() {
    let draft = post_draft("  Redox  ", "**bold**", Subject::Chemistry, "   ").unwrap();
    assert_eq!(draft.title, "Redox");
    assert_eq!(draft.content, "**bold**");
    assert_eq!(draft.image_url, None);
    let draft = post_draft("Redox", "x", Subject::Chemistry, " https://img/x.png ").unwrap();
    assert_eq!(draft.image_url.as_deref(), Some("https://img/x.png"));
}

#[test]
fn resource_fields_require_title_and_url() {
    let mut fields = ResourceFields { category: Some(Subject::Ict), ..ResourceFields::default() };
    assert_eq!(fields.to_draft(), Err("Title is required."));
    fields.title = "Past paper".to_owned();
    assert_eq!(fields.to_draft(), Err("A file URL is required."));
    fields.url = " https://example.com/p.pdf ".to_owned();
    let draft = fields.to_draft().unwrap();
    assert_eq!(draft.url.as_deref(), Some("https://example.com/p.pdf"));
    assert_eq!(draft.size, "0 MB");
    assert_eq!(draft.category, Subject::Ict);
    assert_eq!(draft.description, None);
}

#[test]
fn resource_fields_round_trip_an_existing_item() {
    let fields = ResourceFields::from_item(Subject::Physics, &item("r1", "Waves"));
    let draft = fields.to_draft().unwrap();
    assert_eq!(draft.title, "Waves");
    assert_eq!(draft.category, Subject::Physics);
    assert_eq!(draft.size, "1 MB");
}

#[test]
fn upsert_post_inserts_new_posts_at_head() {
    let mut posts = vec![post("a", "A")];
    upsert_post(&mut posts, post("b", "B"));
    assert_eq!(posts[0].id, "b");
    upsert_post(&mut posts, post("a", "A2"));
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[1].title, "A2");
}

#[test]
fn place_resource_replaces_in_same_bucket() {
    let mut categories = vec![ResourceCategory { category: Subject::Physics, items: vec![item("r1", "Old"), item("r2", "Other")] }];
    place_resource(&mut categories, PlacedResource { category: Subject::Physics, item: item("r1", "New") });
    let titles: Vec<_> = categories[0].items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["New", "Other"]);
}

#[test]
fn place_resource_moves_item_and_creates_bucket() {
    let mut categories = vec![ResourceCategory { category: Subject::Physics, items: vec![item("r1", "Waves")] }];
    place_resource(&mut categories, PlacedResource { category: Subject::Ict, item: item("r1", "Waves") });
    assert!(categories[0].items.is_empty());
    assert_eq!(categories[1].category, Subject::Ict);
    assert_eq!(categories[1].items[0].id, "r1");
}

#[test]
fn place_resource_appends_new_item() {
    let mut categories = vec![ResourceCategory { category: Subject::Ict, items: vec![item("r1", "A")] }];
    place_resource(&mut categories, PlacedResource { category: Subject::Ict, item: item("r2", "B") });
    assert_eq!(categories[0].items.len(), 2);
    assert_eq!(categories[0].items[1].id, "r2");
}

#[test]
fn remove_resource_drops_from_any_bucket() {
    let mut categories = vec![
        ResourceCategory { category: Subject::Ict, items: vec![item("r1", "A")] },
        ResourceCategory { category: Subject::Biology, items: vec![item("r2", "B")] },
    ];
    remove_resource(&mut categories, "r2");
    assert!(categories[1].items.is_empty());
    assert_eq!(categories[0].items.len(), 1);
}

#[test]
fn delete_prompt_names_the_target() {
    let target = PendingDelete::Post { id: "a".to_owned(), title: "Redox".to_owned() };
    assert!(target.message().contains("\"Redox\""));
}

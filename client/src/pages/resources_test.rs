use super::*;
use crate::net::types::ResourceKind;

fn item(id: &str) -> ResourceItem {
    ResourceItem {
        id: id.to_owned(),
        title: id.to_owned(),
        kind: ResourceKind::Link,
        size: "-".to_owned(),
        downloads: 0,
        url: Some("https://example.com".to_owned()),
        description: None,
        author: None,
    }
}

fn library() -> Vec<ResourceCategory> {
    vec![
        ResourceCategory { category: Subject::Biology, items: vec![item("a"), item("b")] },
        ResourceCategory { category: Subject::Physics, items: Vec::new() },
        ResourceCategory { category: Subject::Ict, items: vec![item("c")] },
    ]
}

#[test]
fn all_filter_shows_every_non_empty_category() {
    let shown: Vec<_> = visible_categories(&library(), None).into_iter().map(|c| c.category).collect();
    assert_eq!(shown, [Subject::Biology, Subject::Ict]);
}

#[test]
fn subject_filter_narrows_to_one_category() {
    let shown = visible_categories(&library(), Some(Subject::Ict));
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].items[0].id, "c");
    assert!(visible_categories(&library(), Some(Subject::Physics)).is_empty());
}

#[test]
fn file_count_label_pluralises() {
    assert_eq!(file_count_label(1), "1 File");
    assert_eq!(file_count_label(0), "0 Files");
    assert_eq!(file_count_label(12), "12 Files");
}

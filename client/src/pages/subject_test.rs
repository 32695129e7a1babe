use super::*;
use crate::net::types::ResourceKind;

fn post(id: &str, subject: Subject) -> BlogPost {
    BlogPost {
        id: id.to_owned(),
        title: id.to_owned(),
        content: String::new(),
        subject,
        author: "Admin".to_owned(),
        date: "2024-01-01".to_owned(),
        image_url: None,
        likes: 0,
    }
}

fn item(id: &str, downloads: u32) -> ResourceItem {
    ResourceItem {
        id: id.to_owned(),
        title: id.to_owned(),
        kind: ResourceKind::Pdf,
        size: "1 MB".to_owned(),
        downloads,
        url: Some("https://example.com/f.pdf".to_owned()),
        description: None,
        author: None,
    }
}

#[test]
fn posts_are_filtered_by_subject_in_order() {
    let posts = vec![post("a", Subject::Physics), post("b", Subject::Ict), post("c", Subject::Physics)];
    let ids: Vec<_> = posts_for(&posts, Subject::Physics).into_iter().map(|p| p.id).collect();
    assert_eq!(ids, ["a", "c"]);
    assert!(posts_for(&posts, Subject::Biology).is_empty());
}

#[test]
fn files_come_from_the_matching_bucket_only() {
    let categories = vec![
        ResourceCategory { category: Subject::Chemistry, items: vec![item("x", 0)] },
        ResourceCategory { category: Subject::Ict, items: vec![item("y", 0), item("z", 0)] },
    ];
    assert_eq!(files_for(&categories, Subject::Ict).len(), 2);
    assert!(files_for(&categories, Subject::Biology).is_empty());
}

#[test]
fn download_update_replaces_item_counter() {
    let mut categories = vec![ResourceCategory { category: Subject::Ict, items: vec![item("y", 3)] }];
    apply_download(&mut categories, item("y", 4));
    assert_eq!(categories[0].items[0].downloads, 4);
}

#[test]
fn empty_notes_text_names_the_subject() {
    assert_eq!(empty_notes_text(Subject::CombinedMaths), "No notes published for Combined Maths yet.");
}

//! Request and response DTOs for the REST boundary.
//!
//! DESIGN
//! ======
//! Catalog records come straight from the `catalog` crate. The types here
//! mirror the server's draft and AI payloads so serde shapes stay lossless
//! in both directions.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

pub use catalog::{BlogPost, CatalogStats, ResourceCategory, ResourceItem, ResourceKind, Role, Subject, User};

// =============================================================================
// CATALOG DRAFTS
// =============================================================================

/// Body for `POST /api/users`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Body for creating or editing a Spark Post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub subject: Subject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl PostDraft {
    /// Draft prefilled from an existing post for the edit form.
    #[must_use]
    pub fn from_post(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            subject: post.subject,
            image_url: post.image_url.clone(),
        }
    }
}

/// Body for creating or editing a resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResourceDraft {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub size: String,
    pub category: Subject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ResourceDraft {
    #[must_use]
    pub fn from_item(category: Subject, item: &ResourceItem) -> Self {
        Self {
            title: item.title.clone(),
            kind: item.kind,
            size: item.size.clone(),
            category,
            url: item.url.clone(),
            description: item.description.clone(),
        }
    }
}

/// Body for `PUT /api/resources/{id}`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUpdate<'a> {
    #[serde(flatten)]
    pub draft: &'a ResourceDraft,
    pub original_category: Subject,
}

/// Response of `POST /api/resources`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PlacedResource {
    pub category: Subject,
    pub item: ResourceItem,
}

// =============================================================================
// AI
// =============================================================================

/// One entry in the lesson chat transcript.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// `user` or `model`.
    pub role: String,
    pub text: String,
}

impl ChatTurn {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: "user".to_owned(), text: text.into() }
    }

    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self { role: "model".to_owned(), text: text.into() }
    }

    #[must_use]
    pub fn is_user(&self) -> bool {
        self.role == "user"
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct TutorRequest<'a> {
    pub history: &'a [ChatTurn],
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<&'a str>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TextReply {
    pub text: String,
    #[serde(default)]
    pub fallback: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SearchReply {
    pub text: String,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub fallback: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ImageReply {
    pub image: Option<String>,
    #[serde(default)]
    pub fallback: bool,
}

//! Record types for the three stored collections.
//!
//! Field names serialize in the camelCase shape the browser client and the
//! stored JSON blobs share (`joinedDate`, `imageUrl`, `type`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Descriptions longer than this are collapsed behind "Read More".
pub const LONG_DESCRIPTION_CHARS: usize = 80;

// =============================================================================
// ROLE
// =============================================================================

/// Access level of a platform user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Student,
    Admin,
    ContentCreator,
}

impl Role {
    pub const ALL: [Self; 3] = [Self::Student, Self::ContentCreator, Self::Admin];

    /// Wire value, matching the serde representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Admin => "admin",
            Self::ContentCreator => "content_creator",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "student" => Some(Self::Student),
            "admin" => Some(Self::Admin),
            "content_creator" => Some(Self::ContentCreator),
            _ => None,
        }
    }

    /// Human label used in role selectors.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Admin => "Admin",
            Self::ContentCreator => "Content Creator",
        }
    }

    /// Whether this role may create, edit, or delete posts and resources.
    #[must_use]
    pub fn can_publish(self) -> bool {
        matches!(self, Self::Admin | Self::ContentCreator)
    }

    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

// =============================================================================
// SUBJECT
// =============================================================================

/// A/L subject used to group posts and resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Subject {
    Biology,
    Physics,
    Chemistry,
    #[serde(rename = "Combined Maths")]
    CombinedMaths,
    #[serde(rename = "ICT")]
    Ict,
}

impl Subject {
    pub const ALL: [Self; 5] = [Self::Biology, Self::Physics, Self::Chemistry, Self::CombinedMaths, Self::Ict];

    /// Display name, identical to the serialized value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Biology => "Biology",
            Self::Physics => "Physics",
            Self::Chemistry => "Chemistry",
            Self::CombinedMaths => "Combined Maths",
            Self::Ict => "ICT",
        }
    }

    /// Route segment for the subject page (`/maths` for Combined Maths).
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Biology => "biology",
            Self::Physics => "physics",
            Self::Chemistry => "chemistry",
            Self::CombinedMaths => "maths",
            Self::Ict => "ict",
        }
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }

    /// Parse a display name as sent by form selects.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// USER
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Join date as `YYYY-MM-DD`.
    pub joined_date: String,
}

// =============================================================================
// BLOG POST
// =============================================================================

/// A Spark Post: a short study-notes entry for one subject.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    /// Markdown / plain text body.
    pub content: String,
    pub subject: Subject,
    pub author: String,
    /// Publish date as `YYYY-MM-DD`.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub likes: u32,
}

impl BlogPost {
    /// Non-empty content lines, used as the lesson notes list.
    pub fn note_lines(&self) -> impl Iterator<Item = &str> {
        self.content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }
}

// =============================================================================
// RESOURCES
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    #[default]
    Pdf,
    Image,
    Link,
}

impl ResourceKind {
    pub const ALL: [Self; 3] = [Self::Pdf, Self::Image, Self::Link];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::Link => "link",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == raw.trim())
    }
}

/// A downloadable study document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceItem {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    /// Display size such as `"4.2 MB"`.
    pub size: String,
    #[serde(default)]
    pub downloads: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl ResourceItem {
    /// Whether the description is long enough to be collapsed in listings.
    #[must_use]
    pub fn has_long_description(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|d| d.chars().count() > LONG_DESCRIPTION_CHARS)
    }
}

/// Resource items grouped under one subject.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCategory {
    pub category: Subject,
    pub items: Vec<ResourceItem>,
}

#[cfg(test)]
#[path = "records_test.rs"]
mod tests;

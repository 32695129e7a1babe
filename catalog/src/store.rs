//! In-memory collections and the read-modify-write operations over them.
//!
//! DESIGN
//! ======
//! A [`Catalog`] is the authoritative copy of the three collections. Every
//! operation mutates one collection and leaves the other two alone, so the
//! caller can track dirtiness per [`Collection`] and persist each as a
//! whole-array JSON blob under its fixed key.
//!
//! ORDERING
//! ========
//! - Users append at the end.
//! - Posts insert at the head, so `posts()` is newest first.
//! - Resource buckets keep their stored order; a new subject bucket is
//!   appended at the end and buckets emptied by a move are kept.

use serde::{Deserialize, Serialize};

use crate::records::{BlogPost, ResourceCategory, ResourceItem, Role, Subject, User};
use crate::seed;

// =============================================================================
// COLLECTIONS
// =============================================================================

/// One of the three independently stored collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Posts,
    Resources,
}

impl Collection {
    pub const ALL: [Self; 3] = [Self::Users, Self::Posts, Self::Resources];

    /// Storage key for the collection blob.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Users => "knix_users_db",
            Self::Posts => "knix_posts_db",
            Self::Resources => "knix_resources_db",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("invalid {0}")]
    Invalid(String),
    #[error("duplicate {0}")]
    Duplicate(String),
    #[error("corrupt collection: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl CatalogError {
    #[must_use]
    pub fn not_found(kind: &'static str, id: &str) -> Self {
        Self::NotFound { kind, id: id.to_owned() }
    }
}

// =============================================================================
// STATS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectStats {
    pub subject: Subject,
    pub posts: usize,
    pub resources: usize,
}

/// Platform counters shown on the dashboards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub users: usize,
    pub students: usize,
    pub creators: usize,
    pub admins: usize,
    pub posts: usize,
    pub likes: u64,
    pub resources: usize,
    pub downloads: u64,
    pub subjects: Vec<SubjectStats>,
}

// =============================================================================
// CATALOG
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    users: Vec<User>,
    posts: Vec<BlogPost>,
    resources: Vec<ResourceCategory>,
}

impl Catalog {
    #[must_use]
    pub fn new(users: Vec<User>, posts: Vec<BlogPost>, resources: Vec<ResourceCategory>) -> Self {
        Self { users, posts, resources }
    }

    /// Catalog holding the initial seed data for every collection.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(seed::seed_users(), seed::seed_posts(), seed::seed_resources())
    }

    /// Replace one collection with the seed data.
    pub fn reseed(&mut self, collection: Collection) {
        match collection {
            Collection::Users => self.users = seed::seed_users(),
            Collection::Posts => self.posts = seed::seed_posts(),
            Collection::Resources => self.resources = seed::seed_resources(),
        }
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    #[must_use]
    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Case-insensitive email lookup.
    #[must_use]
    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        let email = email.trim();
        self.users.iter().find(|u| u.email.eq_ignore_ascii_case(email))
    }

    /// Append a user.
    ///
    /// # Errors
    ///
    /// `Invalid` for a blank name or email, `Duplicate` when the id or email
    /// is already taken.
    pub fn add_user(&mut self, user: User) -> Result<&User, CatalogError> {
        if user.name.trim().is_empty() || user.email.trim().is_empty() {
            return Err(CatalogError::Invalid("user: name and email are required".into()));
        }
        if self.find_user(&user.id).is_some() {
            return Err(CatalogError::Duplicate(format!("user id {}", user.id)));
        }
        if self.find_user_by_email(&user.email).is_some() {
            return Err(CatalogError::Duplicate(format!("email {}", user.email)));
        }
        self.users.push(user);
        Ok(&self.users[self.users.len() - 1])
    }

    /// # Errors
    ///
    /// `NotFound` when no user has this id.
    pub fn update_user_role(&mut self, id: &str, role: Role) -> Result<&User, CatalogError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| CatalogError::not_found("user", id))?;
        user.role = role;
        Ok(&*user)
    }

    /// Remove a user. Returns whether anything was removed.
    pub fn delete_user(&mut self, id: &str) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        self.users.len() != before
    }

    // -------------------------------------------------------------------------
    // Posts
    // -------------------------------------------------------------------------

    /// Posts, newest first.
    #[must_use]
    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    #[must_use]
    pub fn find_post(&self, id: &str) -> Option<&BlogPost> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn posts_for(&self, subject: Subject) -> impl Iterator<Item = &BlogPost> {
        self.posts.iter().filter(move |p| p.subject == subject)
    }

    /// Insert a post at the head of the list.
    ///
    /// # Errors
    ///
    /// `Invalid` when title or content is blank, `Duplicate` for a reused id.
    pub fn add_post(&mut self, post: BlogPost) -> Result<&BlogPost, CatalogError> {
        validate_post(&post)?;
        if self.find_post(&post.id).is_some() {
            return Err(CatalogError::Duplicate(format!("post id {}", post.id)));
        }
        self.posts.insert(0, post);
        Ok(&self.posts[0])
    }

    /// Replace a post in place, keeping its position.
    ///
    /// # Errors
    ///
    /// `Invalid` when title or content is blank, `NotFound` for an unknown id.
    pub fn update_post(&mut self, post: BlogPost) -> Result<&BlogPost, CatalogError> {
        validate_post(&post)?;
        let slot = self
            .posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or_else(|| CatalogError::not_found("post", &post.id))?;
        *slot = post;
        Ok(&*slot)
    }

    pub fn delete_post(&mut self, id: &str) -> bool {
        let before = self.posts.len();
        self.posts.retain(|p| p.id != id);
        self.posts.len() != before
    }

    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub fn like_post(&mut self, id: &str) -> Result<&BlogPost, CatalogError> {
        let post = self
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::not_found("post", id))?;
        post.likes = post.likes.saturating_add(1);
        Ok(&*post)
    }

    // -------------------------------------------------------------------------
    // Resources
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn resources(&self) -> &[ResourceCategory] {
        &self.resources
    }

    /// Items of one subject bucket, empty when the bucket does not exist.
    #[must_use]
    pub fn resources_for(&self, subject: Subject) -> &[ResourceItem] {
        self.resources
            .iter()
            .find(|c| c.category == subject)
            .map_or(&[], |c| c.items.as_slice())
    }

    #[must_use]
    pub fn find_resource(&self, id: &str) -> Option<(Subject, &ResourceItem)> {
        self.resources
            .iter()
            .find_map(|c| c.items.iter().find(|i| i.id == id).map(|i| (c.category, i)))
    }

    /// Append an item to its subject bucket, creating the bucket at the end.
    ///
    /// # Errors
    ///
    /// `Invalid` when title or url is blank, `Duplicate` for a reused id.
    pub fn add_resource(&mut self, category: Subject, item: ResourceItem) -> Result<&ResourceItem, CatalogError> {
        validate_resource(&item)?;
        if self.find_resource(&item.id).is_some() {
            return Err(CatalogError::Duplicate(format!("resource id {}", item.id)));
        }
        let bucket = self.bucket_mut(category);
        bucket.items.push(item);
        Ok(&bucket.items[bucket.items.len() - 1])
    }

    /// Remove an item from whichever bucket holds it.
    pub fn delete_resource(&mut self, id: &str) -> bool {
        let mut removed = false;
        for category in &mut self.resources {
            let before = category.items.len();
            category.items.retain(|i| i.id != id);
            removed |= category.items.len() != before;
        }
        removed
    }

    /// Update an item, moving it when its subject changed.
    ///
    /// With `new_category == original_category` the item is replaced in place
    /// in every bucket holding its id. Otherwise it is removed from the
    /// `original_category` bucket and appended to `new_category`.
    ///
    /// # Errors
    ///
    /// `Invalid` when title or url is blank. `NotFound` when the id is not in
    /// the catalog (same subject) or not in the original bucket (move).
    pub fn update_resource(
        &mut self,
        item: ResourceItem,
        new_category: Subject,
        original_category: Subject,
    ) -> Result<&ResourceItem, CatalogError> {
        validate_resource(&item)?;

        if new_category == original_category {
            let mut found = false;
            for category in &mut self.resources {
                for slot in category.items.iter_mut().filter(|i| i.id == item.id) {
                    *slot = item.clone();
                    found = true;
                }
            }
            if !found {
                return Err(CatalogError::not_found("resource", &item.id));
            }
            return self
                .find_resource(&item.id)
                .map(|(_, i)| i)
                .ok_or_else(|| CatalogError::not_found("resource", &item.id));
        }

        let source = self
            .resources
            .iter_mut()
            .find(|c| c.category == original_category)
            .ok_or_else(|| CatalogError::not_found("resource", &item.id))?;
        let before = source.items.len();
        source.items.retain(|i| i.id != item.id);
        if source.items.len() == before {
            return Err(CatalogError::not_found("resource", &item.id));
        }

        let bucket = self.bucket_mut(new_category);
        bucket.items.push(item);
        Ok(&bucket.items[bucket.items.len() - 1])
    }

    /// Count one download and return the updated item.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub fn record_download(&mut self, id: &str) -> Result<(Subject, &ResourceItem), CatalogError> {
        for category in &mut self.resources {
            if let Some(item) = category.items.iter_mut().find(|i| i.id == id) {
                item.downloads = item.downloads.saturating_add(1);
                return Ok((category.category, &*item));
            }
        }
        Err(CatalogError::not_found("resource", id))
    }

    fn bucket_mut(&mut self, category: Subject) -> &mut ResourceCategory {
        let index = match self.resources.iter().position(|c| c.category == category) {
            Some(index) => index,
            None => {
                self.resources.push(ResourceCategory { category, items: Vec::new() });
                self.resources.len() - 1
            }
        };
        &mut self.resources[index]
    }

    // -------------------------------------------------------------------------
    // Stats
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        let count_role = |role: Role| self.users.iter().filter(|u| u.role == role).count();
        let subjects = Subject::ALL
            .into_iter()
            .map(|subject| SubjectStats {
                subject,
                posts: self.posts_for(subject).count(),
                resources: self.resources_for(subject).len(),
            })
            .collect();

        CatalogStats {
            users: self.users.len(),
            students: count_role(Role::Student),
            creators: count_role(Role::ContentCreator),
            admins: count_role(Role::Admin),
            posts: self.posts.len(),
            likes: self.posts.iter().map(|p| u64::from(p.likes)).sum(),
            resources: self.resources.iter().map(|c| c.items.len()).sum(),
            downloads: self
                .resources
                .iter()
                .flat_map(|c| &c.items)
                .map(|i| u64::from(i.downloads))
                .sum(),
            subjects,
        }
    }

    // -------------------------------------------------------------------------
    // Blob conversion
    // -------------------------------------------------------------------------

    /// Serialize one collection as its stored JSON array.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures as `Corrupt`.
    pub fn collection_json(&self, collection: Collection) -> Result<serde_json::Value, CatalogError> {
        let value = match collection {
            Collection::Users => serde_json::to_value(&self.users)?,
            Collection::Posts => serde_json::to_value(&self.posts)?,
            Collection::Resources => serde_json::to_value(&self.resources)?,
        };
        Ok(value)
    }

    /// Replace one collection from its stored JSON array.
    ///
    /// # Errors
    ///
    /// `Corrupt` when the blob does not match the record shape. The catalog is
    /// unchanged in that case.
    pub fn load_collection(&mut self, collection: Collection, body: serde_json::Value) -> Result<(), CatalogError> {
        match collection {
            Collection::Users => self.users = serde_json::from_value(body)?,
            Collection::Posts => self.posts = serde_json::from_value(body)?,
            Collection::Resources => self.resources = serde_json::from_value(body)?,
        }
        Ok(())
    }
}

fn validate_post(post: &BlogPost) -> Result<(), CatalogError> {
    if post.title.trim().is_empty() || post.content.trim().is_empty() {
        return Err(CatalogError::Invalid("post: title and content are required".into()));
    }
    Ok(())
}

fn validate_resource(item: &ResourceItem) -> Result<(), CatalogError> {
    let url_missing = item.url.as_deref().is_none_or(|u| u.trim().is_empty());
    if item.title.trim().is_empty() || url_missing {
        return Err(CatalogError::Invalid("resource: title and url are required".into()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

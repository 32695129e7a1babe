//! Shared study-catalog records and collection operations.
//!
//! This crate owns the data model used by both `server` and `client`:
//! users, Spark Posts, and the subject-grouped resource library. The
//! [`Catalog`] type holds the three collections in memory and implements the
//! read-modify-write operations the API exposes, including moving a resource
//! between subject buckets when its subject changes.
//!
//! Persistence is not handled here. Each collection serializes to a single
//! JSON array (see [`Collection`]) and the server decides where that blob is
//! stored.

mod records;
mod seed;
mod store;

pub use records::{BlogPost, ResourceCategory, ResourceItem, ResourceKind, Role, Subject, User};
pub use seed::{seed_posts, seed_resources, seed_users};
pub use store::{Catalog, CatalogError, CatalogStats, Collection, SubjectStats};

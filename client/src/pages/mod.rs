//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetching, form state, dialogs)
//! and delegates rendering details to `components`. Pure helpers live next
//! to the page that uses them and are tested in the sibling `*_test.rs`.

pub mod admin;
pub mod creator;
pub mod dashboard;
pub mod landing;
pub mod lesson;
pub mod live_tutor;
pub mod login;
pub mod resources;
pub mod subject;
pub mod tools;

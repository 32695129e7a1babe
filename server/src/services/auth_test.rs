use super::*;
use crate::state::test_helpers;

#[test]
fn email_shape_checks() {
    assert!(is_valid_email("student@knix.lk"));
    assert!(!is_valid_email("student"));
    assert!(!is_valid_email("@knix.lk"));
    assert!(!is_valid_email("a@knix"));
    assert!(!is_valid_email("a@@knix.lk"));
    assert!(!is_valid_email("a b@knix.lk"));
}

#[test]
fn display_name_falls_back_to_local_part() {
    assert_eq!(display_name("nimal@knix.lk", None), "nimal");
    assert_eq!(display_name("nimal@knix.lk", Some("  ")), "nimal");
    assert_eq!(display_name("nimal@knix.lk", Some(" Nimal P ")), "Nimal P");
}

#[tokio::test]
async fn login_existing_email_returns_admin() {
    let state = test_helpers::test_app_state();
    let user = login(&state, " Admin@Knix.lk ", None).await.unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(user.role, Role::Admin);
    assert!(!state.catalog.read().await.is_dirty(Collection::Users));
}

#[tokio::test]
async fn login_new_email_creates_student() {
    let state = test_helpers::test_app_state();
    let user = login(&state, "new@knix.lk", Some("New Student")).await.unwrap();
    assert_eq!(user.role, Role::Student);
    assert_eq!(user.name, "New Student");
    assert_eq!(user.joined_date, today());

    let again = login(&state, "NEW@knix.lk", None).await.unwrap();
    assert_eq!(again.id, user.id);
    assert_eq!(state.catalog.read().await.catalog.users().len(), 2);
}

#[tokio::test]
async fn login_rejects_malformed_email() {
    let state = test_helpers::test_app_state();
    assert!(matches!(login(&state, "not-an-email", None).await, Err(AuthError::InvalidEmail)));
}

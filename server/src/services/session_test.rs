use super::*;
use crate::state::test_helpers;
use catalog::Role;

// =============================================================================
// bytes_to_hex
// =============================================================================

#[test]
fn bytes_to_hex_empty() {
    assert_eq!(bytes_to_hex(&[]), "");
}

#[test]
fn bytes_to_hex_leading_zero() {
    assert_eq!(bytes_to_hex(&[0x0a]), "0a");
}

#[test]
fn bytes_to_hex_multi_byte() {
    assert_eq!(bytes_to_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
}

// =============================================================================
// generate_token
// =============================================================================

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_two_calls_differ() {
    assert_ne!(generate_token(), generate_token());
}

// =============================================================================
// session table
// =============================================================================

#[tokio::test]
async fn created_session_validates_to_user() {
    let state = test_helpers::test_app_state();
    let admin = test_helpers::seed_admin(&state).await;
    let token = create_session(&state, &admin.id).await;

    let user = validate_session(&state, &token).await.expect("session valid");
    assert_eq!(user.id, admin.id);
}

#[tokio::test]
async fn unknown_token_is_rejected() {
    let state = test_helpers::test_app_state();
    assert!(validate_session(&state, "nope").await.is_none());
}

#[tokio::test]
async fn deleted_session_no_longer_validates() {
    let state = test_helpers::test_app_state();
    let user = test_helpers::seed_user(&state, "s1", Role::Student).await;
    let token = create_session(&state, &user.id).await;

    delete_session(&state, &token).await;
    assert!(validate_session(&state, &token).await.is_none());
}

#[tokio::test]
async fn session_of_deleted_user_is_dropped() {
    let state = test_helpers::test_app_state();
    let user = test_helpers::seed_user(&state, "s2", Role::Student).await;
    let token = create_session(&state, &user.id).await;
    state.catalog.write().await.catalog.delete_user(&user.id);

    assert!(validate_session(&state, &token).await.is_none());
    assert!(!state.sessions.read().await.contains_key(&token));
}

#[tokio::test]
async fn delete_sessions_for_user_keeps_others() {
    let state = test_helpers::test_app_state();
    let a = test_helpers::seed_user(&state, "a", Role::Student).await;
    let b = test_helpers::seed_user(&state, "b", Role::Student).await;
    create_session(&state, &a.id).await;
    create_session(&state, &a.id).await;
    let keep = create_session(&state, &b.id).await;

    assert_eq!(delete_sessions_for_user(&state, &a.id).await, 2);
    assert!(validate_session(&state, &keep).await.is_some());
}

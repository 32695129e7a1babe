use super::*;

fn user(role: Role, name: &str) -> User {
    User {
        id: "u1".into(),
        name: name.into(),
        email: "a@b.lk".into(),
        role,
        joined_date: "2025-01-01".into(),
    }
}

#[test]
fn pending_state_is_loading_without_user() {
    let state = AuthState::pending();
    assert!(state.loading);
    assert!(state.user.is_none());
    assert!(!AuthState::default().loading);
}

#[test]
fn role_helpers_follow_user_role() {
    let guest = AuthState::default();
    assert_eq!(guest.role(), None);
    assert!(!guest.is_admin());
    assert!(!guest.can_publish());

    let creator = AuthState { user: Some(user(Role::ContentCreator, "K Sithara")), loading: false };
    assert!(creator.can_publish());
    assert!(!creator.is_admin());

    let admin = AuthState { user: Some(user(Role::Admin, "Root")), loading: false };
    assert!(admin.is_admin());
    assert!(admin.can_publish());
}

#[test]
fn greeting_uses_first_name() {
    let state = AuthState { user: Some(user(Role::Student, "Kasun Perera")), loading: false };
    assert_eq!(state.greeting_name(), "Kasun");
    assert_eq!(AuthState::default().greeting_name(), "Student");
}

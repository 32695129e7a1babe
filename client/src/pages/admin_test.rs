use super::*;

fn user(id: &str, role: Role) -> User {
    User {
        id: id.to_owned(),
        name: format!("User {id}"),
        email: format!("{id}@knix.lk"),
        role,
        joined_date: "2024-01-01".to_owned(),
    }
}

#[test]
fn new_user_requires_name_and_email() {
    assert_eq!(new_user(" ", "a@b.lk", Role::Student), Err("Name is required."));
    assert_eq!(new_user("Amaya", "nope", Role::Student), Err("A valid email is required."));
}

#[test]
fn new_user_normalises_fields() {
    let payload = new_user(" Amaya ", " Amaya@Knix.LK ", Role::ContentCreator).unwrap();
    assert_eq!(payload, NewUser { name: "Amaya".to_owned(), email: "amaya@knix.lk".to_owned(), role: Role::ContentCreator });
}

#[test]
fn replace_user_updates_role_in_place() {
    let mut users = vec![user("a", Role::Student), user("b", Role::Student)];
    replace_user(&mut users, user("b", Role::Admin));
    assert_eq!(users[1].role, Role::Admin);
    assert_eq!(users[0].role, Role::Student);
}

#[test]
fn admins_cannot_delete_themselves() {
    assert!(!can_delete(Some("a"), "a"));
    assert!(can_delete(Some("a"), "b"));
    assert!(can_delete(None, "b"));
}

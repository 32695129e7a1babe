#![cfg(not(feature = "hydrate"))]

use super::*;

#[test]
fn missing_preference_defaults_to_dark() {
    assert!(parse_theme(None));
    assert!(read_preference());
}

#[test]
fn stored_values_map_to_theme() {
    assert!(parse_theme(Some("dark")));
    assert!(!parse_theme(Some("light")));
    assert!(!parse_theme(Some(" light ")));
    assert!(parse_theme(Some("sepia")));
}

#[test]
fn theme_value_round_trips() {
    assert!(parse_theme(Some(theme_value(true))));
    assert!(!parse_theme(Some(theme_value(false))));
}

#[test]
fn toggle_flips_boolean_value() {
    assert!(toggle(false));
    assert!(!toggle(true));
}

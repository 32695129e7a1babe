//! Theme initialization and toggle.
//!
//! Reads the `theme` preference (`"dark"` / `"light"`) from `localStorage`
//! and applies it as the `dark` class and a `data-theme` attribute on the
//! `<html>` element. Dark is the default when nothing is stored. Toggle
//! writes the new preference back.
//!
//! TRADE-OFFS
//! ==========
//! Preference persistence is best-effort browser-only behavior; SSR paths
//! safely no-op to keep server rendering deterministic.

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod dark_mode_test;

#[cfg(feature = "hydrate")]
const STORAGE_KEY: &str = "theme";

/// Interpret a stored `theme` value. Anything but `"light"` means dark.
#[must_use]
pub fn parse_theme(stored: Option<&str>) -> bool {
    !matches!(stored.map(str::trim), Some("light"))
}

#[must_use]
pub fn theme_value(dark: bool) -> &'static str {
    if dark { "dark" } else { "light" }
}

/// Read the theme preference from localStorage. `true` means dark.
pub fn read_preference() -> bool {
    #[cfg(feature = "hydrate")]
    {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
        parse_theme(stored.as_deref())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        parse_theme(None)
    }
}

/// Apply the theme to the `<html>` element.
pub fn apply(dark: bool) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = el.set_attribute("data-theme", theme_value(dark));
            let classes = el.class_list();
            let _ = if dark { classes.add_1("dark") } else { classes.remove_1("dark") };
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = dark;
    }
}

/// Toggle the theme and persist the new preference to localStorage.
pub fn toggle(current: bool) -> bool {
    let next = !current;
    apply(next);
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(STORAGE_KEY, theme_value(next));
        }
    }
    next
}

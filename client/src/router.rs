//! Hash router: `window.location.hash` selects the screen.
//!
//! DESIGN
//! ======
//! The server serves one SSR route (`/`) and every screen lives behind the
//! URL fragment, so deep links survive reloads without server routing. The
//! current path is a single `RwSignal<String>` inside [`RouterContext`];
//! `navigate` writes the fragment and a `hashchange` listener feeds it back
//! into the signal.
//!
//! LIFECYCLE
//! =========
//! SSR and the first hydrated render both use path `/`. The real fragment is
//! read in an effect after hydration so the server and browser trees agree.
//!
//! Route resolution and role gating are pure functions over the path and the
//! caller's role so they can be tested without a browser.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use catalog::{Role, Subject};
use leptos::prelude::*;

// =============================================================================
// ROUTE TABLE
// =============================================================================

/// Screen selected by a resolved path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Login,
    Dashboard,
    Subject(Subject),
    Resources,
    Tools,
    LiveTutor,
    Creator,
    Admin,
    Lesson,
}

/// Who may open a screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Publisher,
    Admin,
}

impl Screen {
    #[must_use]
    pub fn access(self) -> Access {
        match self {
            Self::Creator => Access::Publisher,
            Self::Admin => Access::Admin,
            _ => Access::Public,
        }
    }

    /// Screens rendered inside the sidebar layout.
    #[must_use]
    pub fn uses_layout(self) -> bool {
        !matches!(self, Self::Landing | Self::Login)
    }
}

/// Named path parameters (`id` for `/course/:id`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteParams {
    pub id: Option<String>,
}

/// Map a path to its screen and params. `None` for unknown paths.
#[must_use]
pub fn resolve(path: &str) -> Option<(Screen, RouteParams)> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    let screen = match trimmed {
        "" => Screen::Landing,
        "/login" => Screen::Login,
        "/dashboard" | "/subjects" => Screen::Dashboard,
        "/resources" => Screen::Resources,
        "/tools" => Screen::Tools,
        "/live" => Screen::LiveTutor,
        "/creator" => Screen::Creator,
        "/admin" => Screen::Admin,
        other => {
            if let Some(id) = other.strip_prefix("/course/") {
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                let params = RouteParams { id: Some(id.to_owned()) };
                return Some((Screen::Lesson, params));
            }
            let slug = other.strip_prefix('/')?;
            Screen::Subject(Subject::from_slug(slug)?)
        }
    };
    Some((screen, RouteParams::default()))
}

/// Result of matching the current path against the table and the user's role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Render(Screen, RouteParams),
    /// Replace the current entry with this path.
    Redirect(&'static str),
    /// Gated screen while the session probe is still running.
    Pending,
}

/// Whether `role` may open a screen with `access`.
#[must_use]
pub fn allows(access: Access, role: Option<Role>) -> bool {
    match access {
        Access::Public => true,
        Access::Publisher => role.is_some_and(Role::can_publish),
        Access::Admin => role.is_some_and(Role::is_admin),
    }
}

/// Resolve `path` for a user with `role`.
///
/// Unknown paths redirect to `/`. A gated screen redirects to `/dashboard`
/// for a signed-in user without the role and to `/login` when signed out.
#[must_use]
pub fn decide(path: &str, role: Option<Role>, loading: bool) -> Outcome {
    let Some((screen, params)) = resolve(path) else {
        return Outcome::Redirect("/");
    };
    let access = screen.access();
    if allows(access, role) {
        return Outcome::Render(screen, params);
    }
    if loading {
        return Outcome::Pending;
    }
    if role.is_some() {
        Outcome::Redirect("/dashboard")
    } else {
        Outcome::Redirect("/login")
    }
}

/// Path encoded in a location hash (`#/tools` → `/tools`, empty → `/`).
#[must_use]
pub fn path_from_hash(hash: &str) -> String {
    let path = hash.strip_prefix('#').unwrap_or(hash);
    if path.is_empty() {
        "/".to_owned()
    } else if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}

/// Header title for a path: `WELCOME` at the root, else the upper-cased path.
#[must_use]
pub fn page_title(path: &str) -> String {
    if path == "/" {
        return "WELCOME".to_owned();
    }
    path.trim_start_matches('/').replace(['-', '/'], " ").to_uppercase()
}

// =============================================================================
// CONTEXT
// =============================================================================

/// Router handle shared through Leptos context.
#[derive(Clone, Copy)]
pub struct RouterContext {
    path: RwSignal<String>,
}

impl RouterContext {
    #[must_use]
    pub fn new(initial: &str) -> Self {
        Self { path: RwSignal::new(initial.to_owned()) }
    }

    /// Current path (tracked).
    #[must_use]
    pub fn path(&self) -> String {
        self.path.get()
    }

    /// Current path without subscribing.
    #[must_use]
    pub fn current(&self) -> String {
        self.path.get_untracked()
    }

    /// Parameters of the current path (tracked).
    #[must_use]
    pub fn params(&self) -> RouteParams {
        self.path.with(|p| resolve(p).map(|(_, params)| params).unwrap_or_default())
    }

    /// Push a new history entry for `to`.
    pub fn navigate(&self, to: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_hash(to);
            }
        }
        self.path.set(to.to_owned());
    }

    /// Replace the current history entry with `to`.
    pub fn replace(&self, to: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().replace(&format!("#{to}"));
            }
        }
        self.path.set(to.to_owned());
    }

    fn sync_from_location(&self) {
        #[cfg(feature = "hydrate")]
        {
            let hash = web_sys::window()
                .and_then(|w| w.location().hash().ok())
                .unwrap_or_default();
            let next = path_from_hash(&hash);
            if self.path.get_untracked() != next {
                self.path.set(next);
            }
        }
    }
}

/// Create the router, provide it as context, and start listening to the hash.
pub fn provide_router() -> RouterContext {
    let router = RouterContext::new("/");
    provide_context(router);

    // Effects only run in the browser, after hydration.
    Effect::new(move |_| router.sync_from_location());

    #[cfg(feature = "hydrate")]
    {
        let handle = window_event_listener(leptos::ev::hashchange, move |_| router.sync_from_location());
        on_cleanup(move || handle.remove());
    }

    router
}

#[must_use]
pub fn use_router() -> RouterContext {
    expect_context::<RouterContext>()
}

/// Navigation callback, mirroring `useNavigate`.
pub fn use_navigate() -> impl Fn(&str) + Clone + Copy + 'static {
    let router = use_router();
    move |to: &str| router.navigate(to)
}

#[must_use]
pub fn use_params() -> RouteParams {
    use_router().params()
}

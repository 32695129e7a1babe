//! Application chrome: collapsible sidebar, header, and content area.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps every screen except Landing and Login. Reads auth for the role-gated
//! sidebar groups and the UI state for theme and sidebar width.

use leptos::prelude::*;

use crate::router::{page_title, use_router};
use crate::state::auth::AuthState;
use crate::state::ui::UiState;
use crate::util::{browser, dark_mode, ui_persistence};

/// Copy a link to the current page and flash a notice.
pub fn share_current_page(ui: RwSignal<UiState>, path: &str) {
    let link = browser::share_link(&browser::origin(), path);
    if browser::copy_to_clipboard(&link) {
        flash_notice(ui, "Link copied to clipboard!");
    }
}

/// Show a short-lived notice in the header.
pub fn flash_notice(ui: RwSignal<UiState>, text: &str) {
    ui.update(|u| u.notice = Some(text.to_owned()));
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(2_000).await;
        ui.update(|u| u.notice = None);
    });
}

#[component]
fn NavItem(#[prop(into)] label: String, path: &'static str, glyph: &'static str) -> impl IntoView {
    let router = use_router();
    let ui = expect_context::<RwSignal<UiState>>();
    let title = label.clone();
    view! {
        <button
            class="nav-item"
            class:nav-item--active=move || router.path() == path
            title=title
            on:click=move |_| router.navigate(path)
        >
            <span class="nav-item__glyph">{glyph}</span>
            <Show when=move || ui.get().sidebar_open>
                <span class="nav-item__label">{label.clone()}</span>
            </Show>
        </button>
    }
}

#[component]
fn NavGroup(title: &'static str) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    view! {
        <div class="nav-group">{move || if ui.get().sidebar_open { title } else { "•" }}</div>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let router = use_router();

    Effect::new(move |_| {
        if let Some(open) = ui_persistence::load_json::<bool>(ui_persistence::SIDEBAR_OPEN_KEY) {
            ui.update(|u| u.sidebar_open = open);
        }
    });

    let toggle_sidebar = move |_| {
        let open = !ui.get_untracked().sidebar_open;
        ui.update(|u| u.sidebar_open = open);
        ui_persistence::save_json(ui_persistence::SIDEBAR_OPEN_KEY, &open);
    };
    let toggle_theme = move |_| {
        let next = dark_mode::toggle(ui.get_untracked().dark_mode);
        ui.update(|u| u.dark_mode = next);
    };
    let on_share = move |_| share_current_page(ui, &router.current());
    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            crate::net::api::logout().await;
            auth.update(|a| a.user = None);
            router.navigate("/");
        });
    };

    let signed_in = move || auth.get().user.is_some();

    view! {
        <div class="app-shell" class:app-shell--collapsed=move || !ui.get().sidebar_open>
            <aside class="sidebar">
                <div class="sidebar__brand" on:click=move |_| router.navigate("/")>
                    <span class="sidebar__star">"★"</span>
                    <Show when=move || ui.get().sidebar_open>
                        <span class="sidebar__name">"Knix"</span>
                    </Show>
                </div>
                <nav class="sidebar__nav">
                    <NavGroup title="Main"/>
                    <NavItem label="Home" path="/" glyph="⌂"/>
                    <NavItem label="Dashboard" path="/dashboard" glyph="▦"/>
                    <NavItem label="Live Tutor" path="/live" glyph="🎙"/>

                    <NavGroup title="Subjects"/>
                    <NavItem label="Biology" path="/biology" glyph="🧬"/>
                    <NavItem label="Physics" path="/physics" glyph="⚛"/>
                    <NavItem label="Chemistry" path="/chemistry" glyph="⚗"/>
                    <NavItem label="Combined Maths" path="/maths" glyph="∑"/>
                    <NavItem label="ICT" path="/ict" glyph="⌨"/>

                    <NavGroup title="Library"/>
                    <NavItem label="Resources" path="/resources" glyph="📚"/>
                    <NavItem label="Tools" path="/tools" glyph="🛠"/>

                    <Show when=move || auth.get().can_publish()>
                        <NavGroup title="Admin"/>
                        <NavItem label="Creator Studio" path="/creator" glyph="✎"/>
                        <Show when=move || auth.get().is_admin()>
                            <NavItem label="System Admin" path="/admin" glyph="🛡"/>
                        </Show>
                    </Show>
                </nav>
                <div class="sidebar__footer">
                    <button class="nav-item" on:click=toggle_theme>
                        <span class="nav-item__glyph">{move || if ui.get().dark_mode { "☀" } else { "☾" }}</span>
                        <Show when=move || ui.get().sidebar_open>
                            <span class="nav-item__label">
                                {move || if ui.get().dark_mode { "Light Mode" } else { "Dark Mode" }}
                            </span>
                        </Show>
                    </button>
                    <Show
                        when=signed_in
                        fallback=move || view! {
                            <button class="btn btn--outline sidebar__login" on:click=move |_| router.navigate("/login")>
                                "Log in"
                            </button>
                        }
                    >
                        <button class="nav-item nav-item--logout" on:click=on_logout>
                            <span class="nav-item__glyph">"⏻"</span>
                            <Show when=move || ui.get().sidebar_open>
                                <span class="nav-item__label">"Logout"</span>
                            </Show>
                        </button>
                    </Show>
                </div>
            </aside>

            <div class="app-main">
                <header class="app-header">
                    <button class="btn btn--icon" title="Toggle sidebar" on:click=toggle_sidebar>
                        "☰"
                    </button>
                    <h1 class="app-header__title">{move || page_title(&router.path())}</h1>
                    <span class="app-header__spacer"></span>
                    <Show when=move || ui.get().notice.is_some()>
                        <span class="app-header__notice">{move || ui.get().notice.unwrap_or_default()}</span>
                    </Show>
                    <button class="btn btn--icon" title="Share Page" on:click=on_share>
                        "⤴"
                    </button>
                    <Show
                        when=signed_in
                        fallback=move || view! {
                            <button class="btn btn--outline" on:click=move |_| router.navigate("/login")>
                                "Log in"
                            </button>
                        }
                    >
                        <span class="app-header__user">
                            {move || auth.get().user.map(|u| u.name).unwrap_or_default()}
                        </span>
                    </Show>
                </header>
                <main class="app-content">{children()}</main>
            </div>
        </div>
    }
}

//! Root application component, SSR shell, and hash-routed screen switch.
//!
//! ARCHITECTURE
//! ============
//! `leptos_router` serves a single route (`/`); [`HashShell`] picks the screen
//! from the hash router in [`crate::router`] and applies role gating.
//! Shared state (`AuthState`, `UiState`, `LiveState`) is provided as context
//! signals before anything renders.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::layout::Layout;
use crate::pages::{
    admin::AdminPage, creator::CreatorPage, dashboard::DashboardPage, landing::LandingPage, lesson::LessonPage,
    live_tutor::LiveTutorPage, login::LoginPage, resources::ResourcesPage, subject::SubjectPage, tools::ToolsPage,
};
use crate::router::{Outcome, RouteParams, Screen, decide, provide_router};
use crate::state::{auth::AuthState, live::LiveState, ui::UiState};
use crate::util::dark_mode;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::pending());
    let ui = RwSignal::new(UiState::default());
    let live = RwSignal::new(LiveState::default());

    provide_context(auth);
    provide_context(ui);
    provide_context(live);

    // Stored theme is only readable in the browser.
    Effect::new(move |_| {
        let dark = dark_mode::read_preference();
        dark_mode::apply(dark);
        ui.update(|u| u.dark_mode = dark);
    });

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let user = crate::net::api::fetch_current_user().await;
        auth.set(AuthState { user, loading: false });
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/knix.css"/>
        <Title text="Knix"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HashShell/>
            </Routes>
        </Router>
    }
}

/// Screen switch driven by the hash router.
#[component]
fn HashShell() -> impl IntoView {
    let router = provide_router();
    let auth = expect_context::<RwSignal<AuthState>>();

    let outcome = Memo::new(move |_| {
        let path = router.path();
        auth.with(|a| decide(&path, a.role(), a.loading))
    });

    Effect::new(move |_| {
        if let Outcome::Redirect(to) = outcome.get() {
            router.replace(to);
        }
    });

    move || match outcome.get() {
        Outcome::Render(screen, params) => {
            if screen.uses_layout() {
                view! { <Layout>{render_screen(screen, params)}</Layout> }.into_any()
            } else {
                render_screen(screen, params)
            }
        }
        Outcome::Redirect(_) | Outcome::Pending => view! { <div class="route-pending">"Loading..."</div> }.into_any(),
    }
}

fn render_screen(screen: Screen, params: RouteParams) -> AnyView {
    match screen {
        Screen::Landing => view! { <LandingPage/> }.into_any(),
        Screen::Login => view! { <LoginPage/> }.into_any(),
        Screen::Dashboard => view! { <DashboardPage/> }.into_any(),
        Screen::Subject(subject) => view! { <SubjectPage subject=subject/> }.into_any(),
        Screen::Resources => view! { <ResourcesPage/> }.into_any(),
        Screen::Tools => view! { <ToolsPage/> }.into_any(),
        Screen::LiveTutor => view! { <LiveTutorPage/> }.into_any(),
        Screen::Creator => view! { <CreatorPage/> }.into_any(),
        Screen::Admin => view! { <AdminPage/> }.into_any(),
        Screen::Lesson => view! { <LessonPage id=params.id.unwrap_or_default()/> }.into_any(),
    }
}

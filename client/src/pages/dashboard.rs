//! Student dashboard: greeting, platform stats, latest Spark Posts.
//!
//! SYSTEM CONTEXT
//! ==============
//! Default screen after sign-in and the first stop for guests exploring the
//! platform. Stats and posts are fetched once on mount; likes update the feed
//! in place from the server's returned post.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::layout::share_current_page;
use crate::components::post_card::PostCard;
use crate::components::stat_card::StatCard;
use crate::net::types::{BlogPost, CatalogStats, Subject};
use crate::router::use_router;
use crate::state::auth::AuthState;
use crate::state::ui::UiState;

/// Posts shown in the feed.
pub const FEED_LIMIT: usize = 5;
/// Lessons offered under "Continue learning".
pub const CONTINUE_LIMIT: usize = 3;

/// Replace the post with the same id, keeping feed order.
pub fn apply_like(posts: &mut [BlogPost], updated: BlogPost) {
    if let Some(slot) = posts.iter_mut().find(|p| p.id == updated.id) {
        *slot = updated;
    }
}

/// `(label, value, subtext)` rows for the stat cards.
#[must_use]
pub fn stat_rows(stats: Option<&CatalogStats>) -> Vec<(&'static str, String, String)> {
    let Some(stats) = stats else {
        return ["Spark Posts", "Resources", "Downloads", "Students"]
            .into_iter()
            .map(|label| (label, "—".to_owned(), String::new()))
            .collect();
    };
    vec![
        ("Spark Posts", stats.posts.to_string(), format!("{} likes", stats.likes)),
        ("Resources", stats.resources.to_string(), format!("{} subjects", stats.subjects.len())),
        ("Downloads", stats.downloads.to_string(), "all time".to_owned()),
        ("Students", stats.students.to_string(), format!("{} members", stats.users)),
    ]
}

fn subject_icon(subject: Subject) -> &'static str {
    match subject {
        Subject::Biology => "🧬",
        Subject::Physics => "⚛",
        Subject::Chemistry => "⚗",
        Subject::CombinedMaths => "∑",
        Subject::Ict => "⌨",
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let router = use_router();

    let posts = RwSignal::new(Vec::<BlogPost>::new());
    let stats = RwSignal::new(None::<CatalogStats>);
    let loading = RwSignal::new(true);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let (fetched_posts, fetched_stats) =
            futures::join!(crate::net::api::fetch_posts(), crate::net::api::fetch_stats());
        posts.set(fetched_posts);
        stats.set(fetched_stats);
        loading.set(false);
    });

    let on_like = Callback::new(move |id: String| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::like_post(&id).await {
                Ok(updated) => posts.update(|list| apply_like(list, updated)),
                Err(e) => log::warn!("like failed: {e}"),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    });
    let on_share = Callback::new(move |_title: String| share_current_page(ui, &router.current()));

    view! {
        <div class="dashboard">
            <section class="dashboard__welcome">
                <h2>{move || format!("Welcome back, {}!", auth.get().greeting_name())}</h2>
                <p>"Pick up where you left off or explore something new today."</p>
            </section>

            <section class="dashboard__stats">
                {move || {
                    stats
                        .with(|s| stat_rows(s.as_ref()))
                        .into_iter()
                        .map(|(label, value, subtext)| {
                            view! { <StatCard label=label value=Signal::derive(move || value.clone()) subtext=subtext/> }
                        })
                        .collect_view()
                }}
            </section>

            <section class="dashboard__subjects">
                <h3>"Subjects"</h3>
                <div class="subject-grid">
                    {Subject::ALL
                        .into_iter()
                        .map(|subject| {
                            let path = format!("/{}", subject.slug());
                            view! {
                                <button class="subject-tile" on:click=move |_| router.navigate(&path)>
                                    <span class="subject-tile__icon">{subject_icon(subject)}</span>
                                    <span class="subject-tile__name">{subject.as_str()}</span>
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </section>

            <div class="dashboard__columns">
                <section class="dashboard__feed">
                    <h3>"Latest Spark Posts"</h3>
                    <Show
                        when=move || !loading.get()
                        fallback=|| view! { <p class="muted">"Loading posts..."</p> }
                    >
                        <Show
                            when=move || posts.with(|p| !p.is_empty())
                            fallback=|| view! { <p class="muted">"No posts yet."</p> }
                        >
                            {move || {
                                posts
                                    .get()
                                    .into_iter()
                                    .take(FEED_LIMIT)
                                    .map(|post| view! { <PostCard post=post on_like=on_like on_share=on_share/> })
                                    .collect_view()
                            }}
                        </Show>
                    </Show>
                </section>

                <aside class="dashboard__continue">
                    <h3>"Continue learning"</h3>
                    {move || {
                        posts
                            .get()
                            .into_iter()
                            .take(CONTINUE_LIMIT)
                            .map(|post| {
                                let path = format!("/course/{}", post.id);
                                view! {
                                    <button class="continue-card" on:click=move |_| router.navigate(&path)>
                                        <span class="continue-card__subject">{post.subject.as_str()}</span>
                                        <span class="continue-card__title">{post.title}</span>
                                        <span class="continue-card__cta">"Resume →"</span>
                                    </button>
                                }
                            })
                            .collect_view()
                    }}
                </aside>
            </div>
        </div>
    }
}

//! Subject page: notes and downloadable files for one A/L subject.

#[cfg(test)]
#[path = "subject_test.rs"]
mod subject_test;

use leptos::prelude::*;

use crate::components::layout::share_current_page;
use crate::components::post_card::PostCard;
use crate::components::resource_row::ResourceRow;
use crate::net::types::{BlogPost, ResourceCategory, ResourceItem, Subject};
use crate::router::use_router;
use crate::state::ui::UiState;

/// Posts for `subject`, feed order preserved.
#[must_use]
pub fn posts_for(posts: &[BlogPost], subject: Subject) -> Vec<BlogPost> {
    posts.iter().filter(|p| p.subject == subject).cloned().collect()
}

/// Files in the `subject` bucket, empty when the bucket does not exist.
#[must_use]
pub fn files_for(categories: &[ResourceCategory], subject: Subject) -> Vec<ResourceItem> {
    categories
        .iter()
        .find(|c| c.category == subject)
        .map(|c| c.items.clone())
        .unwrap_or_default()
}

/// Replace a downloaded item so its counter reflects the server.
pub fn apply_download(categories: &mut [ResourceCategory], updated: ResourceItem) {
    for category in categories {
        if let Some(slot) = category.items.iter_mut().find(|i| i.id == updated.id) {
            *slot = updated;
            return;
        }
    }
}

#[must_use]
pub fn empty_notes_text(subject: Subject) -> String {
    format!("No notes published for {subject} yet.")
}

#[component]
pub fn SubjectPage(subject: Subject) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let router = use_router();
    let posts = RwSignal::new(Vec::<BlogPost>::new());
    let categories = RwSignal::new(Vec::<ResourceCategory>::new());

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let (fetched_posts, fetched_resources) =
            futures::join!(crate::net::api::fetch_posts(), crate::net::api::fetch_resources());
        posts.set(fetched_posts);
        categories.set(fetched_resources);
    });

    let on_share = Callback::new(move |_title: String| share_current_page(ui, &router.current()));
    let on_downloaded = Callback::new(move |item: ResourceItem| categories.update(|c| apply_download(c, item)));

    let subject_posts = Memo::new(move |_| posts.with(|p| posts_for(p, subject)));
    let subject_files = Memo::new(move |_| categories.with(|c| files_for(c, subject)));

    view! {
        <div class="subject-page">
            <header class="subject-page__header">
                <h2>{subject.as_str()}</h2>
                <p>{format!("Spark Posts and study files for A/L {subject}.")}</p>
            </header>

            <section class="subject-page__notes">
                <h3>"Spark Posts"</h3>
                <Show
                    when=move || subject_posts.with(|p| !p.is_empty())
                    fallback=move || view! { <p class="empty-state">{empty_notes_text(subject)}</p> }
                >
                    {move || {
                        subject_posts
                            .get()
                            .into_iter()
                            .map(|post| view! { <PostCard post=post on_share=on_share/> })
                            .collect_view()
                    }}
                </Show>
            </section>

            <section class="subject-page__files">
                <h3>"Resources"</h3>
                <Show
                    when=move || subject_files.with(|f| !f.is_empty())
                    fallback=|| view! { <p class="empty-state">"No files available."</p> }
                >
                    {move || {
                        subject_files
                            .get()
                            .into_iter()
                            .map(|item| view! { <ResourceRow item=item on_downloaded=on_downloaded on_share=on_share/> })
                            .collect_view()
                    }}
                </Show>
            </section>
        </div>
    }
}

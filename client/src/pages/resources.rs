//! Resource library with subject filter chips.

#[cfg(test)]
#[path = "resources_test.rs"]
mod resources_test;

use leptos::prelude::*;

use crate::components::layout::share_current_page;
use crate::components::resource_row::ResourceRow;
use crate::net::types::{ResourceCategory, ResourceItem, Subject};
use crate::pages::subject::apply_download;
use crate::router::use_router;
use crate::state::ui::UiState;

/// Categories shown for a filter (`None` = All), empty buckets dropped.
#[must_use]
pub fn visible_categories(categories: &[ResourceCategory], filter: Option<Subject>) -> Vec<ResourceCategory> {
    categories
        .iter()
        .filter(|c| filter.is_none_or(|s| c.category == s))
        .filter(|c| !c.items.is_empty())
        .cloned()
        .collect()
}

#[must_use]
pub fn file_count_label(count: usize) -> String {
    if count == 1 { "1 File".to_owned() } else { format!("{count} Files") }
}

#[component]
pub fn ResourcesPage() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let router = use_router();
    let categories = RwSignal::new(Vec::<ResourceCategory>::new());
    let filter = RwSignal::new(None::<Subject>);
    let loading = RwSignal::new(true);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        categories.set(crate::net::api::fetch_resources().await);
        loading.set(false);
    });

    let on_share = Callback::new(move |_title: String| share_current_page(ui, &router.current()));
    let on_downloaded = Callback::new(move |item: ResourceItem| categories.update(|c| apply_download(c, item)));
    let visible = Memo::new(move |_| categories.with(|c| visible_categories(c, filter.get())));

    let chip = move |label: &'static str, value: Option<Subject>| {
        view! {
            <button
                class="chip"
                class:chip--active=move || filter.get() == value
                on:click=move |_| filter.set(value)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="resources-page">
            <header class="resources-page__header">
                <h2>"Resource Library"</h2>
                <p>"Past papers, model papers, and summaries for every subject."</p>
            </header>
            <div class="chip-row">
                {chip("All", None)}
                {Subject::ALL.into_iter().map(|s| chip(s.as_str(), Some(s))).collect_view()}
            </div>
            <Show when=move || !loading.get() fallback=|| view! { <p class="muted">"Loading resources..."</p> }>
                <Show
                    when=move || visible.with(|v| !v.is_empty())
                    fallback=|| view! {
                        <div class="empty-state">
                            <h3>"No resources found"</h3>
                            <p>"Try a different subject filter."</p>
                        </div>
                    }
                >
                    {move || {
                        visible
                            .get()
                            .into_iter()
                            .map(|category| view! {
                                <section class="resource-category">
                                    <header class="resource-category__header">
                                        <h3>{category.category.as_str()}</h3>
                                        <span class="badge">{file_count_label(category.items.len())}</span>
                                    </header>
                                    {category
                                        .items
                                        .into_iter()
                                        .map(|item| view! {
                                            <ResourceRow item=item on_downloaded=on_downloaded on_share=on_share/>
                                        })
                                        .collect_view()}
                                </section>
                            })
                            .collect_view()
                    }}
                </Show>
            </Show>
        </div>
    }
}

//! One downloadable resource with expandable description and actions.

use leptos::prelude::*;

use crate::net::types::{ResourceItem, ResourceKind};

fn kind_icon(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Pdf => "📄",
        ResourceKind::Image => "🖼",
        ResourceKind::Link => "🔗",
    }
}

/// Count the download, then open the file in a new tab.
///
/// The counter is bumped before opening so a blocked popup still counts.
pub fn start_download(item: ResourceItem, on_downloaded: Option<Callback<ResourceItem>>) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::record_download(&item.id).await {
            Ok(updated) => {
                if let Some(cb) = on_downloaded {
                    cb.run(updated);
                }
            }
            Err(e) => log::warn!("download count failed for {}: {e}", item.id),
        }
        if let Some(url) = item.url.as_deref() {
            crate::util::browser::open_in_new_tab(url);
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (item, on_downloaded);
    }
}

#[component]
pub fn ResourceRow(
    item: ResourceItem,
    #[prop(optional)] on_downloaded: Option<Callback<ResourceItem>>,
    #[prop(optional)] on_share: Option<Callback<String>>,
) -> impl IntoView {
    let expanded = RwSignal::new(false);
    let long = item.has_long_description();
    let share_title = item.title.clone();
    let download_item = item.clone();

    view! {
        <div class="resource-row">
            <div class="resource-row__icon">{kind_icon(item.kind)}</div>
            <div class="resource-row__main">
                <h4 class="resource-row__title">{item.title.clone()}</h4>
                {item.description.clone().map(|text| view! {
                    <div class="resource-row__description">
                        <p class:resource-row__description--clamped=move || long && !expanded.get()>{text}</p>
                        <Show when=move || long>
                            <button
                                class="btn btn--link"
                                on:click=move |ev| {
                                    ev.stop_propagation();
                                    expanded.update(|v| *v = !*v);
                                }
                            >
                                {move || if expanded.get() { "Show Less" } else { "Read More" }}
                            </button>
                        </Show>
                    </div>
                })}
                <div class="resource-row__meta">
                    <span class="resource-row__kind">{item.kind.as_str()}</span>
                    <span>{item.size.clone()}</span>
                    {item.author.clone().map(|author| view! { <span class="resource-row__author">{author}</span> })}
                </div>
            </div>
            <div class="resource-row__actions">
                <div class="resource-row__downloads">
                    <strong>{item.downloads}</strong>
                    <span>"Downloads"</span>
                </div>
                {on_share.map(|cb| {
                    let title = share_title.clone();
                    view! {
                        <button class="btn btn--ghost" title="Share" on:click=move |_| cb.run(title.clone())>
                            "Share"
                        </button>
                    }
                })}
                <button
                    class="btn btn--primary"
                    title="Download"
                    disabled=item.url.is_none()
                    on:click=move |_| start_download(download_item.clone(), on_downloaded)
                >
                    "Download"
                </button>
            </div>
        </div>
    }
}

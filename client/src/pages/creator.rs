//! Creator Studio: publish and maintain Spark Posts and resources.
//!
//! SYSTEM CONTEXT
//! ==============
//! Open to admins and content creators (gated by the router). Every mutation
//! goes through the REST API; the local lists are patched from the server's
//! response so the view matches what was stored.
//!
//! DESIGN
//! ======
//! The post editor keeps the markdown source in one signal. Toolbar buttons
//! read the textarea selection (UTF-16 offsets), rewrite the source with
//! `util::editor::wrap_selection`, and restore the selection around the
//! wrapped text. Deletes always go through `ConfirmDialog`.

#[cfg(test)]
#[path = "creator_test.rs"]
mod creator_test;

use leptos::prelude::*;

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::markdown_view::MarkdownView;
use crate::net::types::{
    BlogPost, PlacedResource, PostDraft, ResourceCategory, ResourceDraft, ResourceItem, ResourceKind, Subject,
};
use crate::util::editor::{self, Format};

// =============================================================================
// FORM HELPERS
// =============================================================================

/// Build a post draft from raw form fields.
///
/// # Errors
///
/// Returns the message shown above the form.
pub fn post_draft(title: &str, content: &str, subject: Subject, image_url: &str) -> Result<PostDraft, &'static str> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Title is required.");
    }
    if content.trim().is_empty() {
        return Err("Content is required.");
    }
    let image_url = image_url.trim();
    Ok(PostDraft {
        title: title.to_owned(),
        content: content.to_owned(),
        subject,
        image_url: (!image_url.is_empty()).then(|| image_url.to_owned()),
    })
}

/// Raw resource form fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceFields {
    pub title: String,
    pub kind: ResourceKind,
    pub size: String,
    pub category: Option<Subject>,
    pub url: String,
    pub description: String,
}

impl ResourceFields {
    #[must_use]
    pub fn from_item(category: Subject, item: &ResourceItem) -> Self {
        Self {
            title: item.title.clone(),
            kind: item.kind,
            size: item.size.clone(),
            category: Some(category),
            url: item.url.clone().unwrap_or_default(),
            description: item.description.clone().unwrap_or_default(),
        }
    }

    /// # Errors
    ///
    /// Returns the message shown above the form.
    pub fn to_draft(&self) -> Result<ResourceDraft, &'static str> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title is required.");
        }
        let url = self.url.trim();
        if url.is_empty() {
            return Err("A file URL is required.");
        }
        let size = self.size.trim();
        let description = self.description.trim();
        Ok(ResourceDraft {
            title: title.to_owned(),
            kind: self.kind,
            size: if size.is_empty() { "0 MB".to_owned() } else { size.to_owned() },
            category: self.category.unwrap_or(Subject::Biology),
            url: Some(url.to_owned()),
            description: (!description.is_empty()).then(|| description.to_owned()),
        })
    }
}

/// Insert a new post at the head or replace an edited one in place.
pub fn upsert_post(posts: &mut Vec<BlogPost>, post: BlogPost) {
    match posts.iter_mut().find(|p| p.id == post.id) {
        Some(slot) => *slot = post,
        None => posts.insert(0, post),
    }
}

/// Apply a created or edited resource the way the server stores it.
///
/// An item already in its bucket is replaced in place; otherwise it is
/// removed from wherever it was and appended to its (possibly new) bucket.
pub fn place_resource(categories: &mut Vec<ResourceCategory>, placed: PlacedResource) {
    let PlacedResource { category, item } = placed;
    if let Some(bucket) = categories.iter_mut().find(|c| c.category == category) {
        if let Some(slot) = bucket.items.iter_mut().find(|i| i.id == item.id) {
            *slot = item;
            return;
        }
    }
    for bucket in categories.iter_mut() {
        bucket.items.retain(|i| i.id != item.id);
    }
    match categories.iter_mut().find(|c| c.category == category) {
        Some(bucket) => bucket.items.push(item),
        None => categories.push(ResourceCategory { category, items: vec![item] }),
    }
}

/// Remove a resource from whichever bucket holds it.
pub fn remove_resource(categories: &mut [ResourceCategory], id: &str) {
    for bucket in categories {
        bucket.items.retain(|i| i.id != id);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StudioTab {
    Posts,
    Resources,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum PendingDelete {
    Post { id: String, title: String },
    Resource { id: String, title: String },
}

impl PendingDelete {
    fn message(&self) -> String {
        match self {
            Self::Post { title, .. } => format!("Delete the post \"{title}\"? This cannot be undone."),
            Self::Resource { title, .. } => format!("Delete the resource \"{title}\"? This cannot be undone."),
        }
    }
}

// =============================================================================
// PAGE
// =============================================================================

#[component]
pub fn CreatorPage() -> impl IntoView {
    let tab = RwSignal::new(StudioTab::Posts);
    let posts = RwSignal::new(Vec::<BlogPost>::new());
    let categories = RwSignal::new(Vec::<ResourceCategory>::new());
    let pending_delete = RwSignal::new(None::<PendingDelete>);
    let status = RwSignal::new(String::new());

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let (fetched_posts, fetched_resources) =
            futures::join!(crate::net::api::fetch_posts(), crate::net::api::fetch_resources());
        posts.set(fetched_posts);
        categories.set(fetched_resources);
    });

    let on_confirm_delete = Callback::new(move |()| {
        let Some(target) = pending_delete.get_untracked() else {
            return;
        };
        pending_delete.set(None);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match target {
                PendingDelete::Post { id, .. } => match crate::net::api::delete_post(&id).await {
                    Ok(()) => {
                        posts.update(|list| list.retain(|p| p.id != id));
                        status.set("Post deleted.".to_owned());
                    }
                    Err(e) => status.set(e),
                },
                PendingDelete::Resource { id, .. } => match crate::net::api::delete_resource(&id).await {
                    Ok(()) => {
                        categories.update(|c| remove_resource(c, &id));
                        status.set("Resource deleted.".to_owned());
                    }
                    Err(e) => status.set(e),
                },
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = target;
    });
    let on_cancel_delete = Callback::new(move |()| pending_delete.set(None));

    view! {
        <div class="creator-page">
            <header class="creator-page__header">
                <h2>"Creator Studio"</h2>
                <p>"Publish Spark Posts and upload study resources for students."</p>
            </header>
            <div class="tabs">
                <button
                    class="tab"
                    class:tab--active=move || tab.get() == StudioTab::Posts
                    on:click=move |_| tab.set(StudioTab::Posts)
                >
                    "Spark Posts"
                </button>
                <button
                    class="tab"
                    class:tab--active=move || tab.get() == StudioTab::Resources
                    on:click=move |_| tab.set(StudioTab::Resources)
                >
                    "Resources"
                </button>
            </div>
            <Show when=move || !status.get().is_empty()>
                <div class="banner">
                    <span>{move || status.get()}</span>
                    <button class="btn btn--icon" on:click=move |_| status.set(String::new())>"×"</button>
                </div>
            </Show>
            {move || match tab.get() {
                StudioTab::Posts => view! { <PostsStudio posts=posts pending_delete=pending_delete status=status/> }.into_any(),
                StudioTab::Resources => {
                    view! { <ResourcesStudio categories=categories pending_delete=pending_delete status=status/> }
                        .into_any()
                }
            }}
            {move || pending_delete.get().map(|target| view! {
                <ConfirmDialog
                    title="Confirm delete"
                    message=target.message()
                    on_confirm=on_confirm_delete
                    on_cancel=on_cancel_delete
                />
            })}
        </div>
    }
}

// =============================================================================
// POSTS
// =============================================================================

#[component]
fn PostsStudio(
    posts: RwSignal<Vec<BlogPost>>,
    pending_delete: RwSignal<Option<PendingDelete>>,
    status: RwSignal<String>,
) -> impl IntoView {
    let title = RwSignal::new(String::new());
    let subject = RwSignal::new(Subject::Biology);
    let image_url = RwSignal::new(String::new());
    let content = RwSignal::new(String::new());
    let preview = RwSignal::new(false);
    let editing = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let editor_ref = NodeRef::<leptos::html::Textarea>::new();

    let reset = move || {
        title.set(String::new());
        image_url.set(String::new());
        content.set(String::new());
        editing.set(None);
        preview.set(false);
    };

    let apply_format = move |format: Format| {
        let text = content.get_untracked();
        let (start, end) = current_selection(editor_ref, &text);
        let wrapped = editor::wrap_selection(&text, start, end, format);
        restore_selection(editor_ref, &wrapped);
        content.set(wrapped.text);
    };

    let start_edit = move |post: BlogPost| {
        let draft = PostDraft::from_post(&post);
        title.set(draft.title);
        subject.set(draft.subject);
        image_url.set(draft.image_url.unwrap_or_default());
        content.set(draft.content);
        editing.set(Some(post.id));
        preview.set(false);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let draft = match post_draft(&title.get_untracked(), &content.get_untracked(), subject.get_untracked(), &image_url.get_untracked()) {
            Ok(draft) => draft,
            Err(msg) => {
                status.set(msg.to_owned());
                return;
            }
        };
        let editing_id = editing.get_untracked();
        busy.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = match editing_id.as_deref() {
                Some(id) => crate::net::api::update_post(id, &draft).await,
                None => crate::net::api::create_post(&draft).await,
            };
            match result {
                Ok(saved) => {
                    let verb = if editing_id.is_some() { "updated" } else { "published" };
                    status.set(format!("Post \"{}\" {verb}.", saved.title));
                    posts.update(|list| upsert_post(list, saved));
                    reset();
                }
                Err(e) => status.set(e),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (draft, editing_id, posts);
    };

    view! {
        <div class="studio">
            <form class="studio__form" on:submit=on_submit>
                <h3>{move || if editing.get().is_some() { "Edit Spark Post" } else { "New Spark Post" }}</h3>
                <input
                    type="text"
                    placeholder="Post title"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <div class="studio__row">
                    <SubjectSelect value=subject/>
                    <input
                        type="url"
                        placeholder="Cover image URL (optional)"
                        prop:value=move || image_url.get()
                        on:input=move |ev| image_url.set(event_target_value(&ev))
                    />
                </div>
                <div class="editor">
                    <div class="editor__bar">
                        <button
                            type="button"
                            class="tab"
                            class:tab--active=move || !preview.get()
                            on:click=move |_| preview.set(false)
                        >
                            "Write"
                        </button>
                        <button
                            type="button"
                            class="tab"
                            class:tab--active=move || preview.get()
                            on:click=move |_| preview.set(true)
                        >
                            "Preview"
                        </button>
                        <span class="editor__spacer"></span>
                        <Show when=move || !preview.get()>
                            {Format::ALL
                                .into_iter()
                                .map(|format| view! {
                                    <button
                                        type="button"
                                        class="btn btn--icon"
                                        title=format.title()
                                        on:mousedown=move |ev| ev.prevent_default()
                                        on:click=move |_| apply_format(format)
                                    >
                                        {format.glyph()}
                                    </button>
                                })
                                .collect_view()}
                        </Show>
                    </div>
                    <Show
                        when=move || preview.get()
                        fallback=move || view! {
                            <textarea
                                class="editor__input"
                                rows="14"
                                node_ref=editor_ref
                                placeholder="Write your notes in markdown..."
                                prop:value=move || content.get()
                                on:input=move |ev| content.set(event_target_value(&ev))
                            ></textarea>
                        }
                    >
                        <div class="editor__preview">
                            <MarkdownView source=Signal::derive(move || content.get())/>
                        </div>
                    </Show>
                </div>
                <div class="studio__actions">
                    <Show when=move || editing.get().is_some()>
                        <button type="button" class="btn" on:click=move |_| reset()>"Cancel"</button>
                    </Show>
                    <button type="submit" class="btn btn--primary" disabled=move || busy.get()>
                        {move || if editing.get().is_some() { "Save Changes" } else { "Publish Post" }}
                    </button>
                </div>
            </form>

            <section class="studio__list">
                <h3>"Published Posts"</h3>
                <Show
                    when=move || posts.with(|p| !p.is_empty())
                    fallback=|| view! { <p class="muted">"No posts yet."</p> }
                >
                    {move || {
                        posts
                            .get()
                            .into_iter()
                            .map(|post| {
                                let edit_post = post.clone();
                                let delete_target = PendingDelete::Post { id: post.id.clone(), title: post.title.clone() };
                                view! {
                                    <div class="studio-item">
                                        <div class="studio-item__main">
                                            <span class="studio-item__title">{post.title.clone()}</span>
                                            <span class="studio-item__meta">
                                                {format!("{} · {} · ♥ {}", post.subject, post.date, post.likes)}
                                            </span>
                                        </div>
                                        <button class="btn btn--ghost" on:click=move |_| start_edit(edit_post.clone())>
                                            "Edit"
                                        </button>
                                        <button
                                            class="btn btn--danger-ghost"
                                            on:click=move |_| pending_delete.set(Some(delete_target.clone()))
                                        >
                                            "Delete"
                                        </button>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </Show>
            </section>
        </div>
    }
}

/// Selection of the editor textarea in UTF-16 units; caret at the end when
/// the element is unavailable.
fn current_selection(editor_ref: NodeRef<leptos::html::Textarea>, text: &str) -> (u32, u32) {
    let fallback = editor::utf16_len(text);
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = editor_ref.get_untracked() {
            let start = el.selection_start().ok().flatten().unwrap_or(fallback);
            let end = el.selection_end().ok().flatten().unwrap_or(start);
            return (start, end);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = editor_ref;
    (fallback, fallback)
}

fn restore_selection(editor_ref: NodeRef<leptos::html::Textarea>, wrapped: &editor::Wrapped) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = editor_ref.get_untracked() {
            el.set_value(&wrapped.text);
            let _ = el.focus();
            let _ = el.set_selection_range(wrapped.selection_start, wrapped.selection_end);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (editor_ref, wrapped);
}

#[component]
fn SubjectSelect(value: RwSignal<Subject>) -> impl IntoView {
    view! {
        <select
            prop:value=move || value.get().as_str()
            on:change=move |ev| {
                if let Some(subject) = Subject::parse(&event_target_value(&ev)) {
                    value.set(subject);
                }
            }
        >
            {Subject::ALL
                .into_iter()
                .map(|s| view! { <option value=s.as_str() selected=move || value.get() == s>{s.as_str()}</option> })
                .collect_view()}
        </select>
    }
}

// =============================================================================
// RESOURCES
// =============================================================================

#[component]
fn ResourcesStudio(
    categories: RwSignal<Vec<ResourceCategory>>,
    pending_delete: RwSignal<Option<PendingDelete>>,
    status: RwSignal<String>,
) -> impl IntoView {
    let fields = RwSignal::new(ResourceFields { category: Some(Subject::Biology), ..ResourceFields::default() });
    let subject = RwSignal::new(Subject::Biology);
    // (id, bucket the item was in when editing started)
    let editing = RwSignal::new(None::<(String, Subject)>);
    let busy = RwSignal::new(false);

    let reset = move || {
        fields.set(ResourceFields { category: Some(subject.get_untracked()), ..ResourceFields::default() });
        editing.set(None);
    };

    let start_edit = move |category: Subject, item: ResourceItem| {
        fields.set(ResourceFields::from_item(category, &item));
        subject.set(category);
        editing.set(Some((item.id, category)));
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let mut current = fields.get_untracked();
        current.category = Some(subject.get_untracked());
        let draft = match current.to_draft() {
            Ok(draft) => draft,
            Err(msg) => {
                status.set(msg.to_owned());
                return;
            }
        };
        let editing_target = editing.get_untracked();
        busy.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = match &editing_target {
                Some((id, original)) => crate::net::api::update_resource(id, &draft, *original).await,
                None => crate::net::api::create_resource(&draft).await,
            };
            match result {
                Ok(placed) => {
                    let verb = if editing_target.is_some() { "updated" } else { "uploaded" };
                    status.set(format!("Resource \"{}\" {verb}.", placed.item.title));
                    categories.update(|c| place_resource(c, placed));
                    reset();
                }
                Err(e) => status.set(e),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (draft, editing_target, categories);
    };

    view! {
        <div class="studio">
            <form class="studio__form" on:submit=on_submit>
                <h3>{move || if editing.get().is_some() { "Edit Resource" } else { "Upload Resource" }}</h3>
                <TextField fields=fields placeholder="Resource title" get=|f| &f.title set=|f, v| f.title = v/>
                <div class="studio__row">
                    <SubjectSelect value=subject/>
                    <select
                        prop:value=move || fields.with(|f| f.kind.as_str())
                        on:change=move |ev| {
                            if let Some(kind) = ResourceKind::parse(&event_target_value(&ev)) {
                                fields.update(|f| f.kind = kind);
                            }
                        }
                    >
                        {ResourceKind::ALL
                            .into_iter()
                            .map(|k| view! {
                                <option value=k.as_str() selected=move || fields.with(|f| f.kind == k)>{k.as_str()}</option>
                            })
                            .collect_view()}
                    </select>
                    <TextField fields=fields placeholder="Size (e.g. 2.4 MB)" get=|f| &f.size set=|f, v| f.size = v/>
                </div>
                <TextField fields=fields placeholder="File URL" get=|f| &f.url set=|f, v| f.url = v/>
                <textarea
                    rows="4"
                    placeholder="Description (optional)"
                    prop:value=move || fields.with(|f| f.description.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        fields.update(|f| f.description = value);
                    }
                ></textarea>
                <div class="studio__actions">
                    <Show when=move || editing.get().is_some()>
                        <button type="button" class="btn" on:click=move |_| reset()>"Cancel"</button>
                    </Show>
                    <button type="submit" class="btn btn--primary" disabled=move || busy.get()>
                        {move || if editing.get().is_some() { "Save Changes" } else { "Upload" }}
                    </button>
                </div>
            </form>

            <section class="studio__list">
                <h3>"Library"</h3>
                {move || {
                    categories
                        .get()
                        .into_iter()
                        .filter(|c| !c.items.is_empty())
                        .map(|bucket| {
                            let category = bucket.category;
                            view! {
                                <div class="studio-group">
                                    <h4>{category.as_str()}</h4>
                                    {bucket
                                        .items
                                        .into_iter()
                                        .map(|item| {
                                            let edit_item = item.clone();
                                            let delete_target = PendingDelete::Resource {
                                                id: item.id.clone(),
                                                title: item.title.clone(),
                                            };
                                            view! {
                                                <div class="studio-item">
                                                    <div class="studio-item__main">
                                                        <span class="studio-item__title">{item.title.clone()}</span>
                                                        <span class="studio-item__meta">
                                                            {format!("{} · {} · {} downloads", item.kind.as_str(), item.size, item.downloads)}
                                                        </span>
                                                    </div>
                                                    <button
                                                        class="btn btn--ghost"
                                                        on:click=move |_| start_edit(category, edit_item.clone())
                                                    >
                                                        "Edit"
                                                    </button>
                                                    <button
                                                        class="btn btn--danger-ghost"
                                                        on:click=move |_| pending_delete.set(Some(delete_target.clone()))
                                                    >
                                                        "Delete"
                                                    </button>
                                                </div>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </section>
        </div>
    }
}

/// One text input bound to a field of the resource form.
#[component]
fn TextField(
    fields: RwSignal<ResourceFields>,
    placeholder: &'static str,
    get: fn(&ResourceFields) -> &String,
    set: fn(&mut ResourceFields, String),
) -> impl IntoView {
    view! {
        <input
            type="text"
            placeholder=placeholder
            prop:value=move || fields.with(|f| get(f).clone())
            on:input=move |ev| {
                let value = event_target_value(&ev);
                fields.update(|f| set(f, value));
            }
        />
    }
}

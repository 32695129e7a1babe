//! AI Laboratory: scanner, video analyst, web search, image generator, and
//! the productivity widgets.
//!
//! Uploaded files are read into `data:` URLs in the browser and posted as-is;
//! the server splits media type and payload.

#[cfg(test)]
#[path = "tools_test.rs"]
mod tools_test;

use leptos::prelude::*;

use crate::components::calculator_pad::CalculatorPad;
use crate::components::markdown_view::MarkdownView;
use crate::components::study_timer::StudyTimerWidget;
use crate::components::whiteboard::WhiteboardPlaceholder;
use crate::net::types::SearchReply;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolTab {
    Scan,
    Video,
    Search,
    Generate,
}

impl ToolTab {
    pub const ALL: [Self; 4] = [Self::Scan, Self::Video, Self::Search, Self::Generate];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Scan => "📷 Scanner",
            Self::Video => "🎬 Video Analyst",
            Self::Search => "🔎 Web Search",
            Self::Generate => "🎨 Image Generator",
        }
    }
}

/// Optional prompt: blank input means "let the server pick its default".
#[must_use]
pub fn optional_prompt(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Media type of a `data:` URL (`data:video/mp4;base64,...` → `video/mp4`).
#[must_use]
pub fn data_url_mime(url: &str) -> Option<&str> {
    let header = url.strip_prefix("data:")?.split(',').next()?;
    let mime = header.split(';').next()?;
    (!mime.is_empty()).then_some(mime)
}

/// Read the selected file into `target` (and its mime type into `mime`).
fn upload_into(ev: &leptos::ev::Event, target: RwSignal<Option<String>>, mime: Option<RwSignal<String>>) {
    #[cfg(feature = "hydrate")]
    {
        let Some(file) = crate::util::browser::selected_file(ev) else {
            return;
        };
        if let Some(mime) = mime {
            mime.set(file.type_());
        }
        leptos::task::spawn_local(async move {
            match crate::util::browser::read_data_url(&file).await {
                Ok(url) => target.set(Some(url)),
                Err(e) => log::warn!("file read failed: {e}"),
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (ev, target, mime);
    }
}

#[component]
pub fn ToolsPage() -> impl IntoView {
    let tab = RwSignal::new(ToolTab::Scan);

    view! {
        <div class="tools-page">
            <header class="tools-page__header">
                <h2>"AI Laboratory"</h2>
                <p>"Advanced tools to assist your scientific studies."</p>
            </header>
            <div class="tabs">
                {ToolTab::ALL
                    .into_iter()
                    .map(|t| view! {
                        <button class="tab" class:tab--active=move || tab.get() == t on:click=move |_| tab.set(t)>
                            {t.label()}
                        </button>
                    })
                    .collect_view()}
            </div>
            <div class="tools-page__panel">
                {move || match tab.get() {
                    ToolTab::Scan => view! { <ScanPanel/> }.into_any(),
                    ToolTab::Video => view! { <VideoPanel/> }.into_any(),
                    ToolTab::Search => view! { <SearchPanel/> }.into_any(),
                    ToolTab::Generate => view! { <GeneratePanel/> }.into_any(),
                }}
            </div>
            <section class="tools-page__widgets">
                <h3>"Productivity"</h3>
                <div class="widget-grid">
                    <StudyTimerWidget/>
                    <CalculatorPad/>
                    <WhiteboardPlaceholder/>
                </div>
            </section>
        </div>
    }
}

#[component]
fn ScanPanel() -> impl IntoView {
    let image = RwSignal::new(None::<String>);
    let prompt = RwSignal::new(String::new());
    let result = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_scan = move |_| {
        let Some(data) = image.get_untracked() else {
            return;
        };
        let question = optional_prompt(&prompt.get_untracked());
        busy.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::analyze_image(&data, question.as_deref()).await {
                Ok(reply) => result.set(reply.text),
                Err(e) => result.set(format!("Analysis failed: {e}")),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (data, question);
    };

    view! {
        <div class="tool-panel">
            <div class="tool-panel__input">
                <label class="upload-box">
                    <input type="file" accept="image/*" on:change=move |ev| upload_into(&ev, image, None)/>
                    {move || match image.get() {
                        Some(src) => view! { <img class="upload-box__preview" src=src alt="Selected image"/> }.into_any(),
                        None => view! { <span>"Upload a diagram or question"</span> }.into_any(),
                    }}
                </label>
                <input
                    type="text"
                    placeholder="Ask a question about this image (Optional)"
                    prop:value=move || prompt.get()
                    on:input=move |ev| prompt.set(event_target_value(&ev))
                />
                <button
                    class="btn btn--primary"
                    disabled=move || image.get().is_none() || busy.get()
                    on:click=on_scan
                >
                    {move || if busy.get() { "Analyzing..." } else { "Analyze Image" }}
                </button>
            </div>
            <div class="tool-panel__output">
                <Show
                    when=move || !result.get().is_empty()
                    fallback=|| view! { <p class="muted">"Results will appear here."</p> }
                >
                    <MarkdownView source=Signal::derive(move || result.get())/>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn VideoPanel() -> impl IntoView {
    let video = RwSignal::new(None::<String>);
    let mime = RwSignal::new(String::new());
    let prompt = RwSignal::new(String::new());
    let result = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_analyze = move |_| {
        let Some(data) = video.get_untracked() else {
            return;
        };
        let mut mime_type = mime.get_untracked();
        if mime_type.is_empty() {
            mime_type = data_url_mime(&data).unwrap_or("video/mp4").to_owned();
        }
        let question = optional_prompt(&prompt.get_untracked());
        busy.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::analyze_video(&data, &mime_type, question.as_deref()).await {
                Ok(reply) => result.set(reply.text),
                Err(e) => result.set(format!("Analysis failed: {e}")),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (data, mime_type, question);
    };

    view! {
        <div class="tool-panel">
            <div class="tool-panel__input">
                <label class="upload-box">
                    <input type="file" accept="video/*" on:change=move |ev| upload_into(&ev, video, Some(mime))/>
                    {move || if video.get().is_some() {
                        view! { <span>"Video ready ✓"</span> }.into_any()
                    } else {
                        view! { <span>"Upload a short experiment or lecture clip"</span> }.into_any()
                    }}
                </label>
                <input
                    type="text"
                    placeholder="What should the AI look for in this video?"
                    prop:value=move || prompt.get()
                    on:input=move |ev| prompt.set(event_target_value(&ev))
                />
                <button
                    class="btn btn--primary"
                    disabled=move || video.get().is_none() || busy.get()
                    on:click=on_analyze
                >
                    {move || if busy.get() { "Analyzing..." } else { "Analyze Video" }}
                </button>
            </div>
            <div class="tool-panel__output">
                <Show
                    when=move || !result.get().is_empty()
                    fallback=|| view! { <p class="muted">"Results will appear here."</p> }
                >
                    <MarkdownView source=Signal::derive(move || result.get())/>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn SearchPanel() -> impl IntoView {
    let query = RwSignal::new(String::new());
    let reply = RwSignal::new(None::<SearchReply>);
    let busy = RwSignal::new(false);

    let run = move || {
        let text = query.get_untracked().trim().to_owned();
        if text.is_empty() || busy.get_untracked() {
            return;
        }
        busy.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::search(&text).await {
                Ok(found) => reply.set(Some(found)),
                Err(e) => reply.set(Some(SearchReply { text: format!("Search failed: {e}"), sources: Vec::new(), fallback: true })),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = text;
    };

    view! {
        <div class="tool-panel tool-panel--stacked">
            <div class="search-bar">
                <input
                    type="text"
                    placeholder="Search for recent scientific discoveries, definitions, or news..."
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            run();
                        }
                    }
                />
                <button class="btn btn--primary" disabled=move || busy.get() on:click=move |_| run()>
                    {move || if busy.get() { "Searching..." } else { "Search" }}
                </button>
            </div>
            {move || reply.get().map(|found| {
                let text = found.text.clone();
                view! {
                    <div class="search-result">
                        <MarkdownView source=Signal::derive(move || text.clone())/>
                        {(!found.sources.is_empty()).then(|| view! { <h4>"Sources"</h4> })}
                        <ul class="search-result__sources">
                            {found
                                .sources
                                .iter()
                                .map(|source| view! {
                                    <li>
                                        <a href=source.uri.clone() target="_blank" rel="noopener noreferrer">
                                            {source.title.clone()}
                                        </a>
                                    </li>
                                })
                                .collect_view()}
                        </ul>
                    </div>
                }
            })}
        </div>
    }
}

#[component]
fn GeneratePanel() -> impl IntoView {
    let prompt = RwSignal::new(String::new());
    let image = RwSignal::new(None::<String>);
    let message = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_generate = move |_| {
        let text = prompt.get_untracked().trim().to_owned();
        if text.is_empty() {
            return;
        }
        busy.set(true);
        message.set(String::new());
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::generate_image(&text).await {
                Ok(reply) => match reply.image {
                    Some(src) => image.set(Some(src)),
                    None => message.set("Image generation is unavailable right now.".to_owned()),
                },
                Err(e) => message.set(format!("Generation failed: {e}")),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = text;
    };

    view! {
        <div class="tool-panel">
            <div class="tool-panel__input">
                <textarea
                    rows="4"
                    placeholder="E.g., A detailed cross-section of a human heart labeled with aorta and ventricles..."
                    prop:value=move || prompt.get()
                    on:input=move |ev| prompt.set(event_target_value(&ev))
                ></textarea>
                <button
                    class="btn btn--primary"
                    disabled=move || prompt.get().trim().is_empty() || busy.get()
                    on:click=on_generate
                >
                    {move || if busy.get() { "Generating..." } else { "Generate Diagram" }}
                </button>
                <Show when=move || !message.get().is_empty()>
                    <p class="muted">{move || message.get()}</p>
                </Show>
            </div>
            <div class="tool-panel__output">
                {move || match image.get() {
                    Some(src) => view! { <img class="generated-image" src=src alt="Generated diagram"/> }.into_any(),
                    None => view! { <p class="muted">"Your diagram will appear here."</p> }.into_any(),
                }}
            </div>
        </div>
    }
}

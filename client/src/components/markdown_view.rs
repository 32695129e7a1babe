//! Sanitized markdown block.

use leptos::prelude::*;

use crate::util::markdown::render_markdown_html;

/// Render `source` as markdown inside a `.prose` container.
#[component]
pub fn MarkdownView(#[prop(into)] source: Signal<String>) -> impl IntoView {
    let html = Memo::new(move |_| render_markdown_html(&source.get()));
    view! { <div class="prose" inner_html=move || html.get()></div> }
}

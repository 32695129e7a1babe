//! Whiteboard placeholder shown beside the productivity widgets.

use leptos::prelude::*;

#[component]
pub fn WhiteboardPlaceholder() -> impl IntoView {
    view! {
        <div class="widget widget--whiteboard">
            <h3 class="widget__title">"Whiteboard"</h3>
            <div class="whiteboard__surface">
                <p>"A shared sketching board is coming soon."</p>
                <p class="widget__hint">"Use the Illustrator tab to generate diagrams meanwhile."</p>
            </div>
        </div>
    }
}

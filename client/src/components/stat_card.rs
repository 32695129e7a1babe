//! Dashboard statistic tile.

use leptos::prelude::*;

#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    #[prop(optional, into)] subtext: String,
) -> impl IntoView {
    view! {
        <div class="stat-card">
            <p class="stat-card__label">{label}</p>
            <h3 class="stat-card__value">{move || value.get()}</h3>
            {(!subtext.is_empty()).then(|| view! { <p class="stat-card__subtext">{subtext}</p> })}
        </div>
    }
}

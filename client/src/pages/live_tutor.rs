//! Live Tutor screen: realtime voice session controls and indicators.
//!
//! LIFECYCLE
//! =========
//! The session handle lives in a local `StoredValue` because it owns
//! browser-only audio objects. Leaving the screen disconnects.

use leptos::prelude::*;

use crate::state::live::LiveState;

#[component]
pub fn LiveTutorPage() -> impl IntoView {
    let live = expect_context::<RwSignal<LiveState>>();

    #[cfg(feature = "hydrate")]
    let session = StoredValue::new_local(None::<crate::net::live::LiveSession>);

    let on_connect = move |_| {
        if live.with_untracked(|s| s.connecting || s.connected) {
            return;
        }
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            if let Ok(started) = crate::net::live::LiveSession::connect(live).await {
                if let Some(previous) = session.try_update_value(|slot| slot.replace(started)).flatten() {
                    previous.disconnect();
                }
            }
        });
    };

    let on_disconnect = move |_| {
        #[cfg(feature = "hydrate")]
        if let Some(current) = session.try_update_value(Option::take).flatten() {
            current.disconnect();
        }
        live.update(|s| *s = s.disconnected());
    };

    #[cfg(feature = "hydrate")]
    on_cleanup(move || {
        if let Some(current) = session.try_update_value(Option::take).flatten() {
            current.disconnect();
        }
    });

    let active = move || live.with(|s| s.connected || s.connecting);

    view! {
        <div class="live-page">
            <header class="live-page__header">
                <h2>"Live Tutor"</h2>
                <p>"Talk to your AI tutor in real time. Ask questions out loud and get spoken explanations."</p>
            </header>

            <Show when=move || live.with(|s| s.error.is_some())>
                <div class="banner banner--error">
                    <span>{move || live.with(|s| s.error.clone().unwrap_or_default())}</span>
                    <button class="btn btn--icon" on:click=move |_| live.update(|s| s.error = None)>"×"</button>
                </div>
            </Show>

            <section class="live-card" class:live-card--active=active>
                <div
                    class="live-orb"
                    class:live-orb--listening=move || live.with(|s| s.user_speaking)
                    class:live-orb--speaking=move || live.with(|s| s.bot_speaking)
                >
                    {move || if live.with(|s| s.bot_speaking) { "🔊" } else { "🎙" }}
                </div>
                <p class="live-card__status">{move || live.with(LiveState::status_label)}</p>
                <div class="live-card__indicators">
                    <span class="indicator" class:indicator--on=move || live.with(|s| s.user_speaking)>"You"</span>
                    <span class="indicator" class:indicator--on=move || live.with(|s| s.bot_speaking)>"Tutor"</span>
                </div>
                <Show
                    when=active
                    fallback=move || view! {
                        <button class="btn btn--primary btn--lg" on:click=on_connect>"Start Session"</button>
                    }
                >
                    <button class="btn btn--danger btn--lg" on:click=on_disconnect>"End Session"</button>
                </Show>
            </section>

            <ul class="live-page__tips">
                <li>"Use headphones to avoid echo."</li>
                <li>"Speak naturally; you can interrupt the tutor at any time."</li>
                <li>"Your browser will ask for microphone access."</li>
            </ul>
        </div>
    }
}

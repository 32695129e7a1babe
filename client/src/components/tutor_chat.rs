//! Lesson-scoped AI tutor chat.
//!
//! The transcript is kept per lesson in localStorage so a reload does not
//! lose the conversation. The opening greeting is part of the transcript;
//! the server drops leading tutor turns before calling the model.

use leptos::prelude::*;

use crate::net::types::ChatTurn;
use crate::util::ui_persistence;

pub const GREETING: &str = "Hello! I'm your AI Tutor. Ask me anything about this lesson.";
pub const QUICK_SUGGESTION: &str = "Can you explain the key idea of this lesson simply?";

/// Suggestion chip is offered only at the start of a conversation.
#[must_use]
pub fn shows_suggestion(turns: usize) -> bool {
    turns < 3
}

#[component]
pub fn TutorChat(#[prop(into)] lesson_id: String, #[prop(into)] context: Signal<String>) -> impl IntoView {
    let storage_key = ui_persistence::lesson_chat_key(&lesson_id);
    let messages = RwSignal::new(vec![ChatTurn::model(GREETING)]);
    let input = RwSignal::new(String::new());
    let loading = RwSignal::new(false);
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    {
        let key = storage_key.clone();
        Effect::new(move |_| {
            if let Some(saved) = ui_persistence::load_json::<Vec<ChatTurn>>(&key) {
                if !saved.is_empty() {
                    messages.set(saved);
                }
            }
        });
    }

    Effect::new(move |_| {
        let _ = messages.with(Vec::len);
        if let Some(el) = messages_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    let send = Callback::new(move |()| {
        let text = input.get_untracked().trim().to_owned();
        if text.is_empty() || loading.get_untracked() {
            return;
        }
        let history = messages.get_untracked();
        messages.update(|m| m.push(ChatTurn::user(text.clone())));
        input.set(String::new());
        loading.set(true);

        #[cfg(feature = "hydrate")]
        {
            let key = storage_key.clone();
            let lesson = context.get_untracked();
            leptos::task::spawn_local(async move {
                let reply = match crate::net::api::ask_tutor(&history, &text, Some(&lesson)).await {
                    Ok(reply) => reply.text,
                    Err(e) => {
                        log::warn!("tutor request failed: {e}");
                        "I'm having trouble connecting to the tutor right now. Please try again.".to_owned()
                    }
                };
                messages.update(|m| m.push(ChatTurn::model(reply)));
                loading.set(false);
                ui_persistence::save_json(&key, &messages.get_untracked());
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (history, &storage_key, context);
        }
    });

    view! {
        <div class="tutor-chat">
            <div class="tutor-chat__header">
                <span class="tutor-chat__bot">"🤖"</span>
                <span class="tutor-chat__title">"Ask Knix Tutor"</span>
            </div>
            <div class="tutor-chat__messages" node_ref=messages_ref>
                <For
                    each=move || messages.get().into_iter().enumerate()
                    key=|(idx, _)| *idx
                    children=|(_, turn)| {
                        let class = if turn.is_user() { "bubble bubble--user" } else { "bubble bubble--tutor" };
                        view! { <div class=class>{turn.text}</div> }
                    }
                />
                <Show when=move || loading.get()>
                    <div class="bubble bubble--tutor bubble--typing">
                        <span></span>
                        <span></span>
                        <span></span>
                    </div>
                </Show>
            </div>
            <div class="tutor-chat__composer">
                <Show when=move || shows_suggestion(messages.with(Vec::len))>
                    <button class="chip chip--suggestion" on:click=move |_| input.set(QUICK_SUGGESTION.to_owned())>
                        {QUICK_SUGGESTION}
                    </button>
                </Show>
                <div class="tutor-chat__input-row">
                    <input
                        type="text"
                        placeholder="Type a message..."
                        prop:value=move || input.get()
                        on:input=move |ev| input.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                send.run(());
                            }
                        }
                    />
                    <button
                        class="btn btn--primary"
                        disabled=move || input.get().trim().is_empty() || loading.get()
                        on:click=move |_| send.run(())
                    >
                        "Send"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tutor_chat_test {
    use super::*;

    #[test]
    fn suggestion_shows_for_short_conversations() {
        assert!(shows_suggestion(1));
        assert!(shows_suggestion(2));
        assert!(!shows_suggestion(3));
    }
}

//! Keypad calculator widget backed by `util::calculator`.

use leptos::prelude::*;

use crate::util::calculator::{evaluate, format_result};

const KEYS: [&str; 20] = [
    "(", ")", "%", "÷", "7", "8", "9", "×", "4", "5", "6", "-", "1", "2", "3", "+", "0", ".", "^", "=",
];

#[component]
pub fn CalculatorPad() -> impl IntoView {
    let display = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    let run = move || {
        let expr = display.get_untracked();
        match evaluate(&expr) {
            Ok(value) => {
                display.set(format_result(value));
                error.set(None);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    let press = move |key: &'static str| {
        if key == "=" {
            run();
        } else {
            error.set(None);
            display.update(|d| d.push_str(key));
        }
    };

    view! {
        <div class="widget widget--calculator">
            <h3 class="widget__title">"Calculator"</h3>
            <input
                class="calculator__display"
                type="text"
                prop:value=move || display.get()
                on:input=move |ev| display.set(event_target_value(&ev))
                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        ev.prevent_default();
                        run();
                    }
                }
            />
            <Show when=move || error.get().is_some()>
                <p class="calculator__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <div class="calculator__keys">
                <button class="btn calculator__key calculator__key--clear" on:click=move |_| {
                    display.set(String::new());
                    error.set(None);
                }>
                    "C"
                </button>
                <button class="btn calculator__key" on:click=move |_| display.update(|d| {
                    d.pop();
                })>
                    "⌫"
                </button>
                {KEYS
                    .into_iter()
                    .map(|key| view! {
                        <button class="btn calculator__key" on:click=move |_| press(key)>
                            {key}
                        </button>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

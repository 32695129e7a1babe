//! Focus/break study timer widget.

use leptos::prelude::*;

use crate::util::timer::{Phase, StudyTimer, format_clock};

#[component]
pub fn StudyTimerWidget() -> impl IntoView {
    let timer = RwSignal::new(StudyTimer::default());

    #[cfg(feature = "hydrate")]
    {
        let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let alive_task = alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_secs(1)).await;
                if !alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                    break;
                }
                if timer.with_untracked(|t| t.running) {
                    let mut finished = false;
                    timer.update(|t| finished = t.tick());
                    if finished {
                        log::info!("study timer phase finished");
                    }
                }
            }
        });
        on_cleanup(move || alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    let phase_button = move |phase: Phase| {
        view! {
            <button
                class="chip"
                class:chip--active=move || timer.get().phase == phase
                on:click=move |_| timer.update(|t| t.switch_to(phase))
            >
                {phase.label()}
            </button>
        }
    };

    view! {
        <div class="widget widget--timer">
            <h3 class="widget__title">"Study Timer"</h3>
            <div class="widget__chips">{phase_button(Phase::Focus)} {phase_button(Phase::Break)}</div>
            <div class="timer__clock">{move || format_clock(timer.get().remaining)}</div>
            <div class="timer__bar">
                <div
                    class="timer__fill"
                    style:width=move || format!("{:.1}%", timer.get().progress() * 100.0)
                ></div>
            </div>
            <div class="widget__actions">
                <button class="btn btn--primary" on:click=move |_| timer.update(StudyTimer::toggle)>
                    {move || if timer.get().running { "Pause" } else { "Start" }}
                </button>
                <button class="btn" on:click=move |_| timer.update(StudyTimer::reset)>
                    "Reset"
                </button>
            </div>
            <p class="widget__hint">
                {move || format!("Focus sessions completed: {}", timer.get().completed_focus)}
            </p>
        </div>
    }
}

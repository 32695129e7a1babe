//! Public landing page: hero, features, how-it-works steps, call to action.

use leptos::prelude::*;

use crate::router::use_router;

const FEATURES: [(&str, &str, &str); 6] = [
    ("📝", "Spark Posts", "Short, focused study notes written by experienced A/L teachers."),
    ("📚", "Resource Library", "Past papers, model papers, and summaries sorted by subject."),
    ("🤖", "AI Tutor", "Ask questions about any lesson and get patient, clear explanations."),
    ("🎙", "Live Voice Tutor", "Talk through hard problems out loud in real time."),
    ("📷", "Homework Scanner", "Snap a question and get a step-by-step walkthrough."),
    ("⏱", "Study Tools", "Focus timer, calculator, and more in one place."),
];

const STEPS: [(&str, &str); 4] = [
    ("Create an account", "Sign in with your email to save your progress."),
    ("Pick your subjects", "Biology, Physics, Chemistry, Combined Maths, or ICT."),
    ("Learn from Spark Posts", "Read notes and download resources for every unit."),
    ("Ask the AI Tutor", "Clear doubts instantly, by text or by voice."),
];

#[component]
pub fn LandingPage() -> impl IntoView {
    let router = use_router();
    let to_login = move |_| router.navigate("/login");

    view! {
        <div class="landing">
            <nav class="landing__nav">
                <span class="landing__brand">"★ Knix"</span>
                <button class="btn btn--outline" on:click=to_login>"Log in"</button>
            </nav>

            <section class="landing__hero">
                <span class="landing__badge">"For Sri Lankan A/L students"</span>
                <h1>"Master your A/Ls with " <span class="accent">"Knix"</span></h1>
                <p>
                    "Notes, past papers, and an AI tutor that explains every concept in plain language."
                </p>
                <div class="landing__hero-actions">
                    <button class="btn btn--primary btn--lg" on:click=to_login>"Start Learning"</button>
                    <button class="btn btn--ghost btn--lg" on:click=move |_| router.navigate("/dashboard")>
                        "Explore as Guest"
                    </button>
                </div>
            </section>

            <section class="landing__features">
                <h2>"Everything you need to study smarter"</h2>
                <div class="landing__grid">
                    {FEATURES
                        .into_iter()
                        .map(|(icon, title, text)| view! {
                            <div class="feature-card">
                                <span class="feature-card__icon">{icon}</span>
                                <h3>{title}</h3>
                                <p>{text}</p>
                            </div>
                        })
                        .collect_view()}
                </div>
            </section>

            <section class="landing__steps">
                <h2>"How it works"</h2>
                <ol class="steps">
                    {STEPS
                        .into_iter()
                        .enumerate()
                        .map(|(idx, (title, text))| view! {
                            <li class="step">
                                <span class="step__number">{idx + 1}</span>
                                <h3>{title}</h3>
                                <p>{text}</p>
                            </li>
                        })
                        .collect_view()}
                </ol>
            </section>

            <section class="landing__cta">
                <h2>"Ready to ace your exams?"</h2>
                <p>"Join thousands of students preparing for the A/L examination."</p>
                <button class="btn btn--primary btn--lg" on:click=to_login>"Get Started Free"</button>
            </section>

            <footer class="landing__footer">
                <span>"© Knix Education"</span>
                <span>"Made for A/L students in Sri Lanka"</span>
            </footer>
        </div>
    }
}

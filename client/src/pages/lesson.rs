//! Lesson view for `/course/:id`: the post as a lesson plus the AI tutor.

#[cfg(test)]
#[path = "lesson_test.rs"]
mod lesson_test;

use leptos::prelude::*;

use crate::components::markdown_view::MarkdownView;
use crate::components::tutor_chat::TutorChat;
use crate::net::types::BlogPost;
use crate::router::use_router;

/// Text the tutor receives as lesson context.
#[must_use]
pub fn lesson_context(post: &BlogPost) -> String {
    format!("Lesson: {} ({})\n\n{}", post.title, post.subject, post.content)
}

/// Lookup state for the requested lesson.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LessonLookup {
    Loading,
    Found(BlogPost),
    Missing,
}

#[must_use]
pub fn find_lesson(posts: &[BlogPost], id: &str) -> LessonLookup {
    posts
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map_or(LessonLookup::Missing, LessonLookup::Found)
}

#[component]
pub fn LessonPage(#[prop(into)] id: String) -> impl IntoView {
    let router = use_router();
    let lookup = RwSignal::new(LessonLookup::Loading);

    #[cfg(feature = "hydrate")]
    {
        let id = id.clone();
        leptos::task::spawn_local(async move {
            let posts = crate::net::api::fetch_posts().await;
            lookup.set(find_lesson(&posts, &id));
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = &id;

    view! {
        <div class="lesson-page">
            <button class="btn btn--link" on:click=move |_| router.navigate("/dashboard")>"← Back to Dashboard"</button>
            {move || match lookup.get() {
                LessonLookup::Loading => view! { <p class="muted">"Loading lesson..."</p> }.into_any(),
                LessonLookup::Missing => view! {
                    <div class="empty-state">
                        <h3>"Lesson not found"</h3>
                        <p>"This lesson may have been removed."</p>
                    </div>
                }
                .into_any(),
                LessonLookup::Found(post) => render_lesson(post).into_any(),
            }}
        </div>
    }
}

fn render_lesson(post: BlogPost) -> impl IntoView {
    let notes: Vec<String> = post.note_lines().map(str::to_owned).collect();
    let context = lesson_context(&post);
    let body = post.content.clone();

    view! {
        <div class="lesson">
            <article class="lesson__main">
                {post.image_url.clone().map(|src| view! { <img class="lesson__cover" src=src alt=post.title.clone()/> })}
                <div class="lesson__meta">
                    <span class="lesson__subject">{post.subject.as_str()}</span>
                    <span>{post.author.clone()}</span>
                    <span>{post.date.clone()}</span>
                </div>
                <h2 class="lesson__title">{post.title.clone()}</h2>
                <MarkdownView source=Signal::derive(move || body.clone())/>
                <section class="lesson__notes">
                    <h3>"Notes"</h3>
                    <ul>
                        {notes.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                    </ul>
                </section>
            </article>
            <aside class="lesson__tutor">
                <TutorChat lesson_id=post.id.clone() context=Signal::derive(move || context.clone())/>
            </aside>
        </div>
    }
}

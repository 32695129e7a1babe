//! Spark Post card used by the dashboard feed and subject pages.

use leptos::prelude::*;

use crate::components::markdown_view::MarkdownView;
use crate::net::types::BlogPost;
use crate::router::use_router;

/// One post with date, subject, body, and like/share/open actions.
///
/// `on_like` is omitted where liking is not offered.
#[component]
pub fn PostCard(
    post: BlogPost,
    #[prop(optional)] on_like: Option<Callback<String>>,
    #[prop(optional)] on_share: Option<Callback<String>>,
) -> impl IntoView {
    let router = use_router();
    let course_path = format!("/course/{}", post.id);
    let like_id = post.id.clone();
    let share_title = post.title.clone();
    let content = Signal::derive({
        let body = post.content.clone();
        move || body.clone()
    });

    view! {
        <article class="post-card">
            {post.image_url.clone().map(|src| view! {
                <div class="post-card__media">
                    <img src=src alt=post.title.clone()/>
                </div>
            })}
            <div class="post-card__body">
                <div class="post-card__meta">
                    <span class="post-card__subject">{post.subject.as_str()}</span>
                    <span class="post-card__date">{post.date.clone()}</span>
                    <span class="post-card__author">{post.author.clone()}</span>
                </div>
                <h3 class="post-card__title">{post.title.clone()}</h3>
                <MarkdownView source=content/>
                <div class="post-card__actions">
                    {on_like.map(|cb| {
                        let id = like_id.clone();
                        view! {
                            <button class="btn btn--ghost" title="Like" on:click=move |_| cb.run(id.clone())>
                                "♥ " {post.likes}
                            </button>
                        }
                    })}
                    {on_share.map(|cb| {
                        let title = share_title.clone();
                        view! {
                            <button class="btn btn--ghost" title="Share" on:click=move |_| cb.run(title.clone())>
                                "Share"
                            </button>
                        }
                    })}
                    <button class="btn btn--link" on:click=move |_| router.navigate(&course_path)>
                        "Read Note →"
                    </button>
                </div>
            </div>
        </article>
    }
}

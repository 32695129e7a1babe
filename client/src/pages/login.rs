//! Email sign-in page.
//!
//! Signing in with an unknown email registers a student account. The landing
//! route after sign-in depends on the returned role.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use catalog::Role;
use leptos::prelude::*;

use crate::router::use_router;
use crate::state::auth::AuthState;

/// Validate the form, returning the trimmed email and optional name.
///
/// # Errors
///
/// Returns the message to show under the form.
pub fn validate_login(email: &str, name: &str) -> Result<(String, Option<String>), &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Enter your email address.");
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err("Enter a valid email address.");
    };
    if local.is_empty() || !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err("Enter a valid email address.");
    }
    let name = name.trim();
    let name = (!name.is_empty()).then(|| name.to_owned());
    Ok((email.to_owned(), name))
}

/// Screen a user lands on right after signing in.
#[must_use]
pub fn home_for(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin",
        Role::ContentCreator => "/creator",
        Role::Student => "/dashboard",
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let router = use_router();
    let email = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, name_value) = match validate_login(&email.get(), &name.get()) {
            Ok(values) => values,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::login(&email_value, name_value.as_deref()).await {
                Ok(user) => {
                    let target = home_for(user.role);
                    auth.set(AuthState { user: Some(user), loading: false });
                    info.set(String::new());
                    router.navigate(target);
                }
                Err(e) => info.set(format!("Sign in failed: {e}")),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email_value, name_value, auth, router);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <button class="btn btn--link login-card__back" on:click=move |_| router.navigate("/")>
                    "← Back"
                </button>
                <h1>"★ Knix"</h1>
                <p class="login-card__subtitle">"Sign in to continue learning"</p>
                <form class="login-form" on:submit=on_submit>
                    <label class="login-label">"Email"</label>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <label class="login-label">"Display name (optional)"</label>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Kasun Perera"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}

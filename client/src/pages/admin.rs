//! System Admin: platform stats and user management.
//!
//! Admin-only (gated by the router). Role changes and deletes are applied to
//! the local table only after the server confirms them.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use leptos::prelude::*;

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::stat_card::StatCard;
use crate::net::types::{CatalogStats, NewUser, Role, User};
use crate::state::auth::AuthState;

/// Build the add-user payload from raw form fields.
///
/// # Errors
///
/// Returns the message shown above the form.
pub fn new_user(name: &str, email: &str, role: Role) -> Result<NewUser, &'static str> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() {
        return Err("Name is required.");
    }
    if email.is_empty() || !email.contains('@') {
        return Err("A valid email is required.");
    }
    Ok(NewUser { name: name.to_owned(), email: email.to_lowercase(), role })
}

/// Replace a user row with the server's copy.
pub fn replace_user(users: &mut [User], updated: User) {
    if let Some(slot) = users.iter_mut().find(|u| u.id == updated.id) {
        *slot = updated;
    }
}

fn admin_stat(stats: RwSignal<Option<CatalogStats>>, label: &'static str, read: fn(&CatalogStats) -> String) -> impl IntoView {
    let value = Signal::derive(move || stats.with(|s| s.as_ref().map_or_else(|| "—".to_owned(), read)));
    view! { <StatCard label=label value=value/> }
}

/// Admins may not delete their own account.
#[must_use]
pub fn can_delete(current: Option<&str>, target: &str) -> bool {
    current != Some(target)
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let users = RwSignal::new(Vec::<User>::new());
    let stats = RwSignal::new(None::<CatalogStats>);
    let status = RwSignal::new(String::new());
    let pending_delete = RwSignal::new(None::<User>);

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Student);
    let busy = RwSignal::new(false);

    let refresh_stats = move || {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            stats.set(crate::net::api::fetch_stats().await);
        });
    };

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_users().await {
            Ok(list) => users.set(list),
            Err(e) => status.set(e),
        }
    });
    refresh_stats();

    let current_id = move || auth.with(|a| a.user.as_ref().map(|u| u.id.clone()));

    let change_role = move |id: String, next: Role| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::update_user_role(&id, next).await {
                Ok(updated) => {
                    status.set(format!("{} is now {}.", updated.name, updated.role.label()));
                    users.update(|list| replace_user(list, updated));
                    refresh_stats();
                }
                Err(e) => status.set(e),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (id, next);
    };

    let on_confirm_delete = Callback::new(move |()| {
        let Some(target) = pending_delete.get_untracked() else {
            return;
        };
        pending_delete.set(None);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_user(&target.id).await {
                Ok(()) => {
                    users.update(|list| list.retain(|u| u.id != target.id));
                    status.set(format!("Removed {}.", target.name));
                    refresh_stats();
                }
                Err(e) => status.set(e),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = target;
    });
    let on_cancel_delete = Callback::new(move |()| pending_delete.set(None));

    let on_add = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let payload = match new_user(&name.get_untracked(), &email.get_untracked(), role.get_untracked()) {
            Ok(payload) => payload,
            Err(msg) => {
                status.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::create_user(&payload).await {
                Ok(user) => {
                    status.set(format!("Added {}.", user.name));
                    users.update(|list| list.push(user));
                    name.set(String::new());
                    email.set(String::new());
                    role.set(Role::Student);
                    refresh_stats();
                }
                Err(e) => status.set(e),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = payload;
    };

    view! {
        <div class="admin-page">
            <header class="admin-page__header">
                <h2>"System Admin"</h2>
                <p>"Manage users, roles, and platform health."</p>
            </header>

            <section class="admin-page__stats">
                {admin_stat(stats, "Total Users", |s| s.users.to_string())}
                {admin_stat(stats, "Students", |s| s.students.to_string())}
                {admin_stat(stats, "Creators", |s| s.creators.to_string())}
                {admin_stat(stats, "Admins", |s| s.admins.to_string())}
                {admin_stat(stats, "Spark Posts", |s| s.posts.to_string())}
                {admin_stat(stats, "Downloads", |s| s.downloads.to_string())}
            </section>

            <Show when=move || !status.get().is_empty()>
                <div class="banner">
                    <span>{move || status.get()}</span>
                    <button class="btn btn--icon" on:click=move |_| status.set(String::new())>"×"</button>
                </div>
            </Show>

            <div class="admin-page__columns">
                <section class="admin-page__users">
                    <h3>"Users"</h3>
                    <table class="user-table">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Email"</th>
                                <th>"Role"</th>
                                <th>"Joined"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || users.get()
                                key=|u| (u.id.clone(), u.role)
                                children=move |user| {
                                    let id = user.id.clone();
                                    let row_id = user.id.clone();
                                    let delete_target = user.clone();
                                    let current_role = user.role;
                                    view! {
                                        <tr>
                                            <td>{user.name.clone()}</td>
                                            <td>{user.email.clone()}</td>
                                            <td>
                                                <select on:change=move |ev| {
                                                    if let Some(next) = Role::parse(&event_target_value(&ev)) {
                                                        if next != current_role {
                                                            change_role(id.clone(), next);
                                                        }
                                                    }
                                                }>
                                                    {Role::ALL
                                                        .into_iter()
                                                        .map(|r| view! {
                                                            <option value=r.as_str() selected={r == current_role}>{r.label()}</option>
                                                        })
                                                        .collect_view()}
                                                </select>
                                            </td>
                                            <td>{user.joined_date.clone()}</td>
                                            <td>
                                                <button
                                                    class="btn btn--danger-ghost"
                                                    disabled=move || !can_delete(current_id().as_deref(), &row_id)
                                                    on:click=move |_| pending_delete.set(Some(delete_target.clone()))
                                                >
                                                    "Delete"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </section>

                <form class="admin-page__add" on:submit=on_add>
                    <h3>"Add User"</h3>
                    <input
                        type="text"
                        placeholder="Full name"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                    <input
                        type="email"
                        placeholder="Email address"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <select on:change=move |ev| {
                        if let Some(next) = Role::parse(&event_target_value(&ev)) {
                            role.set(next);
                        }
                    }>
                        {Role::ALL
                            .into_iter()
                            .map(|r| view! {
                                <option value=r.as_str() selected=move || role.get() == r>{r.label()}</option>
                            })
                            .collect_view()}
                    </select>
                    <button type="submit" class="btn btn--primary" disabled=move || busy.get()>"Add User"</button>
                </form>
            </div>

            {move || pending_delete.get().map(|user| view! {
                <ConfirmDialog
                    title="Delete user"
                    message=format!("Remove {} ({}) from Knix? This cannot be undone.", user.name, user.email)
                    on_confirm=on_confirm_delete
                    on_cancel=on_cancel_delete
                />
            })}
        </div>
    }
}

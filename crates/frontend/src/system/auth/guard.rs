use leptos::prelude::*;

use super::context::use_auth;

/// Component that requires authentication
/// Shows fallback if not authenticated
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().is_authenticated()
            fallback=|| view! { <div class="alert alert--error">"Not authenticated. Please login."</div> }
        >
            {children()}
        </Show>
    }
}

/// Component that requires a network-wide (super) admin
#[component]
pub fn RequireSuperAdmin(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || {
                auth_state
                    .get()
                    .admin
                    .as_ref()
                    .map(|a| a.is_super_admin())
                    .unwrap_or(false)
            }
            fallback=|| view! { <div class="alert alert--error">"Access denied. Network admin privileges required."</div> }
        >
            {children()}
        </Show>
    }
}

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, set_auth_state) = use_auth();

    let admin_name = move || {
        auth_state
            .get()
            .admin
            .map(|a| {
                if a.store_name.is_empty() {
                    a.name
                } else {
                    format!("{} · {}", a.name, a.store_name)
                }
            })
            .unwrap_or_default()
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button class="top-header__icon-btn" on:click=move |_| ctx.toggle_left() title="Toggle navigation">
                    {icon("dashboard")}
                </button>
                <span class="top-header__title">"Storefront Network Console"</span>
            </div>
            <div class="top-header__actions">
                <span class="top-header__user">{admin_name}</span>
                <button class="top-header__icon-btn" on:click=move |_| do_logout(set_auth_state) title="Sign out">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}

//! Боковая навигация по разделам консоли

use crate::layout::global_context::{AppGlobalContext, Section};
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();

    let is_super_admin = move || {
        auth_state
            .get()
            .admin
            .as_ref()
            .map(|a| a.is_super_admin())
            .unwrap_or(false)
    };

    view! {
        <div class="app-sidebar__content">
            {Section::all()
                .into_iter()
                .map(|section| {
                    let visible = move || is_super_admin() || section.is_store_level();
                    view! {
                        <Show when=visible>
                            <div
                                class="app-sidebar__item"
                                class:app-sidebar__item--active=move || ctx.active.get() == section
                                on:click=move |_| ctx.open(section)
                            >
                                <div class="app-sidebar__item-content">
                                    {icon(section.icon())}
                                    <span>{section.label()}</span>
                                </div>
                            </div>
                        </Show>
                    }
                })
                .collect_view()}
        </div>
    }
}

pub mod global_context;
pub mod sidebar;
pub mod top_header;

use global_context::{AppGlobalContext, Section};
use leptos::prelude::*;
use sidebar::Sidebar;
use top_header::TopHeader;

use crate::dashboards::d400_global_overview::ui::GlobalOverview;
use crate::dashboards::d401_store_analytics::ui::StoreAnalyticsPage;
use crate::dashboards::d402_sales_overview::ui::SalesOverview;
use crate::domain::a001_store::ui::list::StoreList;
use crate::domain::a002_admin::ui::list::AdminList;
use crate::domain::a003_order::ui::list::OrderList;
use crate::system::auth::context::use_auth;

/// Main application shell.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                   |
/// +------------------------------------------+
/// |  Sidebar  |         Active section       |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    ctx.init_router_integration();

    let (auth_state, _) = use_auth();
    Effect::new(move |_| {
        let super_admin = auth_state.with(|a| a.admin.as_ref().map(|s| s.is_super_admin()).unwrap_or(false));
        if !super_admin && !ctx.active.get().is_store_level() {
            ctx.open(Section::Orders);
        }
    });

    // each section mounts its own controller, so switching remounts and reloads
    let content = move || match ctx.active.get() {
        Section::GlobalOverview => view! { <GlobalOverview /> }.into_any(),
        Section::Stores => view! { <StoreList /> }.into_any(),
        Section::StoreAnalytics => view! { <StoreAnalyticsPage /> }.into_any(),
        Section::Admins => view! { <AdminList /> }.into_any(),
        Section::Orders => view! { <OrderList /> }.into_any(),
        Section::SalesOverview => view! { <SalesOverview /> }.into_any(),
    };

    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body">
                <Show when=move || ctx.left_open.get()>
                    <aside class="app-sidebar">
                        <Sidebar />
                    </aside>
                </Show>
                <main class="app-main">{content}</main>
            </div>
        </div>
    }
}

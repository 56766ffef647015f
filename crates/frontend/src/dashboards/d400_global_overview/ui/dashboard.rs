use std::rc::Rc;

use contracts::enums::{ClosedStatus, StoreStatus};
use contracts::shared::indicators::ValueFormat;
use leptos::prelude::*;
use view_model::entities::{global_stats, store_status_spec};
use view_model::{ControllerOptions, FilterMode, ListController, ViewStatus};

use crate::domain::a001_store::api::StoreApi;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::stat_card::StatCard;
use crate::shared::components::status_badge::{status_badge, ErrorBanner};
use crate::shared::config::config;
use crate::shared::format::{format_datetime_opt, format_money};
use crate::shared::list_utils::use_list_controller;
use crate::system::auth::guard::RequireSuperAdmin;
use crate::system::auth::storage::StorageTokenSource;

const TOP_STORES: usize = 5;

#[component]
pub fn GlobalOverview() -> impl IntoView {
    view! {
        <RequireSuperAdmin>
            <GlobalOverviewDashboard />
        </RequireSuperAdmin>
    }
}

/// Сводка по сети. Все показатели считаются из загруженного списка магазинов.
#[component]
fn GlobalOverviewDashboard() -> impl IntoView {
    let cfg = config();
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let controller = ListController::new(
        StoreApi,
        Rc::new(StorageTokenSource),
        ControllerOptions {
            filter_mode: FilterMode::Client,
            page_size: cfg.list.client_page_size,
            optimistic_status: false,
            reload_after_mutation: false,
        },
    )
    .with_aggregates(store_status_spec());
    let list = use_list_controller(controller);
    let snapshot = list.snapshot;
    let symbol = cfg.display.currency_symbol.clone();

    // `None` until the first load finished, so cards show a placeholder
    let stats = Memo::new(move |_| {
        let loaded = snapshot.with(|s| s.status == ViewStatus::Ready || s.loaded_count > 0);
        loaded.then(|| global_stats(&list.records()))
    });

    let top_stores = Memo::new(move |_| {
        let mut stores = list.records();
        stores.sort_by(|a, b| b.revenue.total.total_cmp(&a.revenue.total));
        stores.truncate(TOP_STORES);
        stores
    });

    let success_rate = move || {
        stats.get().and_then(|s| {
            (s.total_stores > 0).then(|| s.active_stores as f64 / s.total_stores as f64 * 100.0)
        })
    };

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Global Overview"</h1>
                </div>
            </div>

            <div class="page__content">
                <ErrorBanner
                    message=Signal::derive(move || snapshot.with(|s| s.error_message()))
                    on_retry=Callback::new(move |_| list.retry())
                />

                <div class="stat-grid">
                    <StatCard
                        label="Total Revenue"
                        icon_name="dollar-sign"
                        value=Signal::derive(move || stats.get().map(|s| s.total_revenue))
                        format=ValueFormat::Money { symbol: symbol.clone() }
                    />
                    <StatCard
                        label="Commission Earned"
                        icon_name="percent"
                        value=Signal::derive(move || stats.get().map(|s| s.total_commission))
                        format=ValueFormat::Money { symbol: symbol.clone() }
                    />
                    <StatCard
                        label="Total Orders"
                        icon_name="orders"
                        value=Signal::derive(move || stats.get().map(|s| s.total_orders))
                        format=ValueFormat::Integer
                    />
                    <StatCard
                        label="Active Stores"
                        icon_name="store"
                        value=Signal::derive(move || stats.get().map(|s| s.active_stores as f64))
                        format=ValueFormat::Integer
                        subtitle=Signal::derive(move || {
                            stats
                                .get()
                                .map(|s| format!("of {} stores", s.total_stores))
                                .unwrap_or_default()
                        })
                    />
                    <StatCard
                        label="Store Success Rate"
                        icon_name="activity"
                        value=Signal::derive(success_rate)
                        format=ValueFormat::Percent { decimals: 0 }
                    />
                </div>

                <div class="dashboard-grid">
                    <div class="card">
                        <h2 class="card__title">"Store Status Overview"</h2>
                        {StoreStatus::all()
                            .iter()
                            .map(|status| {
                                let status = *status;
                                let count = move || {
                                    snapshot.with(|s| {
                                        s.aggregates
                                            .as_ref()
                                            .map(|a| a.counts.get(status.as_str()))
                                            .unwrap_or(0)
                                    })
                                };
                                view! {
                                    <div class="status-row">
                                        {status_badge(status)}
                                        <span class="status-row__count">{count}</span>
                                    </div>
                                }
                            })
                            .collect_view()}
                        <div class="status-row status-row--total">
                            <span>"Total Stores"</span>
                            <span>{move || snapshot.with(|s| s.loaded_count)}</span>
                        </div>
                    </div>

                    <div class="card">
                        <h2 class="card__title">"Top Stores by Revenue"</h2>
                        <For
                            each=move || top_stores.get()
                            key=|s| s.id.clone()
                            children=move |store| {
                                let id = store.id.clone();
                                view! {
                                    <div
                                        class="top-store"
                                        on:click=move |_| ctx.open_store_analytics(id.clone())
                                    >
                                        <div>
                                            <div style="font-weight: 500;">{store.name.clone()}</div>
                                            <div class="muted">
                                                {format!("Last login: {}", format_datetime_opt(&store.last_login))}
                                            </div>
                                        </div>
                                        <span>{format_money(store.revenue.total, &config().display.currency_symbol)}</span>
                                    </div>
                                }
                            }
                        />
                    </div>
                </div>
            </div>
        </div>
    }
}

use std::rc::Rc;

use contracts::dashboards::d401_store_analytics::TimeRange;
use contracts::shared::api::ALL_SENTINEL;
use contracts::shared::indicators::ValueFormat;
use leptos::prelude::*;
use view_model::entities::{daily_sales, order_handlers, sales_summary, SalesWindow};
use view_model::{ControllerOptions, FilterMode, ListController};

use crate::domain::a003_order::api::OrderApi;
use crate::shared::components::stat_card::StatCard;
use crate::shared::components::status_badge::ErrorBanner;
use crate::shared::config::config;
use crate::shared::format::{format_date, format_money};
use crate::shared::list_utils::use_list_controller;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::RequireAuth;
use crate::system::auth::storage::StorageTokenSource;

#[component]
pub fn SalesOverview() -> impl IntoView {
    view! {
        <RequireAuth>
            <SalesOverviewDashboard />
        </RequireAuth>
    }
}

/// Продажи по администраторам за выбранный период, считаются из коллекции
/// заказов.
///
/// Администратор магазина видит только свои заказы; выбор администратора
/// доступен лишь администратору сети.
#[component]
fn SalesOverviewDashboard() -> impl IntoView {
    let cfg = config();
    let (auth_state, _) = use_auth();
    let list = use_list_controller(ListController::new(
        OrderApi,
        Rc::new(StorageTokenSource),
        ControllerOptions {
            filter_mode: FilterMode::Client,
            page_size: cfg.list.client_page_size,
            optimistic_status: false,
            reload_after_mutation: false,
        },
    ));
    let snapshot = list.snapshot;
    let symbol = cfg.display.currency_symbol.clone();

    let is_super_admin = Memo::new(move |_| {
        auth_state.with(|a| a.admin.as_ref().map(|s| s.is_super_admin()).unwrap_or(false))
    });
    let (selected_admin, set_selected_admin) = signal(ALL_SENTINEL.to_string());
    // `None` is all time
    let (time_range, set_time_range) = signal(Some(TimeRange::Week));
    let window = Memo::new(move |_| {
        time_range
            .get()
            .map(|range| SalesWindow::new(range, chrono::Local::now().date_naive()))
    });

    let scope = Memo::new(move |_| {
        if is_super_admin.get() {
            let selected = selected_admin.get();
            (selected != ALL_SENTINEL).then_some(selected)
        } else {
            auth_state.with(|a| a.admin.as_ref().map(|s| s.name.clone()))
        }
    });

    let orders = Memo::new(move |_| list.records());
    let summary = Memo::new(move |_| {
        let loaded = snapshot.with(|s| s.loaded_count > 0);
        loaded.then(|| orders.with(|o| sales_summary(o, scope.get().as_deref(), window.get())))
    });
    let days = Memo::new(move |_| orders.with(|o| daily_sales(o, scope.get().as_deref(), window.get())));
    let leaderboard = Memo::new(move |_| {
        let window = window.get();
        orders.with(|o| {
            let mut rows: Vec<_> = order_handlers(o)
                .iter()
                .map(|name| sales_summary(o, Some(name), window))
                .collect();
            rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
            rows
        })
    });

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Sales Overview"</h1>
                </div>
                <div class="page__header-right">
                    <select
                        class="filter-panel__select"
                        prop:value=move || time_range.get().map(|r| r.code()).unwrap_or(ALL_SENTINEL)
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            if value == ALL_SENTINEL {
                                set_time_range.set(None);
                                return;
                            }
                            match value.parse::<TimeRange>() {
                                Ok(r) => set_time_range.set(Some(r)),
                                Err(e) => log::warn!("{}", e),
                            }
                        }
                    >
                        {TimeRange::all()
                            .into_iter()
                            .map(|r| view! { <option value=r.code()>{r.display_name()}</option> })
                            .collect_view()}
                        <option value=ALL_SENTINEL>"All time"</option>
                    </select>
                    <Show when=move || is_super_admin.get()>
                        <select
                            class="filter-panel__select"
                            on:change=move |ev| set_selected_admin.set(event_target_value(&ev))
                        >
                            <option value=ALL_SENTINEL>"All admins"</option>
                            <For
                                each=move || orders.with(|o| order_handlers(o))
                                key=|name| name.clone()
                                children=|name: String| view! { <option value=name.clone()>{name.clone()}</option> }
                            />
                        </select>
                    </Show>
                </div>
            </div>

            <div class="page__content">
                <ErrorBanner
                    message=Signal::derive(move || snapshot.with(|s| s.error_message()))
                    on_retry=Callback::new(move |_| list.retry())
                />

                <div class="stat-grid">
                    <StatCard
                        label="Revenue"
                        icon_name="dollar-sign"
                        value=Signal::derive(move || summary.get().map(|s| s.revenue))
                        format=ValueFormat::Money { symbol: symbol.clone() }
                    />
                    <StatCard
                        label="Orders"
                        icon_name="orders"
                        value=Signal::derive(move || summary.get().map(|s| s.orders as f64))
                        format=ValueFormat::Integer
                    />
                    <StatCard
                        label="Avg. Order Value"
                        icon_name="trending-up"
                        value=Signal::derive(move || summary.get().map(|s| s.average_order_value))
                        format=ValueFormat::Money { symbol: symbol.clone() }
                    />
                    <StatCard
                        label="Customers"
                        icon_name="users"
                        value=Signal::derive(move || summary.get().map(|s| s.customers as f64))
                        format=ValueFormat::Integer
                    />
                </div>

                <div class="dashboard-grid">
                    <div class="card">
                        <h2 class="card__title">"Daily Sales"</h2>
                        <table class="simple-table">
                            <thead>
                                <tr>
                                    <th>"Date"</th>
                                    <th>"Orders"</th>
                                    <th>"Revenue"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || days.get()
                                    key=|d| (d.date.clone(), d.orders)
                                    children=move |day| view! {
                                        <tr>
                                            <td>{format_date(&day.date)}</td>
                                            <td>{day.orders}</td>
                                            <td>{format_money(day.revenue, &config().display.currency_symbol)}</td>
                                        </tr>
                                    }
                                />
                            </tbody>
                        </table>
                    </div>

                    <Show when=move || is_super_admin.get()>
                        <div class="card">
                            <h2 class="card__title">"Sales by Admin"</h2>
                            <table class="simple-table">
                                <thead>
                                    <tr>
                                        <th>"Admin"</th>
                                        <th>"Orders"</th>
                                        <th>"Revenue"</th>
                                        <th>"Avg. Order"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {move || {
                                        let symbol = config().display.currency_symbol.clone();
                                        leaderboard
                                            .get()
                                            .into_iter()
                                            .map(|row| view! {
                                                <tr>
                                                    <td>{row.admin.clone().unwrap_or_default()}</td>
                                                    <td>{row.orders}</td>
                                                    <td>{format_money(row.revenue, &symbol)}</td>
                                                    <td>{format_money(row.average_order_value, &symbol)}</td>
                                                </tr>
                                            })
                                            .collect_view()
                                    }}
                                </tbody>
                            </table>
                        </div>
                    </Show>
                </div>
            </div>
        </div>
    }
}

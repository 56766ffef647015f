use std::rc::Rc;

use contracts::dashboards::d401_store_analytics::{
    ActivityLogsResponse, RevenueTrendsResponse, StoreAnalytics, TimeRange,
};
use contracts::domain::a001_store::{ActivityKind, Severity};
use contracts::shared::indicators::{parse_growth, IndicatorStatus, ValueFormat};
use leptos::prelude::*;
use leptos::task::spawn_local;
use view_model::{ControllerOptions, FilterMode, ListController, SyncError, TokenProvider};

use crate::dashboards::d401_store_analytics::api;
use crate::domain::a001_store::api::StoreApi;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::stat_card::StatCard;
use crate::shared::components::status_badge::{status_badge, ErrorBanner};
use crate::shared::config::config;
use crate::shared::format::{format_date, format_datetime, format_money};
use crate::shared::list_utils::use_list_controller;
use crate::system::auth::guard::RequireSuperAdmin;
use crate::system::auth::storage::StorageTokenSource;

const ACTIVITY_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, PartialEq)]
struct AnalyticsData {
    overview: StoreAnalytics,
    trends: RevenueTrendsResponse,
    logs: ActivityLogsResponse,
}

async fn fetch_all(store_id: String, range: TimeRange) -> Result<AnalyticsData, SyncError> {
    let token = StorageTokenSource
        .current_token()
        .ok_or_else(|| SyncError::Auth("Not authenticated".into()))?;
    let overview = api::get_overview(&token, &store_id, range).await?;
    let trends = api::get_revenue_trends(&token, &store_id, range).await?;
    let logs = api::get_activity_logs(&token, &store_id, 1, ACTIVITY_PAGE_SIZE).await?;
    Ok(AnalyticsData { overview, trends, logs })
}

fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => "activity-item activity-item--low",
        Severity::Medium => "activity-item activity-item--medium",
        Severity::High => "activity-item activity-item--high",
    }
}

fn kind_label(kind: ActivityKind) -> &'static str {
    match kind {
        ActivityKind::Login => "Login",
        ActivityKind::ProductUpdate => "Product update",
        ActivityKind::Order => "Order",
        ActivityKind::Suspicious => "Suspicious",
        ActivityKind::Settings => "Settings",
    }
}

#[component]
pub fn StoreAnalyticsPage() -> impl IntoView {
    view! {
        <RequireSuperAdmin>
            <StoreAnalyticsDashboard />
        </RequireSuperAdmin>
    }
}

/// Аналитика одного магазина за выбранный период
#[component]
fn StoreAnalyticsDashboard() -> impl IntoView {
    let cfg = config();
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let stores = use_list_controller(ListController::new(
        StoreApi,
        Rc::new(StorageTokenSource),
        ControllerOptions {
            filter_mode: FilterMode::Client,
            page_size: cfg.list.client_page_size,
            optimistic_status: false,
            reload_after_mutation: false,
        },
    ));

    let (time_range, set_time_range) = signal(TimeRange::default());
    let (data, set_data) = signal(None::<AnalyticsData>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let latest_request = StoredValue::new(0u64);
    let symbol = cfg.display.currency_symbol.clone();

    // Default to the first store once the list is in
    Effect::new(move |_| {
        if ctx.analytics_store.get().is_none() {
            if let Some(first) = stores.snapshot.with(|s| s.visible.first().map(|st| st.id.clone())) {
                ctx.analytics_store.set(Some(first));
            }
        }
    });

    // Reload when store or period changes; only the newest response is shown
    Effect::new(move |_| {
        let range = time_range.get();
        let Some(store_id) = ctx.analytics_store.get() else {
            return;
        };
        let seq = latest_request.get_value() + 1;
        latest_request.set_value(seq);
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            let result = fetch_all(store_id.clone(), range).await;
            if latest_request.try_get_value() != Some(seq) {
                log::debug!("analytics response for {} discarded", store_id);
                return;
            }
            match result {
                Ok(d) => set_data.set(Some(d)),
                Err(e) => {
                    log::error!("Failed to load analytics for {}: {}", store_id, e);
                    set_error.set(Some(e.user_message()));
                }
            }
            set_loading.set(false);
        });
    });

    let growth = move |pick: fn(&StoreAnalytics) -> &str| {
        Signal::derive(move || data.with(|d| d.as_ref().and_then(|d| parse_growth(pick(&d.overview)))))
    };
    let revenue_growth = growth(|o| o.analytics.revenue.growth.as_str());
    let orders_growth = growth(|o| o.analytics.orders.growth.as_str());
    let customers_growth = growth(|o| o.analytics.customers.growth.as_str());
    let metric = move |pick: fn(&StoreAnalytics) -> f64| {
        Signal::derive(move || data.with(|d| d.as_ref().map(|d| pick(&d.overview))))
    };

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Store Analytics"</h1>
                    {move || data.with(|d| d.as_ref().map(|d| status_badge(d.overview.store.status)))}
                </div>
                <div class="page__header-right">
                    <select
                        class="filter-panel__select"
                        prop:value=move || ctx.analytics_store.get().unwrap_or_default()
                        on:change=move |ev| ctx.analytics_store.set(Some(event_target_value(&ev)))
                    >
                        <For
                            each=move || stores.snapshot.with(|s| s.visible.clone())
                            key=|s| s.id.clone()
                            children=|store| view! { <option value=store.id.clone()>{store.name.clone()}</option> }
                        />
                    </select>
                    <select
                        class="filter-panel__select"
                        prop:value=move || time_range.get().code()
                        on:change=move |ev| {
                            match event_target_value(&ev).parse::<TimeRange>() {
                                Ok(r) => set_time_range.set(r),
                                Err(e) => log::warn!("{}", e),
                            }
                        }
                    >
                        {TimeRange::all()
                            .into_iter()
                            .map(|r| view! { <option value=r.code()>{r.display_name()}</option> })
                            .collect_view()}
                    </select>
                </div>
            </div>

            <div class="page__content">
                <ErrorBanner
                    message=Signal::derive(move || stores.snapshot.with(|s| s.error_message()).or_else(|| error.get()))
                />
                <Show when=move || loading.get()>
                    <div class="loading">"Loading analytics..."</div>
                </Show>

                <div class="stat-grid">
                    <StatCard
                        label="Revenue"
                        icon_name="dollar-sign"
                        value=metric(|o| o.analytics.revenue.period)
                        format=ValueFormat::Money { symbol: symbol.clone() }
                        change_percent=revenue_growth
                        status=Signal::derive(move || IndicatorStatus::from_change(revenue_growth.get()))
                    />
                    <StatCard
                        label="Orders"
                        icon_name="orders"
                        value=metric(|o| o.analytics.orders.period)
                        format=ValueFormat::Integer
                        change_percent=orders_growth
                        status=Signal::derive(move || IndicatorStatus::from_change(orders_growth.get()))
                        subtitle=Signal::derive(move || {
                            data.with(|d| {
                                d.as_ref()
                                    .map(|d| format!("Avg. {}", format_money(d.overview.analytics.orders.average_value, &config().display.currency_symbol)))
                                    .unwrap_or_default()
                            })
                        })
                    />
                    <StatCard
                        label="Customers"
                        icon_name="users"
                        value=metric(|o| o.analytics.customers.total)
                        format=ValueFormat::Integer
                        change_percent=customers_growth
                        status=Signal::derive(move || IndicatorStatus::from_change(customers_growth.get()))
                    />
                    <StatCard
                        label="Products"
                        icon_name="store"
                        value=metric(|o| o.analytics.products.total)
                        format=ValueFormat::Integer
                    />
                    <StatCard
                        label="Commission"
                        icon_name="percent"
                        value=metric(|o| o.analytics.commission.period)
                        format=ValueFormat::Money { symbol: symbol.clone() }
                        subtitle=Signal::derive(move || {
                            data.with(|d| {
                                d.as_ref()
                                    .map(|d| format!("Rate {:.1}%", d.overview.analytics.commission.rate))
                                    .unwrap_or_default()
                            })
                        })
                    />
                </div>

                <div class="dashboard-grid">
                    <div class="card">
                        <h2 class="card__title">"Revenue Trends"</h2>
                        <table class="simple-table">
                            <thead>
                                <tr>
                                    <th>"Date"</th>
                                    <th>"Revenue"</th>
                                    <th>"Commission"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || {
                                    let symbol = config().display.currency_symbol.clone();
                                    data.with(|d| {
                                        d.as_ref()
                                            .map(|d| d.trends.trends.clone())
                                            .unwrap_or_default()
                                    })
                                    .into_iter()
                                    .map(|t| view! {
                                        <tr>
                                            <td>{format_date(&t.date)}</td>
                                            <td>{format_money(t.revenue, &symbol)}</td>
                                            <td>{format_money(t.commission, &symbol)}</td>
                                        </tr>
                                    })
                                    .collect_view()
                                }}
                            </tbody>
                        </table>
                    </div>

                    <div class="card">
                        <h2 class="card__title">"Recent Activity"</h2>
                        {move || {
                            let logs = data.with(|d| d.as_ref().map(|d| d.logs.logs.clone()).unwrap_or_default());
                            if logs.is_empty() {
                                return view! { <div class="empty-state">"No activity in this period"</div> }.into_any();
                            }
                            logs.into_iter()
                                .map(|log| view! {
                                    <div class=severity_class(log.severity)>
                                        <div>
                                            <span style="font-weight: 500;">{kind_label(log.kind)}</span>
                                            " - "
                                            {log.description.clone()}
                                        </div>
                                        <div class="muted">{format_datetime(&log.timestamp)}</div>
                                    </div>
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(kind_label(ActivityKind::ProductUpdate), "Product update");
        assert!(severity_class(Severity::High).ends_with("--high"));
    }
}

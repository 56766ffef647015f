use std::rc::Rc;

use contracts::domain::a003_order::Order;
use contracts::enums::{ClosedStatus, OrderStatus};
use contracts::shared::api::ALL_SENTINEL;
use contracts::shared::indicators::ValueFormat;
use leptos::prelude::*;
use thaw::*;
use view_model::entities::{order_handlers, order_status_spec};
use view_model::{ControllerOptions, CriteriaPatch, FilterMode, ListController, Mutation};

use crate::domain::a003_order::api::OrderApi;
use crate::shared::components::stat_card::StatCard;
use crate::shared::components::status_badge::ErrorBanner;
use crate::shared::config::config;
use crate::shared::format::{format_date, format_money};
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, use_list_controller, SearchInput};
use crate::system::auth::guard::RequireAuth;
use crate::system::auth::storage::StorageTokenSource;

use super::details::OrderDetails;

#[component]
pub fn OrderList() -> impl IntoView {
    view! {
        <RequireAuth>
            <OrdersManagement />
        </RequireAuth>
    }
}

/// Заказы: вся коллекция загружается один раз, фильтры локальные
#[component]
fn OrdersManagement() -> impl IntoView {
    let cfg = config();
    let controller = ListController::new(
        OrderApi,
        Rc::new(StorageTokenSource),
        ControllerOptions {
            filter_mode: FilterMode::Client,
            page_size: cfg.list.client_page_size,
            optimistic_status: cfg.list.optimistic_status,
            reload_after_mutation: true,
        },
    )
    .with_aggregates(order_status_spec());
    let list = use_list_controller(controller);
    let snapshot = list.snapshot;

    let search = RwSignal::new(String::new());
    let (selected, set_selected) = signal::<Option<Order>>(None);
    let symbol = cfg.display.currency_symbol.clone();

    let handlers = Memo::new(move |_| order_handlers(&list.records()));

    let set_category = move |field: &'static str, value: String| {
        list.run(move |c| async move {
            c.set_filter_criteria(CriteriaPatch::category(field, value)).await
        });
    };

    let change_status = move |id: String, status: String| {
        list.run(move |c| async move {
            c.perform_mutation(Mutation::UpdateStatus { id, status }).await
        });
    };

    let count = move |status: OrderStatus| {
        Signal::derive(move || {
            snapshot.with(|s| {
                s.aggregates
                    .as_ref()
                    .map(|a| a.counts.get(status.as_str()) as f64)
            })
        })
    };

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Orders Management"</h1>
                    <Badge>{move || snapshot.with(|s| s.visible.len().to_string())}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| list.refresh()
                        disabled=Signal::derive(move || snapshot.with(|s| s.is_loading()))
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
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
                        value=Signal::derive(move || snapshot.with(|s| s.aggregates.as_ref().map(|a| a.sum("total"))))
                        format=ValueFormat::Money { symbol: symbol.clone() }
                    />
                    <StatCard
                        label="Pending"
                        icon_name="activity"
                        value=count(OrderStatus::Pending)
                        format=ValueFormat::Integer
                    />
                    <StatCard
                        label="Processing"
                        icon_name="orders"
                        value=count(OrderStatus::Processing)
                        format=ValueFormat::Integer
                    />
                    <StatCard
                        label="Shipped"
                        icon_name="trending-up"
                        value=count(OrderStatus::Shipped)
                        format=ValueFormat::Integer
                    />
                    <StatCard
                        label="Delivered"
                        icon_name="bar-chart"
                        value=count(OrderStatus::Delivered)
                        format=ValueFormat::Integer
                    />
                </div>

                <div class="filter-panel">
                    <SearchInput
                        on_change=Callback::new(move |term: String| {
                            search.set(term.clone());
                            list.run(move |c| async move {
                                c.set_filter_criteria(CriteriaPatch::search(term)).await
                            });
                        })
                        placeholder="Search by customer, email or order id..."
                    />
                    <select
                        class="filter-panel__select"
                        on:change=move |ev| set_category("status", event_target_value(&ev))
                    >
                        <option value=ALL_SENTINEL>"All statuses"</option>
                        {OrderStatus::all()
                            .iter()
                            .map(|s| view! { <option value=s.as_str()>{s.display_name()}</option> })
                            .collect_view()}
                    </select>
                    <select
                        class="filter-panel__select"
                        on:change=move |ev| set_category("handled_by", event_target_value(&ev))
                    >
                        <option value=ALL_SENTINEL>"All admins"</option>
                        <For
                            each=move || handlers.get()
                            key=|name| name.clone()
                            children=|name: String| view! { <option value=name.clone()>{name.clone()}</option> }
                        />
                    </select>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Order"</TableHeaderCell>
                                <TableHeaderCell>"Customer"</TableHeaderCell>
                                <TableHeaderCell>"Items"</TableHeaderCell>
                                <TableHeaderCell>"Total"</TableHeaderCell>
                                <TableHeaderCell>"Status"</TableHeaderCell>
                                <TableHeaderCell>"Handled by"</TableHeaderCell>
                                <TableHeaderCell>"Date"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || snapshot.with(|s| s.visible.clone())
                                key=|o| (o.id.clone(), o.status)
                                children=move |order: Order| {
                                    let term = search.get_untracked();
                                    let id_for_status = order.id.clone();
                                    let current = order.status.as_str();
                                    let for_details = order.clone();
                                    let term_id = term.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>{highlight_matches(&order.id, &term_id)}</TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <div style="font-weight: 500;">{highlight_matches(&order.customer_name, &term)}</div>
                                                    <div class="muted">{highlight_matches(&order.customer_email, &term)}</div>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>{order.items}</TableCell>
                                            <TableCell>{format_money(order.total, &config().display.currency_symbol)}</TableCell>
                                            <TableCell>
                                                <select
                                                    class="status-select"
                                                    on:change=move |ev| change_status(id_for_status.clone(), event_target_value(&ev))
                                                >
                                                    {OrderStatus::all()
                                                        .iter()
                                                        .map(|s| view! {
                                                            <option value=s.as_str() selected=s.as_str() == current>
                                                                {s.display_name()}
                                                            </option>
                                                        })
                                                        .collect_view()}
                                                </select>
                                            </TableCell>
                                            <TableCell>{order.handled_by.clone()}</TableCell>
                                            <TableCell>{format_date(&order.date)}</TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| set_selected.set(Some(for_details.clone()))
                                                    attr:title="Details"
                                                >
                                                    {icon("search")}
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                    <Show when=move || snapshot.with(|s| s.visible.is_empty() && !s.is_loading())>
                        <div class="empty-state">"No orders match the current filters"</div>
                    </Show>
                </div>

                {move || selected.get().map(|order| view! {
                    <OrderDetails order=order on_close=Callback::new(move |_| set_selected.set(None)) />
                })}
            </div>
        </div>
    }
}

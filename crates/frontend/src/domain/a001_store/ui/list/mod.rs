use std::rc::Rc;

use contracts::domain::a001_store::Store;
use contracts::enums::{ClosedStatus, StoreStatus};
use contracts::shared::api::ALL_SENTINEL;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use view_model::entities::store_status_spec;
use view_model::{ControllerOptions, CriteriaPatch, FilterMode, ListController, Mutation, TokenProvider};

use crate::domain::a001_store::api::{reset_admin_password, StoreApi};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::confirm_dialog::{ConfirmDialog, PendingDelete};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::status_badge::{status_badge, ErrorBanner};
use crate::shared::config::config;
use crate::shared::format::{format_date, format_money};
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, page_count, page_slice, use_list_controller, SearchInput};
use crate::system::auth::guard::RequireSuperAdmin;
use crate::system::auth::storage::StorageTokenSource;

use super::details::CreateStoreForm;

#[component]
pub fn StoreList() -> impl IntoView {
    view! {
        <RequireSuperAdmin>
            <StoreManagement />
        </RequireSuperAdmin>
    }
}

/// Магазины: вся коллекция загружается один раз, фильтрация и
/// постраничность локальные, поэтому счётчики статусов видят все магазины.
#[component]
fn StoreManagement() -> impl IntoView {
    let cfg = config();
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let controller = ListController::new(
        StoreApi,
        Rc::new(StorageTokenSource),
        ControllerOptions {
            filter_mode: FilterMode::Client,
            page_size: cfg.list.client_page_size,
            optimistic_status: cfg.list.optimistic_status,
            reload_after_mutation: true,
        },
    )
    .with_aggregates(store_status_spec());
    let list = use_list_controller(controller);
    let snapshot = list.snapshot;

    let (show_create_form, set_show_create_form) = signal(false);
    let (reset_notice, set_reset_notice) = signal::<Option<String>>(None);
    let search = RwSignal::new(String::new());
    let page = RwSignal::new(1u32);
    let page_size = cfg.list.page_size;
    let pending_delete = RwSignal::new(None::<PendingDelete>);
    let symbol = cfg.display.currency_symbol.clone();

    let on_search = move |term: String| {
        search.set(term.clone());
        page.set(1);
        list.run(move |c| async move { c.set_filter_criteria(CriteriaPatch::search(term)).await });
    };

    let on_status_filter = move |value: String| {
        page.set(1);
        list.run(move |c| async move {
            c.set_filter_criteria(CriteriaPatch::category("status", value)).await
        });
    };

    let toggle_status = move |id: String| {
        list.run(move |c| async move { c.toggle_status(&id).await });
    };

    let confirm_delete = move |_: ()| {
        if let Some(target) = pending_delete.get_untracked() {
            pending_delete.set(None);
            let id = target.id;
            list.run(move |c| async move { c.perform_mutation(Mutation::Delete { id }).await });
        }
    };

    let total_pages = Memo::new(move |_| snapshot.with(|s| page_count(s.visible.len(), page_size)));
    let page_rows = Memo::new(move |_| {
        snapshot.with(|s| page_slice(&s.visible, page.get(), page_size))
    });

    let reset_password = move |store: Store| {
        set_reset_notice.set(None);
        spawn_local(async move {
            let Some(token) = StorageTokenSource.current_token() else {
                set_reset_notice.set(Some("Not authenticated".to_string()));
                return;
            };
            let notice = match reset_admin_password(&token, &store.id, store.admin_email.clone()).await {
                Ok(r) => format!(
                    "New password for {}: {}",
                    store.admin_email, r.new_password
                ),
                Err(e) => format!("Password reset failed: {}", e.user_message()),
            };
            set_reset_notice.set(Some(notice));
        });
    };

    let count = move |status: StoreStatus| {
        snapshot.with(|s| {
            s.aggregates
                .as_ref()
                .map(|a| a.counts.get(status.as_str()))
                .unwrap_or(0)
        })
    };

    view! {
        <div class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Store Management"</h1>
                    <Badge>{move || snapshot.with(|s| s.loaded_count.to_string())}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| set_show_create_form.set(true)
                    >
                        {icon("plus")}
                        " New Store"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| list.refresh()
                        disabled=Signal::derive(move || snapshot.with(|s| s.is_loading()))
                    >
                        {icon("refresh")}
                        {move || if snapshot.with(|s| s.is_loading()) { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <ErrorBanner
                    message=Signal::derive(move || snapshot.with(|s| s.error_message()))
                    on_retry=Callback::new(move |_| list.retry())
                />
                {move || reset_notice.get().map(|n| view! { <div class="alert alert--info">{n}</div> })}

                <div class="status-summary">
                    {StoreStatus::all()
                        .iter()
                        .map(|status| {
                            let status = *status;
                            view! {
                                <div class="status-summary__item">
                                    {status_badge(status)}
                                    <span class="status-summary__count">{move || count(status)}</span>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>

                <div class="filter-panel">
                    <SearchInput
                        on_change=Callback::new(on_search)
                        placeholder="Search by store, admin or subdomain..."
                    />
                    <select
                        class="filter-panel__select"
                        on:change=move |ev| on_status_filter(event_target_value(&ev))
                    >
                        <option value=ALL_SENTINEL>"All statuses"</option>
                        {StoreStatus::all()
                            .iter()
                            .map(|s| view! { <option value=s.as_str()>{s.display_name()}</option> })
                            .collect_view()}
                    </select>
                    <PaginationControls
                        current_page=Signal::derive(move || page.get().min(total_pages.get()))
                        total_pages=total_pages
                        total_count=Signal::derive(move || snapshot.with(|s| s.visible.len() as u64))
                        on_page_change=Callback::new(move |p: u32| page.set(p))
                        disabled=Signal::derive(move || snapshot.with(|s| s.is_loading()))
                    />
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Store"</TableHeaderCell>
                                <TableHeaderCell>"Admin"</TableHeaderCell>
                                <TableHeaderCell>"Status"</TableHeaderCell>
                                <TableHeaderCell>"Revenue"</TableHeaderCell>
                                <TableHeaderCell>"Commission"</TableHeaderCell>
                                <TableHeaderCell>"Created"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || page_rows.get()
                                key=|s| (s.id.clone(), s.status, s.name.clone())
                                children=move |store: Store| {
                                    let term = search.get_untracked();
                                    let id = store.id.clone();
                                    let id_for_toggle = id.clone();
                                    let delete_target = PendingDelete::new(id.clone(), store.name.clone());
                                    let id_for_analytics = id.clone();
                                    let store_for_reset = store.clone();
                                    let next_label = store
                                        .status
                                        .next()
                                        .map(|s| s.display_name())
                                        .unwrap_or_default();
                                    let term_admin = term.clone();
                                    let symbol = symbol.clone();
                                    let symbol_commission = symbol.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <div style="font-weight: 500;">{highlight_matches(&store.name, &term)}</div>
                                                    <div class="muted">{highlight_matches(&store.subdomain, &term)}</div>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <div>{highlight_matches(&store.admin_name, &term_admin)}</div>
                                                    <div class="muted">{store.admin_email.clone()}</div>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>{status_badge(store.status)}</TableCell>
                                            <TableCell>{format_money(store.revenue.total, &symbol)}</TableCell>
                                            <TableCell>
                                                {format!(
                                                    "{} ({:.1}%)",
                                                    format_money(store.commission.earned, &symbol_commission),
                                                    store.commission.rate
                                                )}
                                            </TableCell>
                                            <TableCell>{format_date(&store.created_date)}</TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| ctx.open_store_analytics(id_for_analytics.clone())
                                                    attr:title="Analytics"
                                                >
                                                    {icon("trending-up")}
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| toggle_status(id_for_toggle.clone())
                                                    attr:title=format!("Set {}", next_label)
                                                >
                                                    {icon("power")}
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| reset_password(store_for_reset.clone())
                                                    attr:title="Reset admin password"
                                                >
                                                    {icon("key")}
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| pending_delete.set(Some(delete_target.clone()))
                                                    attr:title="Delete"
                                                >
                                                    {icon("trash")}
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                    <Show when=move || snapshot.with(|s| s.visible.is_empty() && !s.is_loading())>
                        <div class="empty-state">"No stores match the current filters"</div>
                    </Show>
                </div>

                {move || pending_delete.get().map(|target| view! {
                    <ConfirmDialog
                        title="Delete store"
                        message=target.prompt("store")
                        on_confirm=Callback::new(confirm_delete)
                        on_cancel=Callback::new(move |_| pending_delete.set(None))
                    />
                })}

                <Show when=move || show_create_form.get()>
                    <CreateStoreForm
                        on_close=Callback::new(move |_| set_show_create_form.set(false))
                        on_submit=Callback::new(move |dto| {
                            set_show_create_form.set(false);
                            list.run(move |c| async move { c.perform_mutation(Mutation::Create(dto)).await });
                        })
                    />
                </Show>
            </div>
        </div>
    }
}

use std::rc::Rc;

use contracts::domain::a002_admin::Admin;
use contracts::enums::{AdminStatus, ClosedStatus};
use contracts::shared::api::ALL_SENTINEL;
use contracts::shared::indicators::ValueFormat;
use leptos::prelude::*;
use thaw::*;
use view_model::entities::admin_status_spec;
use view_model::{ControllerOptions, CriteriaPatch, FilterMode, ListController, Mutation};

use crate::domain::a002_admin::api::AdminApi;
use crate::shared::components::confirm_dialog::{ConfirmDialog, PendingDelete};
use crate::shared::components::stat_card::StatCard;
use crate::shared::components::status_badge::{status_badge, ErrorBanner};
use crate::shared::config::config;
use crate::shared::format::{format_date, format_datetime_opt};
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, use_list_controller, SearchInput};
use crate::system::auth::guard::RequireSuperAdmin;
use crate::system::auth::storage::StorageTokenSource;

use super::details::CreateAdminForm;

#[component]
pub fn AdminList() -> impl IntoView {
    view! {
        <RequireSuperAdmin>
            <AdminManagement />
        </RequireSuperAdmin>
    }
}

#[component]
fn AdminManagement() -> impl IntoView {
    let cfg = config();
    let controller = ListController::new(
        AdminApi,
        Rc::new(StorageTokenSource),
        ControllerOptions {
            filter_mode: FilterMode::Client,
            page_size: cfg.list.client_page_size,
            optimistic_status: cfg.list.optimistic_status,
            reload_after_mutation: true,
        },
    )
    .with_aggregates(admin_status_spec());
    let list = use_list_controller(controller);
    let snapshot = list.snapshot;

    let (show_create_form, set_show_create_form) = signal(false);
    let search = RwSignal::new(String::new());
    let pending_delete = RwSignal::new(None::<PendingDelete>);

    let on_search = move |term: String| {
        search.set(term.clone());
        list.run(move |c| async move { c.set_filter_criteria(CriteriaPatch::search(term)).await });
    };

    let confirm_delete = move |_: ()| {
        if let Some(target) = pending_delete.get_untracked() {
            pending_delete.set(None);
            let id = target.id;
            list.run(move |c| async move { c.perform_mutation(Mutation::Delete { id }).await });
        }
    };

    let count = move |status: AdminStatus| {
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
                    <h1 class="page__title">"Admin Management"</h1>
                    <Badge>{move || snapshot.with(|s| s.loaded_count.to_string())}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| set_show_create_form.set(true)
                    >
                        {icon("plus")}
                        " New Admin"
                    </Button>
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
                        label="Total Admins"
                        icon_name="users"
                        value=Signal::derive(move || snapshot.with(|s| s.aggregates.as_ref().map(|a| a.total as f64)))
                        format=ValueFormat::Integer
                    />
                    <StatCard
                        label="Active"
                        icon_name="activity"
                        value=count(AdminStatus::Active)
                        format=ValueFormat::Integer
                    />
                    <StatCard
                        label="Inactive"
                        icon_name="power"
                        value=count(AdminStatus::Inactive)
                        format=ValueFormat::Integer
                    />
                </div>

                <div class="filter-panel">
                    <SearchInput
                        on_change=Callback::new(on_search)
                        placeholder="Search by name, email or role..."
                    />
                    <select
                        class="filter-panel__select"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            list.run(move |c| async move {
                                c.set_filter_criteria(CriteriaPatch::category("status", value)).await
                            });
                        }
                    >
                        <option value=ALL_SENTINEL>"All statuses"</option>
                        {AdminStatus::all()
                            .iter()
                            .map(|s| view! { <option value=s.as_str()>{s.display_name()}</option> })
                            .collect_view()}
                    </select>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Admin"</TableHeaderCell>
                                <TableHeaderCell>"Role"</TableHeaderCell>
                                <TableHeaderCell>"Status"</TableHeaderCell>
                                <TableHeaderCell>"Last login"</TableHeaderCell>
                                <TableHeaderCell>"Joined"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || snapshot.with(|s| s.visible.clone())
                                key=|a| (a.id.clone(), a.status, a.role.clone())
                                children=move |admin: Admin| {
                                    let term = search.get_untracked();
                                    let id_for_toggle = admin.id.clone();
                                    let delete_target = PendingDelete::new(admin.id.clone(), admin.name.clone());
                                    let term_role = term.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <div style="font-weight: 500;">{highlight_matches(&admin.name, &term)}</div>
                                                    <div class="muted">{highlight_matches(&admin.email, &term)}</div>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>{highlight_matches(&admin.role, &term_role)}</TableCell>
                                            <TableCell>{status_badge(admin.status)}</TableCell>
                                            <TableCell>{format_datetime_opt(&admin.last_login)}</TableCell>
                                            <TableCell>{format_date(&admin.join_date)}</TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| {
                                                        let id = id_for_toggle.clone();
                                                        list.run(move |c| async move { c.toggle_status(&id).await });
                                                    }
                                                    attr:title="Activate / deactivate"
                                                >
                                                    {icon("power")}
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
                        <div class="empty-state">"No admins match the current filters"</div>
                    </Show>
                </div>

                {move || pending_delete.get().map(|target| view! {
                    <ConfirmDialog
                        title="Delete admin"
                        message=target.prompt("admin")
                        on_confirm=Callback::new(confirm_delete)
                        on_cancel=Callback::new(move |_| pending_delete.set(None))
                    />
                })}

                <Show when=move || show_create_form.get()>
                    <CreateAdminForm
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

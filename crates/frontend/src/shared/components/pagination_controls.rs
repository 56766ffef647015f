use crate::shared::icons::icon;
use leptos::prelude::*;

/// Prev/next controls for paged lists
#[component]
pub fn PaginationControls(
    /// Current page (1-based)
    #[prop(into)]
    current_page: Signal<u32>,
    #[prop(into)]
    total_pages: Signal<u32>,
    #[prop(into)]
    total_count: Signal<u64>,
    on_page_change: Callback<u32>,
    #[prop(into, optional)]
    disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 1 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=move || disabled.get() || current_page.get() <= 1
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || format!(
                    "Page {} of {} ({} total)",
                    current_page.get(),
                    total_pages.get().max(1),
                    total_count.get()
                )}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page < total_pages.get() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=move || { disabled.get() || current_page.get() >= total_pages.get() }
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
        </div>
    }
}

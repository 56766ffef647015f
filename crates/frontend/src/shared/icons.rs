use leptos::prelude::*;

fn svg(paths: &'static str) -> AnyView {
    view! {
        <svg
            width="20"
            height="20"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            aria-hidden="true"
            inner_html=paths
        ></svg>
    }
    .into_any()
}

/// Inline SVG icon by name; unknown names render an empty square.
pub fn icon(name: &str) -> AnyView {
    match name {
        "dashboard" => svg(r#"<rect x="3" y="3" width="7" height="9" rx="1"/><rect x="14" y="3" width="7" height="5" rx="1"/><rect x="14" y="12" width="7" height="9" rx="1"/><rect x="3" y="16" width="7" height="5" rx="1"/>"#),
        "store" => svg(r#"<path d="M3 9l1-5h16l1 5"/><path d="M4 9v11h16V9"/><path d="M9 20v-6h6v6"/>"#),
        "users" => svg(r#"<path d="M17 21v-2a4 4 0 0 0-4-4H7a4 4 0 0 0-4 4v2"/><circle cx="9" cy="7" r="4"/><path d="M23 21v-2a4 4 0 0 0-3-3.87"/><path d="M16 3.13a4 4 0 0 1 0 7.75"/>"#),
        "orders" => svg(r#"<circle cx="9" cy="21" r="1"/><circle cx="20" cy="21" r="1"/><path d="M1 1h4l2.68 12.39a2 2 0 0 0 2 1.61h7.72a2 2 0 0 0 2-1.61L23 6H6"/>"#),
        "bar-chart" => svg(r#"<path d="M12 20V10"/><path d="M18 20V4"/><path d="M6 20v-4"/>"#),
        "trending-up" => svg(r#"<path d="M23 6l-9.5 9.5-5-5L1 18"/><path d="M17 6h6v6"/>"#),
        "dollar-sign" => svg(r#"<path d="M12 1v22"/><path d="M17 5H9.5a3.5 3.5 0 0 0 0 7h5a3.5 3.5 0 0 1 0 7H6"/>"#),
        "percent" => svg(r#"<path d="M19 5L5 19"/><circle cx="6.5" cy="6.5" r="2.5"/><circle cx="17.5" cy="17.5" r="2.5"/>"#),
        "activity" => svg(r#"<path d="M22 12h-4l-3 9L9 3l-3 9H2"/>"#),
        "plus" => svg(r#"<path d="M12 5v14"/><path d="M5 12h14"/>"#),
        "refresh" => svg(r#"<path d="M23 4v6h-6"/><path d="M1 20v-6h6"/><path d="M3.51 9a9 9 0 0 1 14.85-3.36L23 10M1 14l4.64 4.36A9 9 0 0 0 20.49 15"/>"#),
        "trash" => svg(r#"<path d="M3 6h18"/><path d="M19 6l-1 14a2 2 0 0 1-2 2H8a2 2 0 0 1-2-2L5 6"/><path d="M10 11v6"/><path d="M14 11v6"/><path d="M9 6V4h6v2"/>"#),
        "key" => svg(r#"<circle cx="7.5" cy="15.5" r="5.5"/><path d="M21 2l-9.6 9.6"/><path d="M15.5 7.5l3 3L22 7l-3-3"/>"#),
        "power" => svg(r#"<path d="M18.36 6.64a9 9 0 1 1-12.73 0"/><path d="M12 2v10"/>"#),
        "x" => svg(r#"<path d="M18 6L6 18"/><path d="M6 6l12 12"/>"#),
        "search" => svg(r#"<circle cx="11" cy="11" r="8"/><path d="M21 21l-4.35-4.35"/>"#),
        "filter" => svg(r#"<path d="M22 3H2l8 9.46V19l4 2v-8.54L22 3z"/>"#),
        "chevron-left" => svg(r#"<path d="M15 18l-6-6 6-6"/>"#),
        "chevron-right" => svg(r#"<path d="M9 18l6-6-6-6"/>"#),
        "log-out" => svg(r#"<path d="M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4"/><path d="M16 17l5-5-5-5"/><path d="M21 12H9"/>"#),
        "alert" => svg(r#"<circle cx="12" cy="12" r="10"/><path d="M12 8v4"/><path d="M12 16h.01"/>"#),
        _ => svg(r#"<rect x="4" y="4" width="16" height="16" rx="2"/>"#),
    }
}

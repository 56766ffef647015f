use crate::shared::format::format_value;
use crate::shared::icons::icon;
use contracts::shared::indicators::{IndicatorStatus, ValueFormat};
use leptos::prelude::*;

#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    #[prop(into)]
    icon_name: String,
    /// Primary numeric value (None = still loading)
    #[prop(into)]
    value: Signal<Option<f64>>,
    format: ValueFormat,
    #[prop(into, optional)]
    status: Option<Signal<IndicatorStatus>>,
    /// Change % relative to the previous period
    #[prop(into, optional)]
    change_percent: Option<Signal<Option<f64>>>,
    #[prop(into, optional)]
    subtitle: Option<Signal<String>>,
) -> impl IntoView {
    let status_class = move || match status.map(|s| s.get()).unwrap_or(IndicatorStatus::Neutral) {
        IndicatorStatus::Good => "stat-card stat-card--success",
        IndicatorStatus::Bad => "stat-card stat-card--error",
        IndicatorStatus::Warning => "stat-card stat-card--warning",
        IndicatorStatus::Neutral => "stat-card",
    };

    let formatted = move || match value.get() {
        Some(v) => format_value(v, &format),
        None => "—".to_string(),
    };

    let change_view = move || {
        change_percent.and_then(|c| c.get()).map(|pct| {
            let (arrow, cls) = if pct > 0.0 {
                ("\u{2191}", "stat-card__change stat-card__change--up")
            } else if pct < 0.0 {
                ("\u{2193}", "stat-card__change stat-card__change--down")
            } else {
                ("", "stat-card__change stat-card__change--flat")
            };
            view! { <span class=cls>{format!("{}{:.1}%", arrow, pct.abs())}</span> }
        })
    };

    view! {
        <div class=status_class>
            <div class="stat-card__icon">{icon(&icon_name)}</div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">
                    {formatted}
                    {change_view}
                </div>
                {move || subtitle.map(|s| view! { <div class="stat-card__subtitle">{s.get()}</div> })}
            </div>
        </div>
    }
}

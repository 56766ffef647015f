use contracts::enums::ClosedStatus;
use leptos::prelude::*;
use thaw::*;

/// Badge colour for a status wire value.
pub fn badge_color(wire_value: &str) -> BadgeColor {
    match wire_value {
        "active" | "delivered" => BadgeColor::Success,
        "pending" | "processing" => BadgeColor::Warning,
        "shipped" => BadgeColor::Informative,
        "disabled" | "inactive" | "cancelled" => BadgeColor::Danger,
        _ => BadgeColor::Subtle,
    }
}

pub fn status_badge<S: ClosedStatus + Send + Sync>(status: S) -> impl IntoView {
    view! {
        <Badge appearance=BadgeAppearance::Tint color=badge_color(status.as_str())>
            {status.display_name()}
        </Badge>
    }
}

/// Inline error banner with an optional retry action
#[component]
pub fn ErrorBanner(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    move || {
        message.get().map(|text| {
            view! {
                <div class="alert alert--error">
                    <span>{text}</span>
                    {on_retry.map(|retry| view! {
                        <Button appearance=ButtonAppearance::Subtle on_click=move |_| retry.run(())>
                            "Retry"
                        </Button>
                    })}
                </div>
            }
        })
    }
}

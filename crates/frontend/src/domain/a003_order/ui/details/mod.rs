use contracts::domain::a003_order::Order;
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::status_badge::status_badge;
use crate::shared::config::config;
use crate::shared::format::{format_date, format_money};

/// Карточка заказа (только чтение)
#[component]
pub fn OrderDetails(order: Order, on_close: Callback<()>) -> impl IntoView {
    let symbol = &config().display.currency_symbol;
    let rows = vec![
        ("Customer", order.customer_name.clone()),
        ("Email", order.customer_email.clone()),
        ("Items", order.items.to_string()),
        ("Total", format_money(order.total, symbol)),
        ("Date", format_date(&order.date)),
        ("Shipping", order.shipping_method.clone()),
        ("Payment", order.payment_method.clone()),
        ("Handled by", order.handled_by.clone()),
    ];

    view! {
        <div class="modal-overlay">
            <div class="modal">
                <div class="modal__header">
                    <h2>{format!("Order {}", order.id)}</h2>
                    {status_badge(order.status)}
                </div>
                <div class="modal__body">
                    <dl class="details-list">
                        {rows
                            .into_iter()
                            .map(|(label, value)| view! {
                                <dt>{label}</dt>
                                <dd>{value}</dd>
                            })
                            .collect_view()}
                    </dl>
                </div>
                <div class="modal__footer">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        "Close"
                    </Button>
                </div>
            </div>
        </div>
    }
}

use serde::{Deserialize, Serialize};

use crate::enums::OrderStatus;
use crate::shared::api::ListPage;

// ============================================================================
// Aggregate
// ============================================================================

/// Заказ покупателя
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: String,
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub items: u32,
    pub total: f64,
    pub status: OrderStatus,
    #[serde(default, alias = "createdAt")]
    pub date: String,
    #[serde(default)]
    pub shipping_method: String,
    #[serde(default)]
    pub payment_method: String,
    /// Имя администратора, ведущего заказ
    #[serde(default)]
    pub handled_by: String,
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для частичного обновления заказа
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handled_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    pub order: Order,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
    pub page: u32,
    pub pages: u32,
    pub total: u64,
}

impl From<OrderListResponse> for ListPage<Order> {
    fn from(r: OrderListResponse) -> Self {
        ListPage {
            records: r.orders,
            page: r.page,
            total_pages: r.pages,
            total: r.total,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Продажи, закреплённые за администратором (или за всеми)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    /// `None` means all admins
    pub admin: Option<String>,
    pub revenue: f64,
    pub orders: usize,
    pub average_order_value: f64,
    pub customers: usize,
}

/// Точка дневного ряда выручки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySales {
    pub date: String,
    pub revenue: f64,
    pub orders: usize,
}

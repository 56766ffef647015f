use serde::{Deserialize, Serialize};

/// Сводные показатели по всей сети магазинов
///
/// Считаются агрегатором из списка магазинов, а не задаются литералами.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub total_stores: usize,
    pub active_stores: usize,
    /// Pending and disabled stores together
    pub inactive_stores: usize,
    pub total_revenue: f64,
    pub total_commission: f64,
    pub total_orders: f64,
}

use contracts::dashboards::d401_store_analytics::{
    ActivityLogsResponse, RevenueTrendsResponse, StoreAnalytics, TimeRange,
};
use serde::Serialize;
use view_model::SyncError;

use crate::shared::api_utils::{get_json, segment, with_query};

const API_BASE: &str = "/store-analytics";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RangeQuery {
    time_range: TimeRange,
}

#[derive(Debug, Serialize)]
struct PageQuery {
    page: u32,
    limit: u32,
}

fn store_path(store_id: &str, tail: &str) -> String {
    format!("{}/{}/{}", API_BASE, segment(store_id), tail)
}

/// Получить сводку магазина за период
pub async fn get_overview(token: &str, store_id: &str, time_range: TimeRange) -> Result<StoreAnalytics, SyncError> {
    let path = with_query(&store_path(store_id, "overview"), &RangeQuery { time_range });
    get_json(&path, Some(token)).await
}

/// Получить ряд выручки и комиссии за период
pub async fn get_revenue_trends(
    token: &str,
    store_id: &str,
    time_range: TimeRange,
) -> Result<RevenueTrendsResponse, SyncError> {
    let path = with_query(&store_path(store_id, "revenue-trends"), &RangeQuery { time_range });
    get_json(&path, Some(token)).await
}

/// Получить страницу журнала активности
pub async fn get_activity_logs(
    token: &str,
    store_id: &str,
    page: u32,
    limit: u32,
) -> Result<ActivityLogsResponse, SyncError> {
    let path = with_query(&store_path(store_id, "activity-logs"), &PageQuery { page, limit });
    get_json(&path, Some(token)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_strings() {
        assert_eq!(
            serde_qs::to_string(&RangeQuery { time_range: TimeRange::Quarter }).unwrap(),
            "timeRange=90d"
        );
        assert_eq!(
            serde_qs::to_string(&PageQuery { page: 2, limit: 50 }).unwrap(),
            "page=2&limit=50"
        );
        assert_eq!(store_path("a b", "overview"), "/store-analytics/a%20b/overview");
    }
}

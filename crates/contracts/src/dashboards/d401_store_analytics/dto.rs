use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::a001_store::StoreActivityLog;
use crate::enums::StoreStatus;

/// Период аналитики (`timeRange` в запросе)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "1y")]
    Year,
}

impl TimeRange {
    pub fn all() -> Vec<TimeRange> {
        vec![
            TimeRange::Week,
            TimeRange::Month,
            TimeRange::Quarter,
            TimeRange::Year,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            TimeRange::Week => "7d",
            TimeRange::Month => "30d",
            TimeRange::Quarter => "90d",
            TimeRange::Year => "1y",
        }
    }

    /// Calendar days covered, today included
    pub fn days(&self) -> u64 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
            TimeRange::Year => 365,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TimeRange::Week => "Last 7 days",
            TimeRange::Month => "Last 30 days",
            TimeRange::Quarter => "Last 90 days",
            TimeRange::Year => "Last year",
        }
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeRange::all()
            .into_iter()
            .find(|r| r.code() == s)
            .ok_or_else(|| format!("Unknown time range '{}'", s))
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsStoreRef {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub slug: String,
    pub status: StoreStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetric {
    pub total: f64,
    #[serde(default)]
    pub period: f64,
    #[serde(default)]
    pub growth: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersMetric {
    pub total: f64,
    #[serde(default)]
    pub period: f64,
    #[serde(default)]
    pub growth: String,
    #[serde(default)]
    pub average_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommissionMetric {
    pub rate: f64,
    pub total: f64,
    #[serde(default)]
    pub period: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountMetric {
    pub total: f64,
    #[serde(default)]
    pub growth: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsBlocks {
    pub revenue: PeriodMetric,
    pub orders: OrdersMetric,
    pub customers: CountMetric,
    pub products: CountMetric,
    pub commission: CommissionMetric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
    pub period: String,
}

/// Ответ `GET /store-analytics/{id}/overview`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreAnalytics {
    pub store: AnalyticsStoreRef,
    pub analytics: AnalyticsBlocks,
    pub time_range: TimeWindow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueTrend {
    pub date: String,
    pub revenue: f64,
    pub commission: f64,
}

/// Ответ `GET /store-analytics/{id}/revenue-trends`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueTrendsResponse {
    pub trends: Vec<RevenueTrend>,
    pub interval: String,
    pub time_range: TimeWindow,
}

/// Ответ `GET /store-analytics/{id}/activity-logs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogsResponse {
    pub logs: Vec<StoreActivityLog>,
    pub page: u32,
    pub pages: u32,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_range_codes() {
        assert_eq!("90d".parse::<TimeRange>(), Ok(TimeRange::Quarter));
        assert_eq!(TimeRange::default().code(), "30d");
        assert_eq!(serde_json::to_string(&TimeRange::Year).unwrap(), "\"1y\"");
        assert!("2w".parse::<TimeRange>().is_err());
        assert_eq!(TimeRange::Week.days(), 7);
        assert_eq!(TimeRange::Year.days(), 365);
    }
}

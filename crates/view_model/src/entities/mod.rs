//! Привязка записей контрактов к хранилищу, фильтру и агрегатору,
//! плюс производные сводки дашбордов.

pub mod admin;
pub mod order;
pub mod store;

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Days, NaiveDate};
use contracts::dashboards::d400_global_overview::GlobalStats;
use contracts::dashboards::d401_store_analytics::TimeRange;
use contracts::dashboards::d402_sales_overview::{DailySales, SalesSummary};
use contracts::domain::a001_store::Store;
use contracts::domain::a003_order::Order;
use contracts::enums::{AdminStatus, ClosedStatus, OrderStatus, StoreStatus};

use crate::aggregate::{aggregate, narrow, sum, AggregateScope, AggregateSpec};
use crate::filter::{CriteriaPatch, FilterCriteria};

pub fn store_status_spec() -> AggregateSpec {
    AggregateSpec::new("status", StoreStatus::wire_values()).with_sums(&["revenue", "commission", "orders"])
}

pub fn admin_status_spec() -> AggregateSpec {
    AggregateSpec::new("status", AdminStatus::wire_values())
}

/// Status counts of the orders screen follow the admin selection only.
pub fn order_status_spec() -> AggregateSpec {
    AggregateSpec::new("status", OrderStatus::wire_values())
        .with_sums(&["total"])
        .with_scope(AggregateScope::Narrowed(vec!["handled_by"]))
}

/// Network-wide totals computed from the loaded stores.
pub fn global_stats(stores: &[Store]) -> GlobalStats {
    let counts = aggregate(stores, "status", &StoreStatus::wire_values());
    let active = counts.get(StoreStatus::Active.as_str());
    GlobalStats {
        total_stores: stores.len(),
        active_stores: active,
        inactive_stores: stores.len() - active,
        total_revenue: sum(stores, "revenue"),
        total_commission: sum(stores, "commission"),
        total_orders: sum(stores, "orders"),
    }
}

/// Calendar window of `range` days ending on `today` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalesWindow {
    pub range: TimeRange,
    pub today: NaiveDate,
}

impl SalesWindow {
    pub fn new(range: TimeRange, today: NaiveDate) -> Self {
        Self { range, today }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.today
            .checked_sub_days(Days::new(self.range.days().saturating_sub(1)))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Orders with an unreadable date fall outside every window.
    pub fn contains(&self, order_date: &str) -> bool {
        order_day(order_date).is_some_and(|day| day >= self.first_day() && day <= self.today)
    }
}

/// Calendar part of an ISO timestamp
fn order_day(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.get(..10)?, "%Y-%m-%d").ok()
}

/// Non-cancelled orders of `admin` (all admins for `None`) inside `window`
/// (all time for `None`).
fn sales_orders(orders: &[Order], admin: Option<&str>, window: Option<SalesWindow>) -> Vec<Order> {
    let scoped = match admin {
        Some(name) => {
            let mut criteria = FilterCriteria::default();
            criteria.merge(CriteriaPatch::category("handled_by", name));
            narrow(orders, &criteria)
        }
        None => orders.to_vec(),
    };
    scoped
        .into_iter()
        .filter(|o| o.status != OrderStatus::Cancelled)
        .filter(|o| window.map_or(true, |w| w.contains(&o.date)))
        .collect()
}

/// Продажи по администратору (`None` означает всех) за период. Отменённые
/// заказы не входят в выручку.
pub fn sales_summary(orders: &[Order], admin: Option<&str>, window: Option<SalesWindow>) -> SalesSummary {
    let scoped = sales_orders(orders, admin, window);
    let revenue = sum(&scoped, "total");
    let customers: BTreeSet<&str> = scoped.iter().map(|o| o.customer_email.as_str()).collect();
    SalesSummary {
        admin: admin.map(str::to_string),
        revenue,
        orders: scoped.len(),
        average_order_value: if scoped.is_empty() {
            0.0
        } else {
            revenue / scoped.len() as f64
        },
        customers: customers.len(),
    }
}

/// Daily revenue series ordered by date. The date key is the calendar part
/// of the order timestamp.
pub fn daily_sales(orders: &[Order], admin: Option<&str>, window: Option<SalesWindow>) -> Vec<DailySales> {
    let mut days: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for order in sales_orders(orders, admin, window) {
        let day: String = order.date.chars().take(10).collect();
        let entry = days.entry(day).or_insert((0.0, 0));
        entry.0 += order.total;
        entry.1 += 1;
    }
    days.into_iter()
        .map(|(date, (revenue, orders))| DailySales { date, revenue, orders })
        .collect()
}

/// Distinct non-empty values of `handled_by`, for the admin filter.
pub fn order_handlers(orders: &[Order]) -> Vec<String> {
    let names: BTreeSet<&str> = orders
        .iter()
        .map(|o| o.handled_by.as_str())
        .filter(|n| !n.is_empty())
        .collect();
    names.into_iter().map(str::to_string).collect()
}


#[cfg(test)]
mod tests {
    use super::test_fixtures::{order, orders, stores};
    use super::*;

    #[test]
    fn test_global_stats_from_stores() {
        let stats = global_stats(&stores());
        assert_eq!(stats.total_stores, 3);
        assert_eq!(stats.active_stores, 1);
        assert_eq!(stats.inactive_stores, 2);
        assert!((stats.total_revenue - 1750.0).abs() < 1e-9);
        assert!((stats.total_commission - 140.0).abs() < 1e-9);
        assert_eq!(stats.total_orders, 30.0);
    }

    #[test]
    fn test_global_stats_empty() {
        assert_eq!(global_stats(&[]), GlobalStats::default());
    }

    #[test]
    fn test_sales_summary_per_admin() {
        let summary = sales_summary(&orders(), Some("Mike Chen"), None);
        assert_eq!(summary.orders, 2);
        assert_eq!(summary.customers, 2);
        assert!((summary.revenue - 246.49).abs() < 1e-9);
        assert!((summary.average_order_value - 123.245).abs() < 1e-9);

        let nobody = sales_summary(&orders(), Some("Nobody"), None);
        assert_eq!(nobody.orders, 0);
        assert_eq!(nobody.average_order_value, 0.0);
    }

    #[test]
    fn test_cancelled_orders_excluded_from_sales() {
        let mut list = orders();
        list.push(order("ORD-004", "Sarah Davis", OrderStatus::Cancelled, 1000.0));
        let summary = sales_summary(&list, None, None);
        assert_eq!(summary.orders, 3);
        assert_eq!(summary.customers, 3);
    }

    #[test]
    fn test_daily_sales_grouped_by_day() {
        let days = daily_sales(&orders(), None, None);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "2024-01-14");
        assert_eq!(days[0].orders, 1);
        assert_eq!(days[1].date, "2024-01-15");
        assert!((days[1].revenue - 201.5).abs() < 1e-9);
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_sales_window_bounds() {
        let week = SalesWindow::new(TimeRange::Week, day("2024-01-21"));
        assert_eq!(week.first_day(), day("2024-01-15"));
        assert!(week.contains("2024-01-15T10:30:00Z"));
        assert!(week.contains("2024-01-21"));
        assert!(!week.contains("2024-01-14T15:20:00Z"));
        assert!(!week.contains("2024-01-22T00:00:00Z"));
        assert!(!week.contains("yesterday"));
    }

    #[test]
    fn test_sales_summary_within_window() {
        let week = SalesWindow::new(TimeRange::Week, day("2024-01-21"));
        let summary = sales_summary(&orders(), None, Some(week));
        assert_eq!(summary.orders, 2);
        assert!((summary.revenue - 201.5).abs() < 1e-9);

        let mike = sales_summary(&orders(), Some("Mike Chen"), Some(week));
        assert_eq!(mike.orders, 1);
        assert!((mike.revenue - 156.5).abs() < 1e-9);

        let month = SalesWindow::new(TimeRange::Month, day("2024-01-21"));
        assert_eq!(sales_summary(&orders(), None, Some(month)).orders, 3);

        let later = SalesWindow::new(TimeRange::Week, day("2024-03-01"));
        let empty = sales_summary(&orders(), None, Some(later));
        assert_eq!(empty.orders, 0);
        assert_eq!(empty.average_order_value, 0.0);
    }

    #[test]
    fn test_daily_sales_within_window() {
        let week = SalesWindow::new(TimeRange::Week, day("2024-01-21"));
        let days = daily_sales(&orders(), None, Some(week));
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, "2024-01-15");
        assert_eq!(days[0].orders, 2);

        // orders after `today` are outside the window
        let before = SalesWindow::new(TimeRange::Week, day("2024-01-14"));
        let days = daily_sales(&orders(), None, Some(before));
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, "2024-01-14");
    }

    #[test]
    fn test_order_handlers_distinct_sorted() {
        assert_eq!(order_handlers(&orders()), vec!["David Wilson", "Mike Chen"]);
    }
}

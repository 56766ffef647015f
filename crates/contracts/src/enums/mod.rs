//! Closed status vocabularies shared by the console and the API.

pub mod admin_status;
pub mod order_status;
pub mod store_status;

pub use admin_status::AdminStatus;
pub use order_status::OrderStatus;
pub use store_status::StoreStatus;

use std::str::FromStr;

/// Статус с закрытым набором значений.
///
/// Любое значение вне `all()` отклоняется при разборе, поэтому переключение
/// статуса никогда не выходит за пределы домена.
pub trait ClosedStatus: Copy + Eq + FromStr<Err = String> + 'static {
    /// All values in display order.
    fn all() -> &'static [Self];

    /// Canonical wire value.
    fn as_str(&self) -> &'static str;

    fn display_name(&self) -> &'static str;

    /// Next value of the toggle cycle, `None` when the status is not toggled
    /// from the list (e.g. orders are set explicitly).
    fn next(&self) -> Option<Self> {
        None
    }

    /// Wire values of `all()`, used as countable keys by the aggregator.
    fn wire_values() -> Vec<String> {
        Self::all().iter().map(|s| s.as_str().to_string()).collect()
    }
}

/// Builds the error message returned by `FromStr` for unknown values.
pub(crate) fn unknown_status<S: ClosedStatus>(kind: &str, value: &str) -> String {
    let allowed: Vec<&str> = S::all().iter().map(|s| s.as_str()).collect();
    format!(
        "Unknown {} status '{}', expected one of: {}",
        kind,
        value,
        allowed.join(", ")
    )
}

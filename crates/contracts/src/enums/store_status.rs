use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{unknown_status, ClosedStatus};

/// Статус магазина в сети.
///
/// Каноническое значение на проводе: `active`. Ранние мок-данные консоли
/// использовали `live`; оно принимается как синоним `Active` при разборе,
/// но никогда не отправляется обратно.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreStatus {
    #[serde(alias = "live")]
    Active,
    Pending,
    Disabled,
}

const ALL: [StoreStatus; 3] = [
    StoreStatus::Active,
    StoreStatus::Pending,
    StoreStatus::Disabled,
];

impl ClosedStatus for StoreStatus {
    fn all() -> &'static [Self] {
        &ALL
    }

    fn as_str(&self) -> &'static str {
        match self {
            StoreStatus::Active => "active",
            StoreStatus::Pending => "pending",
            StoreStatus::Disabled => "disabled",
        }
    }

    fn display_name(&self) -> &'static str {
        match self {
            StoreStatus::Active => "Live",
            StoreStatus::Pending => "Pending",
            StoreStatus::Disabled => "Disabled",
        }
    }

    /// Active → Disabled → Pending → Active
    fn next(&self) -> Option<Self> {
        Some(match self {
            StoreStatus::Active => StoreStatus::Disabled,
            StoreStatus::Disabled => StoreStatus::Pending,
            StoreStatus::Pending => StoreStatus::Active,
        })
    }
}

impl FromStr for StoreStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" | "live" => Ok(StoreStatus::Active),
            "pending" => Ok(StoreStatus::Pending),
            "disabled" => Ok(StoreStatus::Disabled),
            other => Err(unknown_status::<StoreStatus>("store", other)),
        }
    }
}

impl fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_is_accepted_as_active() {
        assert_eq!("live".parse::<StoreStatus>(), Ok(StoreStatus::Active));
        let parsed: StoreStatus = serde_json::from_str("\"live\"").unwrap();
        assert_eq!(parsed, StoreStatus::Active);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"active\"");
    }

    #[test]
    fn test_toggle_cycle_stays_in_domain() {
        let mut status = StoreStatus::Active;
        let mut seen = Vec::new();
        for _ in 0..3 {
            status = status.next().unwrap();
            seen.push(status);
        }
        assert_eq!(
            seen,
            vec![StoreStatus::Disabled, StoreStatus::Pending, StoreStatus::Active]
        );
    }

    #[test]
    fn test_unknown_value_rejected() {
        let err = "archived".parse::<StoreStatus>().unwrap_err();
        assert!(err.contains("active, pending, disabled"));
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{unknown_status, ClosedStatus};

/// Статус учётной записи администратора
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminStatus {
    Active,
    Inactive,
}

const ALL: [AdminStatus; 2] = [AdminStatus::Active, AdminStatus::Inactive];

impl ClosedStatus for AdminStatus {
    fn all() -> &'static [Self] {
        &ALL
    }

    fn as_str(&self) -> &'static str {
        match self {
            AdminStatus::Active => "active",
            AdminStatus::Inactive => "inactive",
        }
    }

    fn display_name(&self) -> &'static str {
        match self {
            AdminStatus::Active => "Active",
            AdminStatus::Inactive => "Inactive",
        }
    }

    fn next(&self) -> Option<Self> {
        Some(match self {
            AdminStatus::Active => AdminStatus::Inactive,
            AdminStatus::Inactive => AdminStatus::Active,
        })
    }
}

impl FromStr for AdminStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(AdminStatus::Active),
            "inactive" => Ok(AdminStatus::Inactive),
            other => Err(unknown_status::<AdminStatus>("admin", other)),
        }
    }
}

impl fmt::Display for AdminStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

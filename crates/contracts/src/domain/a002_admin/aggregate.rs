use serde::{Deserialize, Serialize};

use crate::enums::AdminStatus;
use crate::shared::api::ListPage;

// ============================================================================
// Aggregate
// ============================================================================

/// Администратор консоли
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: String,
    pub status: AdminStatus,
    #[serde(default)]
    pub last_login: Option<String>,
    #[serde(default)]
    pub join_date: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания администратора
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminDto {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub permissions: Vec<String>,
}

impl CreateAdminDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".into());
        }
        if !self.email.contains('@') {
            return Err("Email is invalid".into());
        }
        if self.role.trim().is_empty() {
            return Err("Role is required".into());
        }
        Ok(())
    }
}

/// DTO для частичного обновления администратора
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    pub admin: Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminListResponse {
    pub admins: Vec<Admin>,
    pub page: u32,
    pub pages: u32,
    pub total: u64,
}

impl From<AdminListResponse> for ListPage<Admin> {
    fn from(r: AdminListResponse) -> Self {
        ListPage {
            records: r.admins,
            page: r.page,
            total_pages: r.pages,
            total: r.total,
        }
    }
}

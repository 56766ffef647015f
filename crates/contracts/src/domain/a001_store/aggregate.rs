use serde::{Deserialize, Serialize};

use crate::enums::StoreStatus;
use crate::shared::api::ListPage;

// ============================================================================
// Aggregate
// ============================================================================

/// Магазин сети (арендатор)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(alias = "slug")]
    pub subdomain: String,
    #[serde(default)]
    pub admin_name: String,
    #[serde(default)]
    pub admin_email: String,
    pub status: StoreStatus,
    #[serde(default)]
    pub revenue: StoreRevenue,
    #[serde(default)]
    pub sales_volume: SalesVolume,
    #[serde(default)]
    pub commission: Commission,
    #[serde(default, alias = "createdAt")]
    pub created_date: String,
    #[serde(default)]
    pub last_login: Option<String>,
    #[serde(default)]
    pub activity_logs: Vec<StoreActivityLog>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreRevenue {
    pub total: f64,
    pub monthly: f64,
    pub weekly: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesVolume {
    pub orders: u64,
    /// Average order value
    pub aov: f64,
    pub products: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Commission {
    /// Percent of revenue, e.g. `8.5`
    pub rate: f64,
    pub earned: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Login,
    ProductUpdate,
    Order,
    Suspicious,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Запись журнала активности магазина
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreActivityLog {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub description: String,
    pub timestamp: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
}

impl Store {
    pub fn is_live(&self) -> bool {
        self.status == StoreStatus::Active
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

pub const DEFAULT_COMMISSION_RATE: f64 = 8.0;

/// DTO для создания магазина вместе с его администратором
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreDto {
    pub name: String,
    pub subdomain: String,
    pub admin_name: String,
    pub admin_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_rate: Option<f64>,
}

impl Default for CreateStoreDto {
    fn default() -> Self {
        Self {
            name: String::new(),
            subdomain: String::new(),
            admin_name: String::new(),
            admin_email: String::new(),
            admin_password: None,
            commission_rate: Some(DEFAULT_COMMISSION_RATE),
        }
    }
}

impl CreateStoreDto {
    /// Валидация формы до отправки на сервер
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Store name is required".into());
        }
        let subdomain = self.subdomain.trim();
        if subdomain.is_empty() {
            return Err("Subdomain is required".into());
        }
        if !subdomain
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err("Subdomain may contain only lowercase letters, digits and '-'".into());
        }
        if self.admin_name.trim().is_empty() {
            return Err("Admin name is required".into());
        }
        if !self.admin_email.contains('@') {
            return Err("Admin email is invalid".into());
        }
        if let Some(rate) = self.commission_rate {
            if !(0.0..=100.0).contains(&rate) {
                return Err("Commission rate must be between 0 and 100".into());
            }
        }
        Ok(())
    }
}

/// DTO для частичного обновления магазина
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStoreDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordDto {
    pub admin_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub new_password: String,
}

/// Ответ `POST /stores`, `PUT /stores/{id}` и `PUT /stores/{id}/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    pub store: Store,
}

/// Страница списка `GET /stores`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreListResponse {
    pub stores: Vec<Store>,
    pub page: u32,
    pub pages: u32,
    pub total: u64,
}

impl From<StoreListResponse> for ListPage<Store> {
    fn from(r: StoreListResponse) -> Self {
        ListPage {
            records: r.stores,
            page: r.page,
            total_pages: r.pages,
            total: r.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_store_shape_deserializes() {
        let json = r#"{
            "_id": "65a1",
            "name": "Ewa Luxe",
            "slug": "ewaluxe",
            "status": "live",
            "createdAt": "2023-08-15"
        }"#;
        let store: Store = serde_json::from_str(json).unwrap();
        assert_eq!(store.id, "65a1");
        assert_eq!(store.subdomain, "ewaluxe");
        assert!(store.is_live());
        assert_eq!(store.revenue.total, 0.0);
        assert_eq!(store.created_date, "2023-08-15");
    }

    #[test]
    fn test_create_dto_validation() {
        let mut dto = CreateStoreDto {
            name: "TechHub Pro".into(),
            subdomain: "techhub".into(),
            admin_name: "Tech Admin".into(),
            admin_email: "tech@admin.com".into(),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());

        dto.subdomain = "Tech Hub".into();
        assert!(dto.validate().is_err());

        dto.subdomain = "techhub".into();
        dto.commission_rate = Some(140.0);
        assert!(dto.validate().is_err());
    }
}

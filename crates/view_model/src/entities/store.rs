use contracts::domain::a001_store::Store;
use contracts::enums::{ClosedStatus, StoreStatus};

use crate::entity::ListEntity;

impl ListEntity for Store {
    fn entity_id(&self) -> &str {
        &self.id
    }

    fn search_fields() -> &'static [&'static str] {
        &["name", "admin_name", "subdomain"]
    }

    fn get_field_value(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.clone()),
            "name" => Some(self.name.clone()),
            "subdomain" => Some(self.subdomain.clone()),
            "admin_name" => Some(self.admin_name.clone()),
            "admin_email" => Some(self.admin_email.clone()),
            "status" => Some(self.status.as_str().to_string()),
            "created_date" => Some(self.created_date.clone()),
            _ => self.get_numeric_value(field).map(|v| v.to_string()),
        }
    }

    /// `revenue` and `commission` are lifetime totals.
    fn get_numeric_value(&self, field: &str) -> Option<f64> {
        match field {
            "revenue" => Some(self.revenue.total),
            "monthly_revenue" => Some(self.revenue.monthly),
            "weekly_revenue" => Some(self.revenue.weekly),
            "commission" => Some(self.commission.earned),
            "commission_rate" => Some(self.commission.rate),
            "orders" => Some(self.sales_volume.orders as f64),
            "aov" => Some(self.sales_volume.aov),
            "products" => Some(self.sales_volume.products as f64),
            _ => None,
        }
    }

    fn set_field_value(&mut self, field: &str, value: &str) -> Result<(), String> {
        match field {
            "status" => self.status = value.parse::<StoreStatus>()?,
            "name" => self.name = value.to_string(),
            "subdomain" => self.subdomain = value.to_string(),
            "admin_name" => self.admin_name = value.to_string(),
            "admin_email" => self.admin_email = value.to_string(),
            _ => return Err(format!("Store field '{}' cannot be edited", field)),
        }
        Ok(())
    }
}

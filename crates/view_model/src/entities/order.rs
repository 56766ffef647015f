use contracts::domain::a003_order::Order;
use contracts::enums::{ClosedStatus, OrderStatus};

use crate::entity::ListEntity;

impl ListEntity for Order {
    fn entity_id(&self) -> &str {
        &self.id
    }

    fn search_fields() -> &'static [&'static str] {
        &["customer_name", "customer_email", "id"]
    }

    fn get_field_value(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.clone()),
            "customer_name" => Some(self.customer_name.clone()),
            "customer_email" => Some(self.customer_email.clone()),
            "status" => Some(self.status.as_str().to_string()),
            "handled_by" => Some(self.handled_by.clone()),
            "shipping_method" => Some(self.shipping_method.clone()),
            "payment_method" => Some(self.payment_method.clone()),
            "date" => Some(self.date.clone()),
            "items" => Some(self.items.to_string()),
            "total" => Some(format!("{:.2}", self.total)),
            _ => None,
        }
    }

    fn get_numeric_value(&self, field: &str) -> Option<f64> {
        match field {
            "total" => Some(self.total),
            "items" => Some(self.items as f64),
            _ => None,
        }
    }

    fn set_field_value(&mut self, field: &str, value: &str) -> Result<(), String> {
        match field {
            "status" => self.status = value.parse::<OrderStatus>()?,
            "handled_by" => self.handled_by = value.to_string(),
            "shipping_method" => self.shipping_method = value.to_string(),
            "payment_method" => self.payment_method = value.to_string(),
            _ => return Err(format!("Order field '{}' cannot be edited", field)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_fixtures::order;

    #[test]
    fn test_field_access() {
        let o = order("ORD-007", "Ann Lee", OrderStatus::Delivered, 12.5);
        assert_eq!(o.get_field_value("status").as_deref(), Some("delivered"));
        assert_eq!(o.get_field_value("customer_email").as_deref(), Some("ann.lee@email.com"));
        assert_eq!(o.get_field_value("nope"), None);
        assert_eq!(o.get_numeric_value("total"), Some(12.5));
    }

    #[test]
    fn test_status_edit_is_closed() {
        let mut o = order("ORD-007", "Ann Lee", OrderStatus::Pending, 12.5);
        assert!(o.set_field_value("status", "refunded").is_err());
        assert_eq!(o.status, OrderStatus::Pending);
        assert!(o.set_field_value("total", "1").is_err());
        o.set_field_value("status", "Cancelled").unwrap();
        assert_eq!(o.status, OrderStatus::Cancelled);
    }
}

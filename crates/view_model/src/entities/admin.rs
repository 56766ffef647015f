use contracts::domain::a002_admin::Admin;
use contracts::enums::{AdminStatus, ClosedStatus};

use crate::entity::ListEntity;

impl ListEntity for Admin {
    fn entity_id(&self) -> &str {
        &self.id
    }

    fn search_fields() -> &'static [&'static str] {
        &["name", "email", "role"]
    }

    fn get_field_value(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.clone()),
            "name" => Some(self.name.clone()),
            "email" => Some(self.email.clone()),
            "phone" => Some(self.phone.clone()),
            "role" => Some(self.role.clone()),
            "status" => Some(self.status.as_str().to_string()),
            "join_date" => Some(self.join_date.clone()),
            "last_login" => self.last_login.clone(),
            _ => None,
        }
    }

    fn set_field_value(&mut self, field: &str, value: &str) -> Result<(), String> {
        match field {
            "status" => self.status = value.parse::<AdminStatus>()?,
            "name" => self.name = value.to_string(),
            "email" => self.email = value.to_string(),
            "phone" => self.phone = value.to_string(),
            "role" => self.role = value.to_string(),
            _ => return Err(format!("Admin field '{}' cannot be edited", field)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_fixtures::admin;
    use crate::filter::{apply_filter, build_predicate, CriteriaPatch, FilterCriteria};

    #[test]
    fn test_search_covers_role() {
        let admins = vec![
            admin("a1", "John Smith", "Super Admin", AdminStatus::Active),
            admin("a2", "Sarah Johnson", "Store Manager", AdminStatus::Inactive),
        ];
        let mut criteria = FilterCriteria::default();
        criteria.merge(CriteriaPatch::search("manager"));
        let visible = apply_filter(&admins, &build_predicate::<Admin>(&criteria));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "a2");
    }

    #[test]
    fn test_status_toggles_both_ways() {
        let mut a = admin("a1", "John Smith", "Super Admin", AdminStatus::Active);
        let next = a.status.next().unwrap();
        a.set_field_value("status", next.as_str()).unwrap();
        assert_eq!(a.status, AdminStatus::Inactive);
        assert!(a.set_field_value("status", "suspended").is_err());
    }
}

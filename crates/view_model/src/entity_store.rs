use crate::entity::ListEntity;

/// Упорядоченная коллекция записей одного вида, принадлежащая одному экрану.
///
/// Идентификаторы уникальны в любой момент; изменяется только через методы ниже.
#[derive(Debug, Clone)]
pub struct EntityStore<T> {
    records: Vec<T>,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: ListEntity> EntityStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a source collection. Later duplicates of an id
    /// replace the earlier record in place.
    pub fn from_records(records: Vec<T>) -> Self {
        let mut store = Self::new();
        store.replace_all(records);
        store
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|r| r.entity_id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.entity_id() == id)
    }

    /// Substitutes the whole collection; nothing of the old one survives.
    pub fn replace_all(&mut self, new_records: Vec<T>) {
        let mut next: Vec<T> = Vec::with_capacity(new_records.len());
        for record in new_records {
            match next
                .iter()
                .position(|r| r.entity_id() == record.entity_id())
            {
                Some(pos) => {
                    log::warn!("duplicate id '{}' in source collection", record.entity_id());
                    next[pos] = record;
                }
                None => next.push(record),
            }
        }
        self.records = next;
    }

    /// Replaces the record with the same id in place, or appends it.
    pub fn upsert(&mut self, record: T) {
        match self.position(record.entity_id()) {
            Some(pos) => self.records[pos] = record,
            None => self.records.push(record),
        }
    }

    /// Returns `true` when a record was removed. Absent ids are a no-op.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(pos) => {
                self.records.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Applies a single-field change to a copy of the record and swaps it in.
    /// Unknown ids and rejected values are silent no-ops (`false`).
    pub fn update_field(&mut self, id: &str, field: &str, value: &str) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        let mut updated = self.records[pos].clone();
        match updated.set_field_value(field, value) {
            Ok(()) => {
                self.records[pos] = updated;
                true
            }
            Err(e) => {
                log::debug!("update_field({}, {}) rejected: {}", id, field, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_fixtures::{order, orders};
    use contracts::enums::OrderStatus;

    fn ids(store: &EntityStore<contracts::domain::a003_order::Order>) -> Vec<&str> {
        store.records().iter().map(|o| o.id.as_str()).collect()
    }

    #[test]
    fn test_replace_all_discards_old_records() {
        let mut store = EntityStore::from_records(orders());
        store.replace_all(vec![order("ORD-100", "Ann Lee", OrderStatus::Pending, 10.0)]);
        assert_eq!(ids(&store), vec!["ORD-100"]);
    }

    #[test]
    fn test_upsert_keeps_position_and_appends_new() {
        let mut store = EntityStore::from_records(orders());
        let mut changed = store.get("ORD-002").unwrap().clone();
        changed.total = 1.0;
        store.upsert(changed);
        store.upsert(order("ORD-009", "New Customer", OrderStatus::Pending, 5.0));

        assert_eq!(ids(&store), vec!["ORD-001", "ORD-002", "ORD-003", "ORD-009"]);
        assert_eq!(store.get("ORD-002").unwrap().total, 1.0);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut store = EntityStore::from_records(orders());
        assert!(store.remove("ORD-001"));
        assert!(!store.remove("ORD-001"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_field_ignores_unknown_id_and_bad_value() {
        let mut store = EntityStore::from_records(orders());
        assert!(!store.update_field("missing", "status", "shipped"));
        assert!(!store.update_field("ORD-001", "status", "teleported"));
        assert_eq!(store.get("ORD-001").unwrap().status, OrderStatus::Pending);

        assert!(store.update_field("ORD-001", "status", "delivered"));
        assert_eq!(store.get("ORD-001").unwrap().status, OrderStatus::Delivered);
    }

    #[test]
    fn test_duplicate_ids_collapse() {
        let mut list = orders();
        list.push(order("ORD-001", "Replaced", OrderStatus::Cancelled, 1.0));
        let store = EntityStore::from_records(list);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get("ORD-001").unwrap().customer_name, "Replaced");
    }
}

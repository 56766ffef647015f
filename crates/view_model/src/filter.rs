//! Построение предиката из критериев и применение его к коллекции.

use std::collections::BTreeMap;

use contracts::shared::api::ALL_SENTINEL;

use crate::entity::ListEntity;

/// Текущие критерии фильтрации экрана
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    /// field -> selected value; `"all"` matches everything
    pub categories: BTreeMap<String, String>,
}

/// Частичное изменение критериев (`set_filter_criteria`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaPatch {
    pub search: Option<String>,
    pub categories: Vec<(String, String)>,
}

impl CriteriaPatch {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            categories: Vec::new(),
        }
    }

    pub fn category(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            search: None,
            categories: vec![(field.into(), value.into())],
        }
    }

    pub fn and_category(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.categories.push((field.into(), value.into()));
        self
    }
}

impl FilterCriteria {
    /// Merges a patch. Returns `false` when nothing actually changed.
    pub fn merge(&mut self, patch: CriteriaPatch) -> bool {
        let before = self.clone();
        if let Some(search) = patch.search {
            self.search = search.trim().to_string();
        }
        for (field, value) in patch.categories {
            if value == ALL_SENTINEL {
                self.categories.remove(&field);
            } else {
                self.categories.insert(field, value);
            }
        }
        *self != before
    }

    /// Selected value for a categorical field, `"all"` when unset.
    pub fn category(&self, field: &str) -> &str {
        self.categories
            .get(field)
            .map(String::as_str)
            .unwrap_or(ALL_SENTINEL)
    }

    /// Copy of these criteria keeping only the categorical fields listed.
    pub fn narrowed_to(&self, fields: &[&str]) -> FilterCriteria {
        FilterCriteria {
            search: String::new(),
            categories: self
                .categories
                .iter()
                .filter(|(field, _)| fields.contains(&field.as_str()))
                .map(|(f, v)| (f.clone(), v.clone()))
                .collect(),
        }
    }
}

/// Combined predicate: text search AND every categorical criterion.
pub struct Predicate {
    search: Option<String>,
    search_fields: Vec<&'static str>,
    categories: Vec<(String, String)>,
}

impl Predicate {
    pub fn matches<T: ListEntity>(&self, record: &T) -> bool {
        self.matches_search(record) && self.matches_categories(record)
    }

    fn matches_search<T: ListEntity>(&self, record: &T) -> bool {
        let Some(term) = &self.search else {
            return true;
        };
        self.search_fields.iter().any(|field| {
            record
                .get_field_value(field)
                .unwrap_or_default()
                .to_lowercase()
                .contains(term.as_str())
        })
    }

    fn matches_categories<T: ListEntity>(&self, record: &T) -> bool {
        self.categories.iter().all(|(field, expected)| {
            record.get_field_value(field).unwrap_or_default() == *expected
        })
    }
}

/// Builds the predicate for `T` using its declared search fields.
pub fn build_predicate<T: ListEntity>(criteria: &FilterCriteria) -> Predicate {
    build_predicate_with_fields(criteria, T::search_fields())
}

pub fn build_predicate_with_fields(criteria: &FilterCriteria, fields: &[&'static str]) -> Predicate {
    let term = criteria.search.trim().to_lowercase();
    Predicate {
        search: (!term.is_empty()).then_some(term),
        search_fields: fields.to_vec(),
        categories: criteria
            .categories
            .iter()
            .filter(|(_, value)| value.as_str() != ALL_SENTINEL)
            .map(|(f, v)| (f.clone(), v.clone()))
            .collect(),
    }
}

/// New sequence of matching records in their original relative order.
pub fn apply_filter<T: ListEntity>(records: &[T], predicate: &Predicate) -> Vec<T> {
    records
        .iter()
        .filter(|r| predicate.matches(*r))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_fixtures::orders;
    use contracts::domain::a003_order::Order;

    fn ids(records: &[Order]) -> Vec<&str> {
        records.iter().map(|o| o.id.as_str()).collect()
    }

    fn criteria(patch: CriteriaPatch) -> FilterCriteria {
        let mut c = FilterCriteria::default();
        c.merge(patch);
        c
    }

    #[test]
    fn test_status_filter_keeps_order() {
        let c = criteria(CriteriaPatch::category("status", "pending"));
        let visible = apply_filter(&orders(), &build_predicate::<Order>(&c));
        assert_eq!(ids(&visible), vec!["ORD-001", "ORD-003"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let data = orders();
        let hit = apply_filter(&data, &build_predicate::<Order>(&criteria(CriteriaPatch::search("sar"))));
        assert_eq!(ids(&hit), vec!["ORD-001"]);
        assert_eq!(hit[0].customer_name, "Sarah Davis");

        let miss = apply_filter(&data, &build_predicate::<Order>(&criteria(CriteriaPatch::search("zzz"))));
        assert!(miss.is_empty());
    }

    #[test]
    fn test_blank_search_and_all_match_everything() {
        let c = criteria(CriteriaPatch::search("   ").and_category("status", "all"));
        assert!(c.categories.is_empty());
        let visible = apply_filter(&orders(), &build_predicate::<Order>(&c));
        assert_eq!(visible.len(), 3);
    }

    #[test]
    fn test_criteria_compose_with_and() {
        let c = criteria(
            CriteriaPatch::search("mi")
                .and_category("status", "pending")
                .and_category("handled_by", "Mike Chen"),
        );
        let visible = apply_filter(&orders(), &build_predicate::<Order>(&c));
        assert_eq!(ids(&visible), vec!["ORD-003"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let c = criteria(CriteriaPatch::search("e").and_category("status", "pending"));
        let p = build_predicate::<Order>(&c);
        let once = apply_filter(&orders(), &p);
        let twice = apply_filter(&once, &p);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unknown_field_is_empty_string() {
        let p = build_predicate_with_fields(&criteria(CriteriaPatch::search("x")), &["no_such_field"]);
        assert!(apply_filter(&orders(), &p).is_empty());

        let c = criteria(CriteriaPatch::category("no_such_field", ""));
        assert_eq!(apply_filter(&orders(), &build_predicate::<Order>(&c)).len(), 3);
    }

    #[test]
    fn test_empty_collection() {
        let c = criteria(CriteriaPatch::search("anything"));
        assert!(apply_filter::<Order>(&[], &build_predicate::<Order>(&c)).is_empty());
    }

    #[test]
    fn test_merge_reports_changes() {
        let mut c = FilterCriteria::default();
        assert!(c.merge(CriteriaPatch::category("status", "pending")));
        assert!(!c.merge(CriteriaPatch::category("status", "pending")));
        assert!(c.merge(CriteriaPatch::category("status", "all")));
        assert_eq!(c.category("status"), "all");
    }

    #[test]
    fn test_merge_ignores_surrounding_whitespace() {
        let mut c = FilterCriteria::default();
        assert!(c.merge(CriteriaPatch::search("sar")));
        assert!(!c.merge(CriteriaPatch::search("sar ")));
        assert!(!c.merge(CriteriaPatch::search("  sar")));
        assert_eq!(c.search, "sar");
        assert!(c.merge(CriteriaPatch::search("   ")));
        assert!(c.search.is_empty());
    }
}

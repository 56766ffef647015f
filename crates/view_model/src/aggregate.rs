//! Производные сводки по коллекции.
//!
//! Всё пересчитывается с нуля на каждом вызове; кэша нет.

use crate::entity::ListEntity;
use crate::filter::{apply_filter, build_predicate_with_fields, FilterCriteria};

/// Упорядоченное отображение значение → количество
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupCounts {
    entries: Vec<(String, usize)>,
}

impl GroupCounts {
    /// Count for a value, 0 for values that were not requested.
    pub fn get(&self, value: &str) -> usize {
        self.entries
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(v, _)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(v, c)| (v.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts (records outside the countable values are not included).
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }
}

/// Counts records per value of `group_field`. Every countable value is
/// present in the result, with 0 when nothing matches.
pub fn aggregate<T: ListEntity>(records: &[T], group_field: &str, countable_values: &[String]) -> GroupCounts {
    let mut entries: Vec<(String, usize)> =
        countable_values.iter().map(|v| (v.clone(), 0)).collect();
    for record in records {
        let value = record.get_field_value(group_field).unwrap_or_default();
        if let Some(entry) = entries.iter_mut().find(|(v, _)| *v == value) {
            entry.1 += 1;
        }
    }
    GroupCounts { entries }
}

/// Sum of a numeric field; missing or non-finite values count as 0.
pub fn sum<T: ListEntity>(records: &[T], numeric_field: &str) -> f64 {
    records
        .iter()
        .filter_map(|r| r.get_numeric_value(numeric_field))
        .filter(|v| v.is_finite())
        .sum()
}

/// Narrows the collection by the categorical criteria only (search is ignored).
pub fn narrow<T: ListEntity>(records: &[T], criteria: &FilterCriteria) -> Vec<T> {
    let categorical = FilterCriteria {
        search: String::new(),
        categories: criteria.categories.clone(),
    };
    apply_filter(records, &build_predicate_with_fields(&categorical, &[]))
}

/// Какую часть коллекции суммирует агрегатор
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateScope {
    /// Whole collection
    Full,
    /// Records currently visible after filtering
    Visible,
    /// Whole collection narrowed by the current selection of these
    /// categorical fields only
    Narrowed(Vec<&'static str>),
}

/// Описание сводок экрана
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateSpec {
    pub group_field: &'static str,
    pub countable_values: Vec<String>,
    pub sum_fields: Vec<&'static str>,
    pub scope: AggregateScope,
}

/// Результат для слоя представления
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregates {
    pub counts: GroupCounts,
    /// Number of records in the summarized scope
    pub total: usize,
    pub sums: Vec<(String, f64)>,
}

impl Aggregates {
    pub fn sum(&self, field: &str) -> f64 {
        self.sums
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| *v)
            .unwrap_or(0.0)
    }
}

impl AggregateSpec {
    pub fn new(group_field: &'static str, countable_values: Vec<String>) -> Self {
        Self {
            group_field,
            countable_values,
            sum_fields: Vec::new(),
            scope: AggregateScope::Full,
        }
    }

    pub fn with_sums(mut self, fields: &[&'static str]) -> Self {
        self.sum_fields = fields.to_vec();
        self
    }

    pub fn with_scope(mut self, scope: AggregateScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn compute<T: ListEntity>(&self, all: &[T], visible: &[T], criteria: &FilterCriteria) -> Aggregates {
        let narrowed;
        let scoped: &[T] = match &self.scope {
            AggregateScope::Full => all,
            AggregateScope::Visible => visible,
            AggregateScope::Narrowed(fields) => {
                narrowed = narrow(all, &criteria.narrowed_to(fields));
                &narrowed
            }
        };
        Aggregates {
            counts: aggregate(scoped, self.group_field, &self.countable_values),
            total: scoped.len(),
            sums: self
                .sum_fields
                .iter()
                .map(|f| (f.to_string(), sum(scoped, f)))
                .collect(),
        }
    }
}

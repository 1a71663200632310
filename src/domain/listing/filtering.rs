use serde::{Deserialize, Serialize};

use super::QueryParams;

const VALUE_SEPARATOR: char = ',';

/// Kind of data a filter narrows on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Text,
    Boolean,
    Numeric,
}

/// One legal value of a filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterValue {
    pub id: String,
    pub label: String,
}

impl FilterValue {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A filter declared by a route, or applied by a request
///
/// When declared, `values` lists every legal value. When applied, it holds
/// only the values the request selected, in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDefinition {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FilterKind,
    pub values: Vec<FilterValue>,
}

impl FilterDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: FilterKind,
        values: impl IntoIterator<Item = FilterValue>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            values: values.into_iter().collect(),
        }
    }

    /// Declares a text filter over an enumerated set of values.
    pub fn text(
        id: impl Into<String>,
        name: impl Into<String>,
        values: impl IntoIterator<Item = FilterValue>,
    ) -> Self {
        Self::new(id, name, FilterKind::Text, values)
    }

    /// Declares a numeric filter; values are matched by their id.
    pub fn numeric(
        id: impl Into<String>,
        name: impl Into<String>,
        values: impl IntoIterator<Item = FilterValue>,
    ) -> Self {
        Self::new(id, name, FilterKind::Numeric, values)
    }

    /// Declares a boolean filter with the values `true` and `false`.
    ///
    /// # Example
    /// ```
    /// use bastion_api::domain::listing::FilterDefinition;
    ///
    /// let shared = FilterDefinition::boolean("shared", "Visibility", "shared", "private");
    /// assert_eq!(shared.values[0].id, "true");
    /// assert_eq!(shared.values[1].label, "private");
    /// ```
    pub fn boolean(
        id: impl Into<String>,
        name: impl Into<String>,
        true_label: impl Into<String>,
        false_label: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            name,
            FilterKind::Boolean,
            [
                FilterValue::new("true", true_label),
                FilterValue::new("false", false_label),
            ],
        )
    }

    /// Narrows this declaration to the requested value ids.
    ///
    /// Returns `None` when none of the requested ids is declared.
    fn narrow(&self, requested: &[&str]) -> Option<AppliedFilter> {
        let values: Vec<FilterValue> = self
            .values
            .iter()
            .filter(|value| requested.contains(&value.id.as_str()))
            .cloned()
            .collect();

        if values.is_empty() {
            return None;
        }

        Some(AppliedFilter {
            id: self.id.clone(),
            name: self.name.clone(),
            kind: self.kind,
            values,
        })
    }
}

/// A declared filter narrowed to the values one request selected
pub type AppliedFilter = FilterDefinition;

/// Filters applied by a request plus everything the route declares
///
/// # Invariants
/// - Every applied filter is declared in `available`
/// - Every applied value is one of that declaration's values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteringCriteria {
    pub applied: Vec<AppliedFilter>,
    pub available: Vec<FilterDefinition>,
}

/// Matches query parameters against the declared filters.
///
/// Never fails: unknown keys and undeclared values are ignored. Returns
/// `None` when the route declares no filters.
pub fn resolve(query: &QueryParams, declared: &[FilterDefinition]) -> Option<FilteringCriteria> {
    if declared.is_empty() {
        return None;
    }

    let applied = declared
        .iter()
        .filter_map(|filter| {
            let raw = query.get(&filter.id)?;
            let requested: Vec<&str> = raw.split(VALUE_SEPARATOR).collect();
            filter.narrow(&requested)
        })
        .collect();

    Some(FilteringCriteria {
        applied,
        available: declared.to_vec(),
    })
}

use serde::{Deserialize, Serialize};

use super::errors::{ValidationError, ValidationResult};
use super::QueryParams;

const SORT_PARAM: &str = "sort";

/// One sort criterion a route accepts, identified by `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    pub id: String,
    pub description: String,
}

impl SortOption {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}

/// Selected sort plus everything the route declares
///
/// # Invariants
/// - `selected` is always one of `available`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortingCriteria {
    pub selected: SortOption,
    pub available: Vec<SortOption>,
}

/// Resolves the `sort` parameter against the declared options.
///
/// Returns `Ok(None)` when the route declares no sort options. Without a
/// `sort` key the first declared option is selected.
pub fn resolve(
    query: &QueryParams,
    declared: &[SortOption],
) -> ValidationResult<Option<SortingCriteria>> {
    let Some(default) = declared.first() else {
        return Ok(None);
    };

    let selected = match query.get(SORT_PARAM) {
        Some(id) => declared
            .iter()
            .find(|option| option.id == *id)
            .ok_or_else(|| ValidationError::UnknownSortCriteria(id.clone()))?,
        None => default,
    };

    Ok(Some(SortingCriteria {
        selected: selected.clone(),
        available: declared.to_vec(),
    }))
}

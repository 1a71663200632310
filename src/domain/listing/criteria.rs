use serde::{Deserialize, Serialize};

use super::config::ListingConfig;
use super::errors::ValidationResult;
use super::filtering::{self, FilteringCriteria};
use super::paging::{self, PagingCriteria};
use super::sorting::{self, SortingCriteria};
use super::QueryParams;

/// How a collection should be returned for one request
///
/// Built fresh per request and read-only for downstream handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingCriteria {
    pub paging: PagingCriteria,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorting: Option<SortingCriteria>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filtering: Option<FilteringCriteria>,
}

/// Resolves paging, then sorting, then filtering.
///
/// The first failing stage ends resolution; later stages never run.
/// Filtering cannot fail.
///
/// # Example
/// ```
/// use std::collections::HashMap;
/// use bastion_api::domain::listing::{assemble, ListingConfig, SortOption};
///
/// let cfg = ListingConfig::builder()
///     .sort([SortOption::new("created_at_desc", "Created date descending")])
///     .build();
/// let query = HashMap::from([("sort".to_string(), "foo_desc".to_string())]);
///
/// let err = assemble(&query, &cfg).unwrap_err();
/// assert_eq!(err.to_string(), "there's no order criteria with the id foo_desc");
/// ```
pub fn assemble(query: &QueryParams, cfg: &ListingConfig) -> ValidationResult<ListingCriteria> {
    let paging = paging::resolve(query, cfg)?;
    let sorting = sorting::resolve(query, &cfg.declared_sorts)?;
    let filtering = filtering::resolve(query, &cfg.declared_filters);

    Ok(ListingCriteria {
        paging,
        sorting,
        filtering,
    })
}

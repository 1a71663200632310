// Listing domain module
// Resolves raw query parameters into paging, sorting and filtering criteria
// against a per-route configuration. Free of HTTP types.

use std::collections::HashMap;

pub mod config;
pub mod criteria;
pub mod errors;
pub mod filtering;
pub mod paging;
pub mod sorting;

/// Percent-decoded query-string keys and values
pub type QueryParams = HashMap<String, String>;

// Re-export main types for convenience
pub use config::{ListingConfig, ListingConfigBuilder};
pub use criteria::{assemble, ListingCriteria};
pub use errors::{ListingNotFound, ValidationError};
pub use filtering::{AppliedFilter, FilterDefinition, FilterKind, FilterValue, FilteringCriteria};
pub use paging::PagingCriteria;
pub use sorting::{SortOption, SortingCriteria};

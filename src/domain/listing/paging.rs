use serde::{Deserialize, Serialize};

use super::config::ListingConfig;
use super::errors::{ValidationError, ValidationResult};
use super::QueryParams;

/// Number of items returned when the request does not ask for a limit.
pub const DEFAULT_LIMIT: usize = 20;
/// Position of the first item when the request does not ask for an offset.
pub const DEFAULT_OFFSET: usize = 0;
/// Ceiling applied to requested limits unless the route raises it.
pub const DEFAULT_MAX_ALLOWED_LIMIT: usize = 100;

const OFFSET_PARAM: &str = "offset";
const LIMIT_PARAM: &str = "limit";

/// Resolved paging window for one request
///
/// # Invariants
/// - `0 < limit <= max_allowed_limit` when the limit came from the query
/// - Immutable once resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingCriteria {
    pub limit: usize,
    pub offset: usize,
    pub max_allowed_limit: usize,
}

impl Default for PagingCriteria {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
            max_allowed_limit: DEFAULT_MAX_ALLOWED_LIMIT,
        }
    }
}

/// Resolves `offset` and `limit` from the query, falling back to the
/// route defaults for absent keys.
///
/// The offset is validated before the limit, so a request with both
/// values malformed reports the offset error.
///
/// # Example
/// ```
/// use std::collections::HashMap;
/// use bastion_api::domain::listing::{paging, ListingConfig};
///
/// let query = HashMap::from([("offset".to_string(), "11".to_string())]);
/// let paging = paging::resolve(&query, &ListingConfig::default()).expect("valid paging");
/// assert_eq!(paging.offset, 11);
/// assert_eq!(paging.limit, paging::DEFAULT_LIMIT);
/// ```
pub fn resolve(query: &QueryParams, cfg: &ListingConfig) -> ValidationResult<PagingCriteria> {
    let offset = match query.get(OFFSET_PARAM) {
        Some(raw) => parse_number(raw).ok_or(ValidationError::InvalidOffsetValue)?,
        None => cfg.default_offset,
    };

    let limit = match query.get(LIMIT_PARAM) {
        Some(raw) => {
            let limit = parse_number(raw).ok_or(ValidationError::InvalidLimitValue)?;
            if limit == 0 {
                return Err(ValidationError::NonPositiveLimit);
            }
            if limit > cfg.max_allowed_limit {
                return Err(ValidationError::LimitExceedsMaximum {
                    max: cfg.max_allowed_limit,
                });
            }
            limit
        }
        None => cfg.default_limit,
    };

    Ok(PagingCriteria {
        limit,
        offset,
        max_allowed_limit: cfg.max_allowed_limit,
    })
}

// Plain base-10 digits only; `usize::from_str` would also accept a leading '+'.
fn parse_number(raw: &str) -> Option<usize> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

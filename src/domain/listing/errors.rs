use thiserror::Error;

/// Errors produced while resolving listing criteria from a query string.
///
/// Every variant is request-local and maps to a 400 response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid offset value, must be a number")]
    InvalidOffsetValue,

    #[error("invalid limit value, must be a number")]
    InvalidLimitValue,

    #[error("invalid limit value, must be greater than zero")]
    NonPositiveLimit,

    #[error("invalid limit value, must be less than or equal to {max}")]
    LimitExceedsMaximum { max: usize },

    #[error("there's no order criteria with the id {0}")]
    UnknownSortCriteria(String),

    #[error("invalid query string: {0}")]
    MalformedQuery(String),
}

/// Raised when downstream code asks for listing criteria on a request
/// that never went through the listing middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("listing not found in context")]
pub struct ListingNotFound;

pub type ValidationResult<T> = Result<T, ValidationError>;

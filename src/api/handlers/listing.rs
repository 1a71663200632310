use axum::Json;

use crate::api::middleware::Listing;
use crate::domain::listing::{
    FilterDefinition, FilterValue, ListingConfig, ListingCriteria, SortOption,
};

/// Listing options declared by the `/api/listing` route
pub fn listing_config() -> ListingConfig {
    ListingConfig::builder()
        .sort([
            SortOption::new("created_at_desc", "Created date descending"),
            SortOption::new("created_at_asc", "Created date ascendant"),
        ])
        .filter([
            FilterDefinition::text(
                "condition",
                "Condition",
                [FilterValue::new("new", "New"), FilterValue::new("used", "Used")],
            ),
            FilterDefinition::boolean("shared", "Visibility", "shared", "private"),
        ])
        .build()
}

/// Echo the resolved listing criteria
///
/// GET /api/listing
pub async fn get_listing_criteria(Listing(criteria): Listing) -> Json<ListingCriteria> {
    Json(criteria)
}

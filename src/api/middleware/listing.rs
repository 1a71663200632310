use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Query, Request, State},
    http::{request::Parts, Extensions},
    middleware::Next,
    response::Response,
};

use crate::api::errors::ApiError;
use crate::domain::listing::{
    assemble, ListingConfig, ListingCriteria, ListingNotFound, QueryParams, ValidationError,
};

/// Resolves listing criteria for every request on the route it wraps
///
/// The criteria are stored in the request extensions, where handlers read
/// them with [`Listing`] or [`get_listing`]. Invalid queries are answered
/// with a 400 before the handler runs.
///
/// Usage:
/// ```rust,ignore
/// let cfg = Arc::new(ListingConfig::builder().limit(50).build());
/// Router::new().route(
///     "/api/items",
///     get(list_items).route_layer(from_fn_with_state(cfg, listing_middleware)),
/// );
/// ```
pub async fn listing_middleware(
    State(config): State<Arc<ListingConfig>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let criteria = resolve_request(&request, &config).map_err(|e| {
        tracing::debug!(uri = %request.uri(), error = %e, "rejected listing query");
        ApiError::from(e)
    })?;

    tracing::debug!(
        limit = criteria.paging.limit,
        offset = criteria.paging.offset,
        sort = ?criteria.sorting.as_ref().map(|s| &s.selected.id),
        filters = criteria.filtering.as_ref().map_or(0, |f| f.applied.len()),
        "resolved listing criteria"
    );

    request.extensions_mut().insert(criteria);
    Ok(next.run(request).await)
}

fn resolve_request(
    request: &Request,
    config: &ListingConfig,
) -> Result<ListingCriteria, ValidationError> {
    let Query(query) = Query::<QueryParams>::try_from_uri(request.uri())
        .map_err(|rejection| ValidationError::MalformedQuery(rejection.body_text()))?;

    assemble(&query, config)
}

/// Looks up the criteria stored by [`listing_middleware`].
pub fn get_listing(extensions: &Extensions) -> Result<&ListingCriteria, ListingNotFound> {
    extensions.get::<ListingCriteria>().ok_or(ListingNotFound)
}

/// Listing criteria extractor for routes behind [`listing_middleware`]
///
/// Usage:
/// ```rust,ignore
/// async fn list_items(Listing(criteria): Listing) -> Json<ListingCriteria> {
///     Json(criteria)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Listing(pub ListingCriteria);

#[async_trait]
impl<S> FromRequestParts<S> for Listing
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let criteria = get_listing(&parts.extensions).map_err(|e| {
            tracing::error!("listing extractor used on a route without listing middleware");
            ApiError::from(e)
        })?;

        Ok(Listing(criteria.clone()))
    }
}

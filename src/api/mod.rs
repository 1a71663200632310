// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter over the listing domain

use std::sync::Arc;

use axum::{
    body::Body,
    http::Request,
    middleware::from_fn_with_state,
    routing::{get, MethodRouter},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

pub mod errors;
pub mod handlers;
pub mod middleware;

use handlers::{listing, system};

/// Builds the application router
///
/// Layers, outermost first: CORS, request id, tracing, internal error
/// masking, panic recovery.
pub fn router(config: Arc<AppConfig>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let request_id_header = config.request_id_header.clone();
    let span_header = request_id_header.clone();
    let trace = TraceLayer::new_for_http().make_span_with(move |request: &Request<Body>| {
        let request_id = request
            .headers()
            .get(&span_header)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id,
        )
    });

    let listing_config = Arc::new(listing::listing_config());

    let mut router = Router::new()
        .route("/hello", only(get(system::hello)))
        .route(
            "/api/listing",
            only(get(listing::get_listing_criteria)).route_layer(from_fn_with_state(
                listing_config,
                middleware::listing_middleware,
            )),
        );

    if !config.disable_ping {
        router = router.route("/ping", only(get(system::ping)));
    }

    router
        .fallback(system::not_found)
        .layer(CatchPanicLayer::custom(middleware::recover_panic))
        .layer(from_fn_with_state(config, middleware::mask_internal_errors))
        .layer(trace)
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
}

// Answers unsupported methods with the JSON error shape.
fn only(route: MethodRouter) -> MethodRouter {
    route.fallback(system::method_not_allowed)
}

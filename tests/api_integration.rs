//! End-to-end API integration tests
//!
//! These tests verify the complete HTTP flows including:
//! - Listing middleware resolution and 400 responses
//! - Criteria lookup from handlers
//! - Internal error masking and panic recovery
//! - The application router's system routes and request ids

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::from_fn_with_state,
    routing::get,
    Json, Router,
};
use bastion_api::api::{
    self,
    errors::ApiError,
    middleware::{listing_middleware, mask_internal_errors, recover_panic, Listing},
};
use bastion_api::config::AppConfig;
use bastion_api::domain::listing::{
    paging, FilterDefinition, FilterKind, FilterValue, ListingConfig, ListingCriteria,
    PagingCriteria, SortOption,
};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for oneshot
use tower_http::catch_panic::CatchPanicLayer;

async fn echo_listing(Listing(criteria): Listing) -> Json<ListingCriteria> {
    Json(criteria)
}

/// Setup a single route guarded by the listing middleware
fn setup_listing_app(cfg: ListingConfig) -> Router {
    Router::new().route(
        "/",
        get(echo_listing).route_layer(from_fn_with_state(Arc::new(cfg), listing_middleware)),
    )
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn get_listing(cfg: ListingConfig, query: &str) -> ListingCriteria {
    let (status, json) = get_json(setup_listing_app(cfg), &format!("/?{}", query)).await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {}", json);
    serde_json::from_value(json).unwrap()
}

fn created_desc() -> SortOption {
    SortOption::new("created_at_desc", "Created date descending")
}

fn created_asc() -> SortOption {
    SortOption::new("created_at_asc", "Created date ascendant")
}

fn condition() -> FilterDefinition {
    FilterDefinition::text(
        "condition",
        "test",
        [FilterValue::new("new", "New"), FilterValue::new("used", "Used")],
    )
}

fn shared() -> FilterDefinition {
    FilterDefinition::boolean("shared", "test", "shared", "private")
}

fn default_paging() -> PagingCriteria {
    PagingCriteria {
        limit: paging::DEFAULT_LIMIT,
        offset: paging::DEFAULT_OFFSET,
        max_allowed_limit: paging::DEFAULT_MAX_ALLOWED_LIMIT,
    }
}

#[tokio::test]
async fn test_bad_offset_returns_400() {
    let cfg = ListingConfig::builder().limit(50).build();
    let (status, json) = get_json(setup_listing_app(cfg), "/?offset=abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        json!({
            "status": 400,
            "error": "Bad Request",
            "message": "invalid offset value, must be a number"
        })
    );
}

#[tokio::test]
async fn test_unknown_sort_returns_400() {
    let cfg = ListingConfig::builder().sort([created_desc()]).build();
    let (status, json) = get_json(setup_listing_app(cfg), "/?sort=foo_desc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        json!({
            "status": 400,
            "error": "Bad Request",
            "message": "there's no order criteria with the id foo_desc"
        })
    );
}

#[tokio::test]
async fn test_limit_above_ceiling_returns_400() {
    let (status, json) =
        get_json(setup_listing_app(ListingConfig::default()), "/?limit=101").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["message"],
        "invalid limit value, must be less than or equal to 100"
    );
}

#[tokio::test]
async fn test_paging_error_reported_before_sorting_error() {
    let cfg = ListingConfig::builder().sort([created_desc()]).build();
    let (status, json) = get_json(setup_listing_app(cfg), "/?sort=foo_desc&limit=x").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "invalid limit value, must be a number");
}

#[tokio::test]
async fn test_no_query_no_options_gives_default_paging() {
    let listing = get_listing(ListingConfig::default(), "").await;

    assert_eq!(listing.paging, default_paging());
    assert_eq!(listing.sorting, None);
    assert_eq!(listing.filtering, None);
}

#[tokio::test]
async fn test_offset_query_keeps_other_defaults() {
    let listing = get_listing(ListingConfig::default(), "offset=11").await;

    assert_eq!(
        listing.paging,
        PagingCriteria {
            offset: 11,
            ..default_paging()
        }
    );
}

#[tokio::test]
async fn test_default_limit_option() {
    let listing = get_listing(ListingConfig::builder().limit(50).build(), "").await;

    assert_eq!(
        listing.paging,
        PagingCriteria {
            limit: 50,
            ..default_paging()
        }
    );
}

#[tokio::test]
async fn test_raised_ceiling_allows_larger_limit() {
    let cfg = ListingConfig::builder().max_allowed_limit(120).build();
    let listing = get_listing(cfg, "limit=110").await;

    assert_eq!(
        listing.paging,
        PagingCriteria {
            limit: 110,
            offset: paging::DEFAULT_OFFSET,
            max_allowed_limit: 120,
        }
    );
}

#[tokio::test]
async fn test_single_sort_is_default() {
    let listing = get_listing(ListingConfig::builder().sort([created_desc()]).build(), "").await;

    let sorting = listing.sorting.expect("sorting criteria");
    assert_eq!(sorting.selected, created_desc());
    assert_eq!(sorting.available, vec![created_desc()]);
}

#[tokio::test]
async fn test_first_declared_sort_is_default() {
    let cfg = ListingConfig::builder()
        .sort([created_desc(), created_asc()])
        .build();
    let listing = get_listing(cfg, "").await;

    let sorting = listing.sorting.expect("sorting criteria");
    assert_eq!(sorting.selected, created_desc());
    assert_eq!(sorting.available, vec![created_desc(), created_asc()]);
}

#[tokio::test]
async fn test_sort_query_selects_option() {
    let cfg = ListingConfig::builder()
        .sort([created_desc(), created_asc()])
        .build();
    let listing = get_listing(cfg, "sort=created_at_asc").await;

    let sorting = listing.sorting.expect("sorting criteria");
    assert_eq!(sorting.selected, created_asc());
    assert_eq!(sorting.available, vec![created_desc(), created_asc()]);
}

#[tokio::test]
async fn test_filter_without_query_reports_available_only() {
    let listing = get_listing(ListingConfig::builder().filter([condition()]).build(), "").await;

    let filtering = listing.filtering.expect("filtering criteria");
    assert!(filtering.applied.is_empty());
    assert_eq!(filtering.available, vec![condition()]);
}

#[tokio::test]
async fn test_all_declared_filters_are_available() {
    let cfg = ListingConfig::builder().filter([condition(), shared()]).build();
    let listing = get_listing(cfg, "").await;

    let filtering = listing.filtering.expect("filtering criteria");
    assert!(filtering.applied.is_empty());
    assert_eq!(filtering.available.len(), 2);
    assert_eq!(filtering.available[1].kind, FilterKind::Boolean);
    assert_eq!(
        filtering.available[1].values,
        vec![
            FilterValue::new("true", "shared"),
            FilterValue::new("false", "private")
        ]
    );
}

#[tokio::test]
async fn test_filter_query_is_applied() {
    let cfg = ListingConfig::builder().filter([condition(), shared()]).build();
    let listing = get_listing(cfg, "condition=new").await;

    let filtering = listing.filtering.expect("filtering criteria");
    assert_eq!(
        filtering.applied,
        vec![FilterDefinition::text(
            "condition",
            "test",
            [FilterValue::new("new", "New")]
        )]
    );
    assert_eq!(filtering.available, vec![condition(), shared()]);
}

#[tokio::test]
async fn test_missing_listing_middleware_returns_500() {
    let app = Router::new().route("/", get(echo_listing));
    let (status, json) = get_json(app, "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json,
        json!({
            "status": 500,
            "error": "Internal Server Error",
            "message": "listing not found in context"
        })
    );
}

async fn failing_handler() -> ApiError {
    ApiError::internal_server_error("database unreachable")
}

fn setup_failing_app(production: bool) -> Router {
    let config = AppConfig {
        production,
        ..AppConfig::default()
    };
    Router::new()
        .route("/", get(failing_handler))
        .layer(from_fn_with_state(Arc::new(config), mask_internal_errors))
}

#[tokio::test]
async fn test_internal_error_masked_in_production() {
    let (status, json) = get_json(setup_failing_app(true), "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "looks like something went wrong");
    assert_eq!(json["error"], "Internal Server Error");
}

#[tokio::test]
async fn test_internal_error_passes_through_in_development() {
    let (status, json) = get_json(setup_failing_app(false), "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "database unreachable");
}

async fn panicking_handler() -> &'static str {
    panic!("handler bug")
}

fn setup_panicking_app(production: bool) -> Router {
    let config = AppConfig {
        production,
        ..AppConfig::default()
    };
    Router::new()
        .route("/", get(panicking_handler))
        .layer(CatchPanicLayer::custom(recover_panic))
        .layer(from_fn_with_state(Arc::new(config), mask_internal_errors))
}

#[tokio::test]
async fn test_panic_becomes_json_500() {
    let (status, json) = get_json(setup_panicking_app(false), "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json,
        json!({
            "status": 500,
            "error": "Internal Server Error",
            "message": "handler bug"
        })
    );
}

#[tokio::test]
async fn test_panic_message_masked_in_production() {
    let (status, json) = get_json(setup_panicking_app(true), "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "looks like something went wrong");
}

#[tokio::test]
async fn test_ping() {
    let app = api::router(Arc::new(AppConfig::default()));

    let response = app
        .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"pong");
}

#[tokio::test]
async fn test_ping_can_be_disabled() {
    let config = AppConfig {
        disable_ping: true,
        ..AppConfig::default()
    };
    let (status, json) = get_json(api::router(Arc::new(config)), "/ping").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Not Found");
}

#[tokio::test]
async fn test_hello() {
    let (status, json) = get_json(api::router(Arc::new(AppConfig::default())), "/hello").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "message": "world" }));
}

#[tokio::test]
async fn test_listing_route_echoes_criteria() {
    let app = api::router(Arc::new(AppConfig::default()));
    let (status, json) = get_json(
        app,
        "/api/listing?offset=20&limit=10&sort=created_at_asc&condition=used,new&shared=true",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["paging"],
        json!({ "limit": 10, "offset": 20, "max_allowed_limit": 100 })
    );
    assert_eq!(json["sorting"]["selected"]["id"], "created_at_asc");
    assert_eq!(json["filtering"]["applied"][0]["id"], "condition");
    assert_eq!(json["filtering"]["applied"][0]["type"], "text");
    assert_eq!(
        json["filtering"]["applied"][0]["values"],
        json!([
            { "id": "new", "label": "New" },
            { "id": "used", "label": "Used" }
        ])
    );
    assert_eq!(json["filtering"]["applied"][1]["values"][0]["id"], "true");
    assert_eq!(json["filtering"]["available"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_listing_route_rejects_bad_query() {
    let app = api::router(Arc::new(AppConfig::default()));
    let (status, json) = get_json(app, "/api/listing?offset=-5").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "invalid offset value, must be a number");
}

#[tokio::test]
async fn test_unsupported_method_returns_405() {
    let app = api::router(Arc::new(AppConfig::default()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/hello")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Method Not Allowed");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = api::router(Arc::new(AppConfig::default()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/hello")
                .header("x-request-id", "abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "abc");
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let app = api::router(Arc::new(AppConfig::default()));

    let response = app
        .oneshot(Request::builder().uri("/hello").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let id = response
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    assert!(!id.is_empty());
}

#[tokio::test]
async fn test_request_id_header_follows_config() {
    let config = AppConfig {
        request_id_header: "x-correlation-id".parse().unwrap(),
        ..AppConfig::default()
    };

    let response = api::router(Arc::new(config))
        .oneshot(
            Request::builder()
                .uri("/api/listing")
                .header("x-correlation-id", "req-7")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-correlation-id"], "req-7");
    assert!(response.headers().get("x-request-id").is_none());
}

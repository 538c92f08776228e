mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use rust_decimal_macros::dec;
use tower::ServiceExt;

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn send_json(
    app: axum::Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let resp = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_check() {
    let (app, _pool) = common::build_test_app().await;

    let (status, json) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let (app, _pool) = common::build_test_app().await;

    let resp = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("quote_fetch_attempts_total"));
}

#[tokio::test]
async fn test_create_and_list_positions() {
    let (app, _pool) = common::build_test_app().await;

    let create_body = serde_json::json!({
        "symbol": "AAPL",
        "name": "Apple Inc.",
        "currency": "USD",
        "quantity": "10",
        "initial_price": "5",
    });

    let (status, json) = send_json(app.clone(), "POST", "/api/positions", create_body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["symbol"], "AAPL");
    assert_eq!(json["data"]["investment"], "50");

    let (status, json) = get(app, "/api/positions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    let positions = json["data"].as_array().unwrap();
    assert!(positions.iter().any(|p| p["symbol"] == "AAPL"));
}

#[tokio::test]
async fn test_duplicate_symbol_is_rejected() {
    let (app, pool) = common::build_test_app().await;
    common::seed_position(&pool, "MSFT", "Microsoft", None, None).await;

    let body = serde_json::json!({
        "symbol": "MSFT",
        "name": "Microsoft again",
        "initial_price": "1",
    });

    let (status, json) = send_json(app, "POST", "/api/positions", body).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_detail_unknown_id_is_404() {
    let (app, _pool) = common::build_test_app().await;

    let uri = format!("/api/positions/{}", uuid::Uuid::new_v4());
    let (status, _json) = get(app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_position_fields() {
    let (app, pool) = common::build_test_app().await;
    let pos = common::seed_position(&pool, "NVDA", "Nvidia", None, None).await;

    let body = serde_json::json!({
        "symbol": "NVDA",
        "name": "NVIDIA Corporation",
        "currency": "USD",
        "quantity": "4",
        "initial_price": "100",
        "display_chart": false,
    });

    let uri = format!("/api/positions/{}", pos.id);
    let (status, json) = send_json(app, "PUT", &uri, body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["name"], "NVIDIA Corporation");
    assert_eq!(json["data"]["display_chart"], false);
    assert_eq!(json["data"]["investment"], "400");
}

#[tokio::test]
async fn test_delete_position() {
    let (app, pool) = common::build_test_app().await;
    let pos = common::seed_position(&pool, "TSLA", "Tesla", None, None).await;

    let uri = format!("/api/positions/{}", pos.id);
    let (status, json) = send_json(app.clone(), "DELETE", &uri, serde_json::json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let (status, _json) = send_json(app, "DELETE", &uri, serde_json::json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_chart_unknown_range_is_404() {
    let (app, pool) = common::build_test_app().await;
    let pos = common::seed_position(&pool, "AMD", "AMD", None, None).await;

    let uri = format!("/api/charts/{}/2d", pos.id);
    let (status, _json) = get(app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_chart_unknown_id_is_404() {
    let (app, _pool) = common::build_test_app().await;

    let uri = format!("/api/charts/{}/1d", uuid::Uuid::new_v4());
    let (status, _json) = get(app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_requires_query() {
    let (app, _pool) = common::build_test_app().await;

    let (status, _json) = get(app, "/api/search?q=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_upstream_failure_surfaces_context() {
    // The test app's search client points at an unreachable base URL;
    // the failure must reach the caller with its context, not as a
    // generic internal error.
    let (app, _pool) = common::build_test_app().await;

    let (status, json) = get(app, "/api/search?q=apple").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("search request"));
}

#[tokio::test]
async fn test_list_serves_stale_data_when_quote_source_is_down() {
    // The test app's quote source always fails; listing must still work.
    let (app, pool) = common::build_test_app().await;
    common::seed_position(&pool, "INTC", "Intel", Some(dec!(2)), Some(dec!(30))).await;

    let (status, json) = get(app, "/api/positions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let positions = json["data"].as_array().unwrap();
    let intel = positions.iter().find(|p| p["symbol"] == "INTC").unwrap();
    assert_eq!(intel["investment"], "60");
    assert!(intel["current_price"].is_null());
    assert!(intel["updated_at"].is_null());
}

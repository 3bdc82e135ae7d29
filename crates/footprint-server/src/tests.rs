//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use footprint_core::{Database, FactorCatalog};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn setup_test_app() -> Router {
    let db = Database::in_memory().unwrap();
    let catalog = FactorCatalog::builtin().unwrap();
    create_router(db, catalog)
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get_body_text(response: axum::response::Response) -> String {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn json_request(uri: &str, method: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn log_action(app: &Router, body: serde_json::Value) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(json_request("/api/actions", "POST", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    get_body_json(response).await
}

// ========== Health ==========

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
}

// ========== Action API ==========

#[tokio::test]
async fn test_create_and_list_actions() {
    let app = setup_test_app();

    let created = log_action(
        &app,
        serde_json::json!({
            "date": "2026-03-02",
            "category": "mobility",
            "item_key": "taxi_ice",
            "amount": 5.0
        }),
    )
    .await;
    assert_eq!(created["item_key"], "taxi_ice");
    assert_eq!(created["co2e_kg"], 1.05);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/actions?date=2026-03-02")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["actions"][0]["item_key"], "taxi_ice");
}

#[tokio::test]
async fn test_create_action_unknown_item_is_bad_request() {
    let app = setup_test_app();

    let response = app
        .oneshot(json_request(
            "/api/actions",
            "POST",
            serde_json::json!({
                "date": "2026-03-02",
                "category": "mobility",
                "item_key": "jetpack",
                "amount": 5.0
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("jetpack"));
}

#[tokio::test]
async fn test_create_action_negative_amount_is_bad_request() {
    let app = setup_test_app();

    let response = app
        .oneshot(json_request(
            "/api/actions",
            "POST",
            serde_json::json!({
                "date": "2026-03-02",
                "category": "mobility",
                "item_key": "taxi_ice",
                "amount": -2.0
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_action() {
    let app = setup_test_app();

    let created = log_action(
        &app,
        serde_json::json!({
            "date": "2026-03-02",
            "category": "mobility",
            "item_key": "bus",
            "amount": 3.0
        }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/actions/{}", id))
                .method("DELETE")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Second delete is a 404
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/actions/{}", id))
                .method("DELETE")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bulk_log_skips_invalid_entries() {
    let app = setup_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "/api/actions/bulk",
            "POST",
            serde_json::json!({
                "actions": [
                    {
                        "date": "2026-03-02",
                        "category": "mobility",
                        "item_key": "taxi_ice",
                        "amount": 5.0
                    },
                    {
                        "date": "2026-03-02",
                        "category": "mobility",
                        "item_key": "jetpack",
                        "amount": 5.0
                    },
                    {
                        "date": "2026-03-02",
                        "category": "purchase",
                        "item_key": "beef_meal",
                        "amount": -1.0
                    }
                ]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["logged"].as_array().unwrap().len(), 1);
    assert_eq!(json["logged"][0]["item_key"], "taxi_ice");
    assert_eq!(json["skipped"], 2);

    // Only the valid entry was stored
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/actions?date=2026-03-02")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["count"], 1);
}

#[tokio::test]
async fn test_quick_log() {
    let app = setup_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "/api/actions/quick",
            "POST",
            serde_json::json!({
                "message": "took a taxi 6km and had a beef dinner",
                "date": "2026-03-02"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["parsed"].as_array().unwrap().len(), 2);
    assert_eq!(json["logged"].as_array().unwrap().len(), 2);
    assert_eq!(json["parsed"][0]["item_key"], "taxi_ice");
    assert_eq!(json["parsed"][0]["amount"], 6.0);
}

#[tokio::test]
async fn test_quick_log_unparseable_is_bad_request() {
    let app = setup_test_app();

    let response = app
        .oneshot(json_request(
            "/api/actions/quick",
            "POST",
            serde_json::json!({ "message": "nothing to see here" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Impact API ==========

#[tokio::test]
async fn test_daily_impact_summary() {
    let app = setup_test_app();

    log_action(
        &app,
        serde_json::json!({
            "date": "2026-03-02",
            "category": "purchase",
            "item_key": "beef_meal",
            "amount": 1.0
        }),
    )
    .await;
    log_action(
        &app,
        serde_json::json!({
            "date": "2026-03-02",
            "category": "home_energy",
            "item_key": "electricity_kwh",
            "amount": 10.0,
            "time_of_day": "peak"
        }),
    )
    .await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/impact/daily?date=2026-03-02")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    // 6.5 + 6.013
    assert_eq!(json["total_co2e_kg"], 12.513);
    assert_eq!(json["action_count"], 2);
    assert_eq!(json["top_contributors"][0]["item_key"], "beef_meal");
}

#[tokio::test]
async fn test_daily_impact_invalid_date() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/impact/daily?date=not-a-date")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_weekly_impact() {
    let app = setup_test_app();

    log_action(
        &app,
        serde_json::json!({
            "date": "2026-03-02",
            "category": "mobility",
            "item_key": "taxi_ice",
            "amount": 10.0
        }),
    )
    .await;
    log_action(
        &app,
        serde_json::json!({
            "date": "2026-03-08",
            "category": "mobility",
            "item_key": "bicycle",
            "amount": 10.0
        }),
    )
    .await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/impact/weekly?end=2026-03-08")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["days"].as_array().unwrap().len(), 7);
    assert_eq!(json["total_co2e_kg"], 2.1);
    assert_eq!(json["direction"], "improving");
}

#[tokio::test]
async fn test_weekly_impact_window_ends_on_requested_day() {
    let app = setup_test_app();

    log_action(
        &app,
        serde_json::json!({
            "date": "2026-03-02",
            "category": "mobility",
            "item_key": "taxi_ice",
            "amount": 10.0
        }),
    )
    .await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/impact/weekly?end=2026-03-02")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["start_date"], "2026-02-24");
    assert_eq!(json["end_date"], "2026-03-02");
    // The logged day is the last day of the window, so it must be counted
    assert_eq!(json["total_co2e_kg"], 2.1);
    assert_eq!(json["days"][6]["total_co2e_kg"], 2.1);
}

// ========== Coach API ==========

#[tokio::test]
async fn test_daily_coach() {
    let app = setup_test_app();

    log_action(
        &app,
        serde_json::json!({
            "date": "2026-03-02",
            "category": "purchase",
            "item_key": "beef_meal",
            "amount": 1.0
        }),
    )
    .await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/coach/daily?date=2026-03-02")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(
        json["recommendations"][0]["suggested_item_key"],
        "vegetarian_meal"
    );
    assert_eq!(json["recommendations"][0]["estimated_co2e_saved_kg"], 6.1);
    assert!(json["message"].as_str().unwrap().contains("beef_meal"));
    assert_eq!(json["streak_days"], 1);
    assert_eq!(json["benchmarks"][0]["category"], "purchase");
}

// ========== Factor API ==========

#[tokio::test]
async fn test_list_factors() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/factors")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert!(json["count"].as_u64().unwrap() > 20);
}

#[tokio::test]
async fn test_list_factors_by_category() {
    let app = setup_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/factors/mobility")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    for factor in json["factors"].as_array().unwrap() {
        assert_eq!(factor["category"], "mobility");
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/factors/aviation")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Report API ==========

#[tokio::test]
async fn test_daily_report_formats() {
    let app = setup_test_app();

    log_action(
        &app,
        serde_json::json!({
            "date": "2026-03-02",
            "category": "purchase",
            "item_key": "beef_meal",
            "amount": 1.0
        }),
    )
    .await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/reports/daily?date=2026-03-02")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["summary"]["total_co2e_kg"], 6.5);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/reports/daily?date=2026-03-02&format=text")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = get_body_text(response).await;
    assert!(text.contains("Daily Impact Report - 2026-03-02"));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/reports/daily?date=2026-03-02&format=markdown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let md = get_body_text(response).await;
    assert!(md.starts_with("# Daily Impact Report"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/reports/daily?format=xml")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_weekly_report_formats() {
    let app = setup_test_app();

    log_action(
        &app,
        serde_json::json!({
            "date": "2026-03-02",
            "category": "purchase",
            "item_key": "beef_meal",
            "amount": 1.0
        }),
    )
    .await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/reports/weekly?end=2026-03-02")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["trend"]["end_date"], "2026-03-02");
    assert_eq!(json["trend"]["total_co2e_kg"], 6.5);
    assert_eq!(json["by_category"]["purchase"]["co2e_kg"], 6.5);
    assert_eq!(
        json["recommendations"][0]["suggested_item_key"],
        "vegetarian_meal"
    );

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/reports/weekly?end=2026-03-02&format=text")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = get_body_text(response).await;
    assert!(text.contains("Weekly Impact Report - 2026-02-24 to 2026-03-02"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/reports/weekly?end=2026-03-02&format=markdown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let md = get_body_text(response).await;
    assert!(md.starts_with("# Weekly Impact Report"));
}

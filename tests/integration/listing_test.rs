//! Integration tests for health, catalog and property listing.

use axum::http::StatusCode;

use kosan_core::types::PropertyId;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_and_ready() {
    let app = TestApp::new().await;

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["data"]["status"], "ok");

    let ready = app.request("GET", "/api/health/ready", None, None).await;
    assert_eq!(ready.status, StatusCode::OK);
    assert_eq!(ready.body["data"]["status"], "ready");
}

#[tokio::test]
async fn test_default_duration_catalog() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/durations", None, None).await;
    assert_eq!(response.status, StatusCode::OK);

    let keys: Vec<&str> = response.body["data"]
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|d| d["key"].as_str())
        .collect();
    assert_eq!(
        keys,
        ["1_hour", "3_hours", "6_hours", "12_hours", "daily", "monthly"]
    );
    assert_eq!(response.body["data"][5]["type"], "monthly");
    assert_eq!(response.body["data"][5]["value"], 720);
}

#[tokio::test]
async fn test_room_durations_only_bookable() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "GET",
            &format!("/api/rooms/{}/durations", app.room_id),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let data = response.body["data"].as_array().expect("array");
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["key"], "3_hours");
    assert_eq!(data[0]["formatted_price"], "Rp 45.000");
    assert_eq!(data[1]["key"], "monthly");
    assert_eq!(data[1]["formatted_price"], "Rp 1.500.000");
}

#[tokio::test]
async fn test_search_and_get_property() {
    let app = TestApp::new().await;

    let found = app
        .request("GET", "/api/properties?city=yogyakarta", None, None)
        .await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["data"]["total_items"], 1);

    let missing = app
        .request("GET", "/api/properties?city=Surabaya&page=1&page_size=5", None, None)
        .await;
    assert_eq!(missing.body["data"]["total_items"], 0);

    let detail = app
        .request("GET", &format!("/api/properties/{}", app.property_id), None, None)
        .await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.body["data"]["name"], "Kos Melati");
    assert_eq!(detail.body["data"]["rooms"][0]["name"], "Kamar 2A");
    assert_eq!(
        detail.body["data"]["rooms"][0]["pricing_plan"]["hourly"]["3_hours"]["price"],
        45000
    );

    let unknown = app
        .request("GET", &format!("/api/properties/{}", PropertyId::new()), None, None)
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

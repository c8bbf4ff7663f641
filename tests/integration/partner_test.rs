//! Integration tests for partner price management and confirmation.

use axum::http::StatusCode;
use serde_json::json;

use kosan_core::types::UserId;

use crate::helpers::{TestApp, future_start};

#[tokio::test]
async fn test_owner_enables_duration() {
    let app = TestApp::new().await;
    let path = format!("/api/partner/rooms/{}/prices/6_hours", app.room_id);

    let response = app
        .request("PUT", &path, Some(json!({ "price": 80000 })), Some(app.owner))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["data"]["pricing_plan"]["hourly"]["6_hours"],
        json!({ "price": 80000, "active": true })
    );

    let quote = app
        .request(
            "POST",
            "/api/quotes",
            Some(json!({
                "room_id": app.room_id,
                "start_time": "2025-03-01T10:00:00Z",
                "duration_key": "6_hours",
            })),
            None,
        )
        .await;
    assert_eq!(quote.body["data"]["is_valid"], true);
    assert_eq!(quote.body["data"]["total_price"], 80000);
    assert_eq!(quote.body["data"]["check_out_time"], "2025-03-01T16:00:00Z");
}

#[tokio::test]
async fn test_price_edit_rejections() {
    let app = TestApp::new().await;
    let path = format!("/api/partner/rooms/{}/prices/3_hours", app.room_id);

    let stranger = app
        .request("PUT", &path, Some(json!({ "price": 1 })), Some(UserId::new()))
        .await;
    assert_eq!(stranger.status, StatusCode::FORBIDDEN);

    let negative = app
        .request("PUT", &path, Some(json!({ "price": -10 })), Some(app.owner))
        .await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);

    let unknown_key = app
        .request(
            "PUT",
            &format!("/api/partner/rooms/{}/prices/2_weeks", app.room_id),
            Some(json!({ "price": 10000 })),
            Some(app.owner),
        )
        .await;
    assert_eq!(unknown_key.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_owner_confirms_booking() {
    let app = TestApp::new().await;
    let guest = UserId::new();

    let created = app
        .request(
            "POST",
            "/api/bookings",
            Some(json!({
                "room_id": app.room_id,
                "start_time": future_start(6),
                "duration_key": "3_hours",
            })),
            Some(guest),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["data"]["id"].as_str().expect("booking id").to_string();
    let path = format!("/api/partner/bookings/{id}/confirm");

    let by_guest = app.request("POST", &path, None, Some(guest)).await;
    assert_eq!(by_guest.status, StatusCode::FORBIDDEN);

    let by_owner = app.request("POST", &path, None, Some(app.owner)).await;
    assert_eq!(by_owner.status, StatusCode::OK);
    assert_eq!(by_owner.body["data"]["status"], "confirmed");
}

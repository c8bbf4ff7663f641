//! Integration tests for quotes and guest bookings.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde_json::json;

use kosan_core::types::UserId;

use crate::helpers::{TestApp, future_start};

fn instant(value: &serde_json::Value) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value.as_str().expect("timestamp string"))
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

#[tokio::test]
async fn test_quote_three_hours() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/quotes",
            Some(json!({
                "room_id": app.room_id,
                "start_time": "2025-03-01T10:00:00Z",
                "duration_key": "3_hours",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let quote = &response.body["data"];
    assert_eq!(quote["is_valid"], true);
    assert_eq!(quote["check_out_time"], "2025-03-01T13:00:00Z");
    assert_eq!(quote["total_price"], 45000);
    assert_eq!(quote["duration_type"], "hourly");
}

#[tokio::test]
async fn test_quote_invalid_is_still_ok() {
    let app = TestApp::new().await;

    let response = app
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
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["is_valid"], false);
    assert_eq!(
        response.body["data"]["error"],
        "Duration 6 Jam is not available for this property"
    );

    let response = app
        .request(
            "POST",
            "/api/quotes",
            Some(json!({ "room_id": app.room_id })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["error"], "Data tidak lengkap");
    assert!(response.body["data"].get("total_price").is_none());
}

#[tokio::test]
async fn test_create_booking_requires_user() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(json!({
                "room_id": app.room_id,
                "start_time": future_start(3),
                "duration_key": "3_hours",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(app.bookings.is_empty().await);
}

#[tokio::test]
async fn test_create_monthly_booking() {
    let app = TestApp::new().await;
    let guest = UserId::new();
    let start = future_start(7);

    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(json!({
                "room_id": app.room_id,
                "start_time": start,
                "duration_key": "monthly",
            })),
            Some(guest),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let booking = &response.body["data"];
    assert_eq!(booking["status"], "pending");
    assert_eq!(booking["duration_type"], "monthly");
    assert_eq!(booking["total_price"], 1500000);
    assert_eq!(booking["user_id"], guest.to_string());

    let stay = instant(&booking["end_time"]) - instant(&booking["start_time"]);
    assert_eq!(stay, chrono::Duration::days(30));
}

#[tokio::test]
async fn test_overlapping_booking_is_conflict() {
    let app = TestApp::new().await;
    let start = future_start(5);

    let first = app
        .request(
            "POST",
            "/api/bookings",
            Some(json!({
                "room_id": app.room_id,
                "start_time": start,
                "duration_key": "3_hours",
            })),
            Some(UserId::new()),
        )
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .request(
            "POST",
            "/api/bookings",
            Some(json!({
                "room_id": app.room_id,
                "start_time": start,
                "duration_key": "3_hours",
            })),
            Some(UserId::new()),
        )
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["error"], "CONFLICT");
    assert_eq!(app.bookings.len().await, 1);
}

#[tokio::test]
async fn test_unpriced_and_past_bookings_rejected() {
    let app = TestApp::new().await;
    let guest = UserId::new();

    let unpriced = app
        .request(
            "POST",
            "/api/bookings",
            Some(json!({
                "room_id": app.room_id,
                "start_time": future_start(2),
                "duration_key": "6_hours",
            })),
            Some(guest),
        )
        .await;
    assert_eq!(unpriced.status, StatusCode::BAD_REQUEST);
    assert_eq!(unpriced.body["error"], "VALIDATION_ERROR");

    let past = app
        .request(
            "POST",
            "/api/bookings",
            Some(json!({
                "room_id": app.room_id,
                "start_time": "2020-01-01T10:00:00Z",
                "duration_key": "3_hours",
            })),
            Some(guest),
        )
        .await;
    assert_eq!(past.status, StatusCode::BAD_REQUEST);
    assert!(app.bookings.is_empty().await);
}

#[tokio::test]
async fn test_booking_lifecycle() {
    let app = TestApp::new().await;
    let guest = UserId::new();

    let created = app
        .request(
            "POST",
            "/api/bookings",
            Some(json!({
                "room_id": app.room_id,
                "start_time": future_start(4),
                "duration_key": "3_hours",
            })),
            Some(guest),
        )
        .await;
    let id = created.body["data"]["id"].as_str().expect("booking id").to_string();

    let listed = app.request("GET", "/api/bookings", None, Some(guest)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"]["total_items"], 1);

    let stranger = app
        .request("GET", &format!("/api/bookings/{id}"), None, Some(UserId::new()))
        .await;
    assert_eq!(stranger.status, StatusCode::FORBIDDEN);

    let cancelled = app
        .request("POST", &format!("/api/bookings/{id}/cancel"), None, Some(guest))
        .await;
    assert_eq!(cancelled.status, StatusCode::OK);
    assert_eq!(cancelled.body["data"]["status"], "cancelled");

    let fetched = app
        .request("GET", &format!("/api/bookings/{id}"), None, Some(guest))
        .await;
    assert_eq!(fetched.body["data"]["status"], "cancelled");

    let again = app
        .request("POST", &format!("/api/bookings/{id}/cancel"), None, Some(guest))
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
}

//! CLI integration tests against a mock booking API.
//!
//! Each test gets its own data directory, so stored sessions never leak
//! between tests or into the user's real data directory.

mod common;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use common::TestEnv;

async fn mount_facilities(env: &TestEnv, token: &str) {
    Mock::given(method("GET"))
        .and(path("/facilities"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Court A", "description": "Indoor court", "status": "active"}
        ])))
        .mount(&env.server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_persists_session() {
    let env = TestEnv::new().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "email": "alice@example.com",
            "password": "secret123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "A1",
            "refreshToken": "R1"
        })))
        .expect(1)
        .mount(&env.server)
        .await;

    let stdout = env
        .run_success(&[
            "auth",
            "login",
            "--email",
            "alice@example.com",
            "--password",
            "secret123",
        ])
        .await;
    assert!(stdout.contains("Logged in successfully"));

    let stored = env.credentials().unwrap();
    assert_eq!(stored["accessToken"], "A1");
    assert_eq!(stored["refreshToken"], "R1");

    let status = env.run_success(&["--json", "auth", "status"]).await;
    let status: serde_json::Value = serde_json::from_str(&status).unwrap();
    assert_eq!(status["authenticated"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_commands_require_login() {
    let env = TestEnv::new().await;

    let stderr = env.run_failure(&["facilities", "list"]).await;
    assert!(stderr.contains("not logged in"));
    assert!(stderr.contains("booking auth login"));
    assert_eq!(env.hits("/facilities").await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_facilities_list_json() {
    let env = TestEnv::logged_in("A1", "R1").await;
    mount_facilities(&env, "A1").await;

    let stdout = env.run_success(&["--json", "facilities", "list"]).await;
    let facilities: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(facilities[0]["name"], "Court A");
    assert_eq!(facilities[0]["status"], "active");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_expired_token_is_refreshed_and_saved() {
    let env = TestEnv::logged_in("A1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/facilities"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&env.server)
        .await;
    mount_facilities(&env, "A2").await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({"refreshToken": "R1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"accessToken": "A2", "refreshToken": "R2"}
        })))
        .expect(1)
        .mount(&env.server)
        .await;

    let stdout = env.run_success(&["facilities", "list"]).await;
    assert!(stdout.contains("Court A"));

    let stored = env.credentials().unwrap();
    assert_eq!(stored["accessToken"], "A2");
    assert_eq!(stored["refreshToken"], "R2");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_refresh_logs_out_with_hint() {
    let env = TestEnv::logged_in("A1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/facilities/bookings/my"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&env.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Refresh token expired"
        })))
        .mount(&env.server)
        .await;

    let stderr = env.run_failure(&["bookings", "list"]).await;

    assert!(stderr.contains("Refresh token expired"));
    assert!(stderr.contains("booking auth login"));
    assert!(env.credentials().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_bookings_list_passes_filters() {
    let env = TestEnv::logged_in("A1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/facilities/bookings/my"))
        .and(query_param("page", "2"))
        .and(query_param("sortDirection", "asc"))
        .and(query_param("status", "cancelled"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bookings": [{
                "id": 12,
                "facilityId": 3,
                "userId": 7,
                "bookingDate": "2025-03-14",
                "startHour": 9,
                "endHour": 10,
                "notes": null,
                "status": "cancelled",
                "createdAt": "2025-03-01T08:30:00Z"
            }],
            "page": 2,
            "totalPages": 2
        })))
        .expect(1)
        .mount(&env.server)
        .await;

    let stdout = env
        .run_success(&[
            "bookings", "list", "--page", "2", "--sort", "asc", "--status", "cancelled",
        ])
        .await;

    assert!(stdout.contains("#12"));
    assert!(stdout.contains("cancelled"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_booking_is_rejected_locally() {
    let env = TestEnv::logged_in("A1", "R1").await;

    let stderr = env
        .run_failure(&[
            "bookings",
            "create",
            "--facility",
            "3",
            "--date",
            "14/03/2025",
            "--hour",
            "9",
        ])
        .await;

    assert!(stderr.contains("Invalid date format"));
    assert_eq!(env.hits("/facilities/bookings").await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_logout_removes_credentials() {
    let env = TestEnv::logged_in("A1", "R1").await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&env.server)
        .await;

    let stdout = env.run_success(&["auth", "logout"]).await;
    assert!(stdout.contains("Logged out"));
    assert!(env.credentials().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_booking_with_empty_created_body() {
    let env = TestEnv::logged_in("A1", "R1").await;

    Mock::given(method("POST"))
        .and(path("/facilities/bookings"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(201))
        .expect(2)
        .mount(&env.server)
        .await;

    let stdout = env
        .run_success(&[
            "bookings",
            "create",
            "--facility",
            "3",
            "--date",
            "2099-03-14",
            "--hour",
            "9",
        ])
        .await;
    assert!(stdout.contains("Booking created"));

    let stdout = env
        .run_success(&[
            "--json", "bookings", "create", "--facility", "3", "--date", "2099-03-14", "--hour", "9",
        ])
        .await;
    let created: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(created["created"], true);
    assert!(created["booking"].is_null());
}

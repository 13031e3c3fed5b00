//! Token injection and refresh behaviour against a mock booking API.
//!
//! These tests use wiremock to play the API and an in-memory credential
//! store, so they need neither network access nor real accounts.

mod common;

use std::time::Duration;

use booking_core::error::AuthError;
use booking_core::{
    ApiRequest, CredentialStore, Error, MemoryCredentialStore, SessionState, TokenKey,
};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{connect, hits, mount_refresh};

fn facilities_body() -> serde_json::Value {
    json!([
        {"id": 1, "name": "Court A", "description": "Indoor court", "status": "active"}
    ])
}

// ============================================================================
// Success path
// ============================================================================

#[tokio::test]
async fn test_valid_token_single_call_with_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/facilities"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(facilities_body()))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryCredentialStore::with_tokens("A1", "R1");
    let client = connect(&server, &store).await;
    let mut rx = client.subscribe();

    let response = client
        .gateway()
        .send(&ApiRequest::get("/facilities"))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.body(), &facilities_body());
    assert_eq!(hits(&server, "/auth/refresh").await, 0);
    assert_eq!(store.peek(TokenKey::AccessToken).as_deref(), Some("A1"));
    assert_eq!(store.peek(TokenKey::RefreshToken).as_deref(), Some("R1"));
    assert_eq!(store.write_count(), 0);
    assert!(!rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), SessionState::Authenticated);
}

// ============================================================================
// Refresh and retry
// ============================================================================

#[tokio::test]
async fn test_expired_token_refreshes_and_retries_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/facilities"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Unauthorized"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/facilities"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(facilities_body()))
        .expect(1)
        .mount(&server)
        .await;

    mount_refresh(&server, "R1", "A2", "R2", 1).await;

    let store = MemoryCredentialStore::with_tokens("A1", "R1");
    let client = connect(&server, &store).await;

    let response = client
        .gateway()
        .send(&ApiRequest::get("/facilities"))
        .await
        .unwrap();

    assert_eq!(response.body(), &facilities_body());
    assert_eq!(hits(&server, "/facilities").await, 2);
    assert_eq!(hits(&server, "/auth/refresh").await, 1);
    assert_eq!(store.peek(TokenKey::AccessToken).as_deref(), Some("A2"));
    assert_eq!(store.peek(TokenKey::RefreshToken).as_deref(), Some("R2"));
}

#[tokio::test]
async fn test_refresh_call_bypasses_bearer_injection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "name": "Alice", "email": "alice@example.com"
        })))
        .mount(&server)
        .await;

    mount_refresh(&server, "R1", "A2", "R2", 1).await;

    let store = MemoryCredentialStore::with_tokens("A1", "R1");
    let client = connect(&server, &store).await;
    client.profile().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let refresh = requests
        .iter()
        .find(|r| r.url.path() == "/auth/refresh")
        .unwrap();
    assert!(!refresh.headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_retry_rejected_again_does_not_loop() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/facilities"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    mount_refresh(&server, "R1", "A2", "R2", 1).await;

    let store = MemoryCredentialStore::with_tokens("A1", "R1");
    let client = connect(&server, &store).await;

    let err = client
        .gateway()
        .send(&ApiRequest::get("/facilities"))
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(hits(&server, "/facilities").await, 2);
    assert_eq!(hits(&server, "/auth/refresh").await, 1);
    // The refresh itself succeeded, so the new pair stays stored.
    assert_eq!(store.peek(TokenKey::AccessToken).as_deref(), Some("A2"));
}

// ============================================================================
// Unrecoverable sessions
// ============================================================================

#[tokio::test]
async fn test_missing_refresh_token_fails_with_original_401() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/facilities/bookings/my"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Unauthorized"
        })))
        .expect(1)
        .mount(&server)
        .await;

    mount_refresh(&server, "R1", "A2", "R2", 0).await;

    let store = MemoryCredentialStore::new();
    store.set(TokenKey::AccessToken, "A1").await.unwrap();
    let client = connect(&server, &store).await;

    let err = client
        .gateway()
        .send(&ApiRequest::get("/facilities/bookings/my"))
        .await
        .unwrap_err();

    match &err {
        Error::Api(api) => {
            assert_eq!(api.status, 401);
            assert_eq!(api.message.as_deref(), Some("Unauthorized"));
        }
        other => panic!("expected original 401, got {other:?}"),
    }
    assert!(err.is_session_expired());
    assert_eq!(store.peek(TokenKey::AccessToken), None);
    assert_eq!(store.peek(TokenKey::RefreshToken), None);
}

#[tokio::test]
async fn test_refresh_rejected_clears_session_and_surfaces_refresh_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/facilities"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "Refresh token revoked"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryCredentialStore::with_tokens("A1", "R1");
    let client = connect(&server, &store).await;
    let mut rx = client.subscribe();

    let err = client
        .gateway()
        .send(&ApiRequest::get("/facilities"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Auth(AuthError::RefreshFailed(_))));
    assert_eq!(err.status(), Some(403));
    assert!(!err.is_unauthorized());
    assert!(err.is_session_expired());
    assert!(err.to_string().contains("Refresh token revoked"));

    assert_eq!(store.peek(TokenKey::AccessToken), None);
    assert_eq!(store.peek(TokenKey::RefreshToken), None);
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), SessionState::Unauthenticated);
    assert_eq!(client.session_state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn test_refresh_timeout_clears_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/facilities"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"accessToken": "A2", "refreshToken": "R2"}}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let store = MemoryCredentialStore::with_tokens("A1", "R1");
    let config = common::mock_config(&server).with_timeout(Duration::from_millis(300));
    let client = booking_http::BookingClient::connect(&config, std::sync::Arc::new(store.clone()))
        .await
        .unwrap();

    let err = client
        .gateway()
        .send(&ApiRequest::get("/facilities"))
        .await
        .unwrap_err();

    match err {
        Error::Auth(AuthError::RefreshFailed(inner)) => {
            assert!(matches!(*inner, Error::Transport(_)));
        }
        other => panic!("expected refresh failure, got {other:?}"),
    }
    assert_eq!(store.peek(TokenKey::AccessToken), None);
    assert_eq!(store.peek(TokenKey::RefreshToken), None);
}

// ============================================================================
// Non-auth failures
// ============================================================================

#[tokio::test]
async fn test_other_statuses_never_refresh() {
    for status in [409u16, 500] {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/facilities/bookings"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "message": "Slot already booked"
            })))
            .expect(1)
            .mount(&server)
            .await;

        mount_refresh(&server, "R1", "A2", "R2", 0).await;

        let store = MemoryCredentialStore::with_tokens("A1", "R1");
        let client = connect(&server, &store).await;

        let request = ApiRequest::post("/facilities/bookings")
            .json(&json!({"facilityId": 1, "bookingDate": "2025-03-14", "startHour": 9}))
            .unwrap();
        let err = client.gateway().send(&request).await.unwrap_err();

        assert_eq!(err.status(), Some(status));
        assert_eq!(hits(&server, "/auth/refresh").await, 0);
        assert_eq!(store.peek(TokenKey::AccessToken).as_deref(), Some("A1"));
        assert_eq!(store.write_count(), 0);
    }
}

#[tokio::test]
async fn test_non_json_error_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/facilities"))
        .respond_with(
            ResponseTemplate::new(502)
                .set_body_string("Bad Gateway")
                .insert_header("content-type", "text/plain"),
        )
        .mount(&server)
        .await;

    let client = connect(&server, &MemoryCredentialStore::new()).await;
    let err = client
        .gateway()
        .send(&ApiRequest::get("/facilities"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(502));
    assert!(err.to_string().contains("502"));
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_unauthorized_requests_share_one_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/facilities"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401).set_delay(Duration::from_millis(100)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/facilities"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(facilities_body()))
        .mount(&server)
        .await;

    mount_refresh(&server, "R1", "A2", "R2", 1).await;

    let store = MemoryCredentialStore::with_tokens("A1", "R1");
    let client = connect(&server, &store).await;
    let other = client.clone();

    let request = ApiRequest::get("/facilities");
    let (first, second) = tokio::join!(
        client.gateway().send(&request),
        other.gateway().send(&request)
    );

    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(hits(&server, "/auth/refresh").await, 1);
    assert_eq!(store.peek(TokenKey::RefreshToken).as_deref(), Some("R2"));
}

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use booking_core::{ApiUrl, MemoryCredentialStore};
use booking_http::{BookingClient, ClientConfig};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Client configuration pointing at a mock server.
pub fn mock_config(server: &MockServer) -> ClientConfig {
    let api = ApiUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap();
    ClientConfig::new(api).with_timeout(Duration::from_secs(5))
}

/// Connect a client to the mock server over the given store.
pub async fn connect(server: &MockServer, store: &MemoryCredentialStore) -> BookingClient {
    BookingClient::connect(&mock_config(server), Arc::new(store.clone()))
        .await
        .unwrap()
}

/// Mount a refresh endpoint that swaps `refresh` for a new pair.
pub async fn mount_refresh(
    server: &MockServer,
    refresh: &str,
    new_access: &str,
    new_refresh: &str,
    times: u64,
) {
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({"refreshToken": refresh})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"accessToken": new_access, "refreshToken": new_refresh}
        })))
        .expect(times)
        .mount(server)
        .await;
}

/// Number of requests the server received for `request_path`.
pub async fn hits(server: &MockServer, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == request_path)
        .count()
}

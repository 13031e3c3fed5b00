//! reqwest-backed transport for the booking API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use tracing::{debug, instrument, trace};

use booking_core::error::{ApiError, Error, TransportError};
use booking_core::{
    AccessToken, ApiRequest, ApiResponse, ApiUrl, Method, RefreshToken, Result, TokenPair,
    TokenRefresher, Transport,
};

use crate::config::ClientConfig;
use crate::endpoints::{REFRESH, RefreshRequest, RefreshResponse};

/// HTTP client for booking API requests.
///
/// Sends exactly what it is given: no token lookup, no retry. The refresh
/// call goes straight out through this type, never through the gateway.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    api: ApiUrl,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport for the configured API.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Http {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            api: config.api_url.clone(),
            timeout: config.timeout,
        })
    }

    /// Returns the API base URL this transport talks to.
    pub fn api_url(&self) -> &ApiUrl {
        &self.api
    }

    fn map_reqwest(&self, err: reqwest::Error) -> Error {
        let transport = if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: self.timeout.as_millis() as u64,
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        };
        Error::Transport(transport)
    }

    /// Turn a response into a body or an [`ApiError`].
    async fn handle_response(&self, response: reqwest::Response) -> Result<ApiResponse> {
        let status = response.status();
        trace!(status = %status, "API response");

        let bytes = response.bytes().await.map_err(|e| self.map_reqwest(e))?;
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            // Non-JSON bodies (plain-text errors, "OK") are kept as strings.
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        if status.is_success() {
            Ok(ApiResponse::new(status.as_u16(), body))
        } else {
            Err(Error::Api(ApiError::from_body(status.as_u16(), &body)))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request, token), fields(method = %request.method(), path = request.path()))]
    async fn execute(
        &self,
        request: &ApiRequest,
        token: Option<&AccessToken>,
    ) -> Result<ApiResponse> {
        let url = self.api.endpoint(request.path());
        debug!(authenticated = token.is_some(), "API request");
        trace!(query = ?request.query_pairs(), "query parameters");

        let method = match request.method() {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &url);
        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        } else {
            builder = builder.header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if let Some(token) = token {
            let value = HeaderValue::from_str(&token.bearer()).map_err(|_| TransportError::Http {
                message: "access token contains invalid header characters".to_string(),
            })?;
            builder = builder.header(AUTHORIZATION, value);
        }

        let response = builder.send().await.map_err(|e| self.map_reqwest(e))?;
        self.handle_response(response).await
    }
}

#[async_trait]
impl TokenRefresher for HttpTransport {
    #[instrument(skip_all)]
    async fn refresh(&self, refresh_token: &RefreshToken) -> Result<TokenPair> {
        let url = self.api.endpoint(REFRESH);
        debug!("Refreshing token pair");

        let response = self
            .client
            .post(&url)
            .json(&RefreshRequest {
                refresh_token: refresh_token.as_str(),
            })
            .send()
            .await
            .map_err(|e| self.map_reqwest(e))?;

        let body: RefreshResponse = self.handle_response(response).await?.json()?;
        Ok(body.data)
    }
}

//! Refunds API client implementation.
//!
//! Posts refund requests as JSON and turns HTTP responses into either a
//! [`RefundResponse`] or an [`ApiError`] carrying the server's message.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::auth::Auth;
use super::error::{ApiError, Result};
use super::transport::Transport;
use super::types::{message_from_body, RefundRequest, RefundResponse};
use crate::config::ApiSettings;

/// The refunds API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct RefundClient {
    /// The HTTP client.
    client: Client,
    /// The API base URL, without a trailing slash.
    base_url: String,
    /// Bearer credentials, if a token is stored.
    auth: Option<Auth>,
}

impl RefundClient {
    /// Create a client from the configured API settings.
    ///
    /// Looks up the API token in the OS keyring; a missing token is fine.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The base URL is not a valid http(s) URL
    /// - The keyring cannot be read
    /// - The HTTP client cannot be built
    #[instrument(skip(settings), fields(base_url = %settings.base_url))]
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let auth = Auth::from_keyring(&settings.token_account)?;
        let client = Self::with_auth(
            &settings.base_url,
            Duration::from_secs(settings.timeout_secs),
            auth,
        )?;
        info!(authenticated = client.auth.is_some(), "Refund client created");
        Ok(client)
    }

    /// Create a client with explicit credentials.
    ///
    /// Use this for testing or when the token is provided directly.
    pub fn with_auth(base_url: &str, timeout: Duration, auth: Option<Auth>) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let client = Self::build_http_client(timeout)?;

        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    /// Build the HTTP client with appropriate settings.
    fn build_http_client(timeout: Duration) -> Result<Client> {
        Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Network)
    }

    /// Full URL for an API path.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Perform a JSON POST and return the parsed success body.
    ///
    /// POSTs are not retried: a refund request that timed out may still have
    /// been recorded by the server.
    #[instrument(skip(self, body), fields(path = %path))]
    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let mut request = self
            .client
            .post(self.url(path))
            .header(header::ACCEPT, "application/json")
            .json(body);

        if let Some(auth) = &self.auth {
            request = request.header(header::AUTHORIZATION, auth.header_value());
        }

        let response = request.send().await.map_err(|e| {
            warn!("Request failed before a response arrived: {}", e);
            ApiError::Network(e)
        })?;

        self.handle_response(response).await
    }

    /// Handle the HTTP response, checking for errors and parsing JSON.
    async fn handle_response(&self, response: Response) -> Result<Value> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await.map_err(ApiError::Network)?;
            debug!(status = %status, "Response body: {}", body);
            serde_json::from_str(&body)
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
        } else {
            let body = response.text().await.unwrap_or_default();
            debug!(status = %status, "Error body: {}", body);
            Err(Self::error_from_response(status, &body))
        }
    }

    /// Create an appropriate error from a non-success response.
    fn error_from_response(status: StatusCode, body: &str) -> ApiError {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| message_from_body(&json));
        ApiError::from_status(status, message)
    }
}

#[async_trait]
impl Transport for RefundClient {
    #[instrument(skip(self, payload), fields(booking = %payload.booking_reference))]
    async fn submit(&self, path: &str, payload: &RefundRequest) -> Result<RefundResponse> {
        let body = self.post_json(path, payload).await?;
        let response = RefundResponse::from_body(&body);
        debug!(success = response.success, "Refund response received");
        Ok(response)
    }
}

/// Validate the base URL and strip trailing slashes.
fn normalize_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');

    let parsed = Url::parse(trimmed).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::InvalidUrl(format!(
            "{}: scheme must be http or https",
            url
        )));
    }

    // Warn if not HTTPS (but don't enforce for localhost/testing)
    if parsed.scheme() != "https" && parsed.host_str() != Some("localhost") {
        warn!("URL does not use HTTPS: {}. This is insecure for production use.", trimmed);
    }

    Ok(trimmed.to_string())
}

//
//  iam-api
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the IAM API
//!
//! This module provides the transport every resource module shares. It owns
//! the base URL, credentials and user agent, sends exactly one request per
//! call, and decodes the response into a [`DecodedResponse`] without ever
//! turning it into a user-facing error. That last step belongs to
//! [`classify`](crate::api::common::classify).
//!
//! ## Features
//!
//! - Configurable API root (defaults to [`DEFAULT_API_ROOT_URL`](crate::DEFAULT_API_ROOT_URL))
//! - Authentication header injection
//! - Optional per-request timeout
//! - JSON serialization/deserialization
//! - Request tracing via `tracing`

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::api::common::{DecodedResponse, HttpErrorResponse, ProblemDetails, TransportError};
use crate::auth::AuthCredential;
use crate::config::Config;

/// Result of one transport call, before classification.
pub type TransportResult<T> = std::result::Result<DecodedResponse<T>, TransportError>;

/// Decodes a raw response into the shape the classifier understands.
///
/// # Parameters
///
/// * `status` - The HTTP status code
/// * `body` - The raw response body
///
/// # Returns
///
/// - `Ok(DecodedResponse::Ok)` for a 2xx status whose body decodes as `T`
///   (an empty body decodes as JSON `null`)
/// - `Ok(DecodedResponse::Unrecognized)` for a 2xx status whose body does not
/// - `Ok(DecodedResponse::Error)` for a documented error status with a JSON object body
/// - `Err(TransportError::UnexpectedStatus)` for everything else
pub fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> TransportResult<T> {
    let code = status.as_u16();

    if status.is_success() {
        let text = if body.trim().is_empty() { "null" } else { body };
        return Ok(match serde_json::from_str::<T>(text) {
            Ok(value) => DecodedResponse::Ok(value),
            Err(e) => {
                tracing::debug!(
                    status = code,
                    error = %e,
                    "response body did not match expected type"
                );
                DecodedResponse::Unrecognized {
                    status: code,
                    body: serde_json::from_str(text)
                        .unwrap_or_else(|_| serde_json::Value::String(body.to_string())),
                }
            }
        });
    }

    let problem = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .filter(|v| v.is_object())
        .and_then(|v| serde_json::from_value::<ProblemDetails>(v).ok());

    match problem.and_then(|p| HttpErrorResponse::from_status(code, p)) {
        Some(response) => Ok(DecodedResponse::Error(response)),
        None => Err(TransportError::UnexpectedStatus {
            status: code,
            body: body.to_string(),
        }),
    }
}

/// User agent sent with every request.
///
/// Format: `iam-api-rs/<version> (<os>/<arch>; +<repository>)`
pub fn user_agent() -> String {
    format!(
        "iam-api-rs/{} ({}/{}; +{})",
        crate::VERSION,
        std::env::consts::OS,
        std::env::consts::ARCH,
        env!("CARGO_PKG_REPOSITORY"),
    )
}

/// The underlying API client shared by every resource operation.
///
/// Construct it once and hand a reference to each `*Op` wrapper. The client
/// is never mutated by the wrappers and is safe to share across tasks.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use iam_api::IamClient;
///
/// // Production endpoint
/// let client = IamClient::new()?;
///
/// // Another root, e.g. a staging endpoint or a local mock
/// let local = IamClient::with_api_root_url("http://127.0.0.1:8080/")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Authentication
///
/// ```rust,no_run
/// use iam_api::auth::AuthCredential;
/// use iam_api::IamClient;
///
/// let client = IamClient::new()?
///     .with_auth(AuthCredential::access_token("token", "secret"));
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct IamClient {
    /// The underlying HTTP client
    http: Client,
    /// API root without a trailing slash
    api_root_url: String,
    /// Optional authentication credentials
    auth: Option<AuthCredential>,
    /// Optional per-request timeout
    timeout: Option<Duration>,
}

impl IamClient {
    /// Creates a client for [`DEFAULT_API_ROOT_URL`](crate::DEFAULT_API_ROOT_URL).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client could not be created.
    pub fn new() -> Result<Self> {
        Self::with_api_root_url(crate::DEFAULT_API_ROOT_URL)
    }

    /// Creates a client for a custom API root.
    ///
    /// # Parameters
    ///
    /// * `api_root_url` - Absolute `http` or `https` URL of the API root
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not an absolute HTTP(S) URL or the HTTP
    /// client could not be created.
    pub fn with_api_root_url(api_root_url: &str) -> Result<Self> {
        let parsed = Url::parse(api_root_url)
            .with_context(|| format!("Invalid API root URL: {}", api_root_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("API root URL must use http or https: {}", api_root_url);
        }

        Ok(Self {
            http: Client::builder().user_agent(user_agent()).build()?,
            api_root_url: api_root_url.trim_end_matches('/').to_string(),
            auth: None,
            timeout: None,
        })
    }

    /// Creates a client from loaded configuration.
    ///
    /// Applies the configured API root, credentials and timeout.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use iam_api::{Config, IamClient};
    ///
    /// let config = Config::load()?;
    /// let client = IamClient::from_config(&config)?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut client = Self::with_api_root_url(config.api_root_url())?;
        if let Some(auth) = config.credential() {
            client = client.with_auth(auth);
        }
        if let Some(secs) = config.timeout_secs {
            client = client.with_timeout(Duration::from_secs(secs));
        }
        Ok(client)
    }

    /// Sets the authentication credentials for this client.
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets a timeout applied to every request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the API root requests are sent to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.api_root_url
    }

    pub fn has_auth(&self) -> bool {
        self.auth.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_root_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!(method = %method, url = %url, "sending request");

        let mut request = self.http.request(method, &url);
        if let Some(auth) = &self.auth {
            request = auth.apply_to_request(request);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        request
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> TransportResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = status.as_u16(), "received response");
        tracing::trace!(body = %body, "response body");

        decode_response(status, &body)
    }

    /// Makes an HTTP GET request to the specified path.
    ///
    /// # Parameters
    ///
    /// * `path` - The API path, starting with `/` (e.g. `"/folders/1"`)
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> TransportResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    /// Makes an HTTP GET request with query parameters.
    ///
    /// `None` fields of the query struct are omitted from the URL.
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> TransportResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized + Sync,
    {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    /// Makes an HTTP POST request with a JSON body.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> TransportResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    /// Makes an HTTP POST request without a body.
    ///
    /// Used by action endpoints such as enabling a key or assigning a profile.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> TransportResult<T> {
        self.send(self.request(Method::POST, path)).await
    }

    /// Makes an HTTP PUT request with a JSON body.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> TransportResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    /// Makes an HTTP DELETE request to the specified path.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> TransportResult<T> {
        self.send(self.request(Method::DELETE, path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::NoContent;

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let client = IamClient::with_api_root_url("https://example.com/iam/1.0/").unwrap();
        assert_eq!(client.base_url(), "https://example.com/iam/1.0");
        assert_eq!(client.url("/folders"), "https://example.com/iam/1.0/folders");
    }

    #[test]
    fn test_default_root() {
        let client = IamClient::new().unwrap();
        assert_eq!(
            client.base_url(),
            "https://secure.sakura.ad.jp/cloud/api/iam/1.0"
        );
        assert!(!client.has_auth());
    }

    #[test]
    fn test_rejects_bad_roots() {
        assert!(IamClient::with_api_root_url("not a url").is_err());
        assert!(IamClient::with_api_root_url("ftp://example.com/").is_err());
    }

    #[test]
    fn test_user_agent() {
        let ua = user_agent();
        assert!(ua.starts_with(&format!("iam-api-rs/{} (", crate::VERSION)));
        assert!(ua.contains(std::env::consts::OS));
    }

    #[test]
    fn test_decode_success() {
        let decoded: TransportResult<Vec<u32>> = decode_response(StatusCode::OK, "[1,2]");
        assert_eq!(decoded.unwrap(), DecodedResponse::Ok(vec![1, 2]));
    }

    #[test]
    fn test_decode_empty_body_as_no_content() {
        let decoded: TransportResult<NoContent> = decode_response(StatusCode::NO_CONTENT, "");
        assert_eq!(decoded.unwrap(), DecodedResponse::Ok(NoContent));
    }

    #[test]
    fn test_decode_unrecognized_success() {
        let decoded: TransportResult<Vec<u32>> = decode_response(StatusCode::OK, r#"{"a":1}"#);
        assert_eq!(
            decoded.unwrap(),
            DecodedResponse::Unrecognized {
                status: 200,
                body: serde_json::json!({"a": 1}),
            }
        );
    }

    #[test]
    fn test_decode_known_error() {
        let decoded: TransportResult<()> =
            decode_response(StatusCode::NOT_FOUND, r#"{"status": 404, "detail": "gone"}"#);
        match decoded.unwrap() {
            DecodedResponse::Error(HttpErrorResponse::NotFound(p)) => {
                assert_eq!(p.detail.as_deref(), Some("gone"))
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_decode_unknown_status() {
        let decoded: TransportResult<()> =
            decode_response(StatusCode::INTERNAL_SERVER_ERROR, r#"{"detail": "oops"}"#);
        assert!(matches!(
            decoded,
            Err(TransportError::UnexpectedStatus { status: 500, .. })
        ));
    }

    #[test]
    fn test_decode_known_status_without_problem_body() {
        let decoded: TransportResult<()> = decode_response(StatusCode::BAD_GATEWAY, "<html>");
        assert!(matches!(
            decoded,
            Err(TransportError::UnexpectedStatus { status: 502, .. })
        ));

        let decoded: TransportResult<()> = decode_response(StatusCode::FORBIDDEN, "denied");
        assert!(matches!(
            decoded,
            Err(TransportError::UnexpectedStatus { status: 403, .. })
        ));
    }

    #[tokio::test]
    async fn test_sends_credentials_and_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/ping")
            .match_header("authorization", "Bearer xyz")
            .match_header("user-agent", user_agent().as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("true")
            .create_async()
            .await;

        let client = IamClient::with_api_root_url(&server.url())
            .unwrap()
            .with_auth(AuthCredential::bearer("xyz"));
        let decoded: TransportResult<bool> = client.get("/ping").await;

        assert_eq!(decoded.unwrap(), DecodedResponse::Ok(true));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_network_failure_is_transport_error() {
        // nothing listens on port 9 (discard) in the test environment
        let client = IamClient::with_api_root_url("http://127.0.0.1:9")
            .unwrap()
            .with_timeout(Duration::from_secs(2));
        let decoded: TransportResult<()> = client.get("/").await;
        assert!(matches!(decoded, Err(TransportError::Network(_))));
    }
}

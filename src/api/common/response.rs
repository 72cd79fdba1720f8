//
//  iam-api
//  api/common/response.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Decoded responses and the response classifier
//!
//! The transport in [`crate::api::client`] decodes every HTTP response into a
//! [`DecodedResponse`]: the expected payload, one of the seven known error
//! shapes, or an unrecognized success body. Anything else is a
//! [`TransportError`]. [`classify`] folds both into the uniform
//! [`ApiError`](super::ApiError).
//!
//! # Example
//!
//! ```rust
//! use iam_api::api::common::{classify, DecodedResponse, HttpErrorResponse, ProblemDetails};
//!
//! let ok: DecodedResponse<u32> = DecodedResponse::Ok(7);
//! assert_eq!(classify("Demo.Ok", Ok(ok)).unwrap(), 7);
//!
//! let missing: DecodedResponse<u32> =
//!     DecodedResponse::Error(HttpErrorResponse::NotFound(ProblemDetails::new(404, "gone")));
//! let err = classify("Demo.Missing", Ok(missing)).unwrap_err();
//! assert!(err.is_not_found());
//! ```

use std::future::Future;

use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ApiError, Result};

/// Problem document carried by the API's error responses.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Any additional members the API includes.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProblemDetails {
    /// Builds a minimal problem document with a status and detail.
    pub fn new(status: u16, detail: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            detail: Some(detail.into()),
            ..Default::default()
        }
    }

    /// The most specific human readable message available.
    pub fn message(&self) -> String {
        self.detail
            .clone()
            .or_else(|| self.title.clone())
            .unwrap_or_default()
    }
}

/// The fixed set of error responses the API documents.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpErrorResponse {
    BadRequest(ProblemDetails),
    Unauthorized(ProblemDetails),
    Forbidden(ProblemDetails),
    NotFound(ProblemDetails),
    Conflict(ProblemDetails),
    TooManyRequests(ProblemDetails),
    ServiceUnavailable(ProblemDetails),
}

impl HttpErrorResponse {
    /// Selects the variant for a status code.
    ///
    /// Returns `None` for statuses outside the documented set.
    pub fn from_status(status: u16, problem: ProblemDetails) -> Option<Self> {
        match status {
            400 => Some(Self::BadRequest(problem)),
            401 => Some(Self::Unauthorized(problem)),
            403 => Some(Self::Forbidden(problem)),
            404 => Some(Self::NotFound(problem)),
            409 => Some(Self::Conflict(problem)),
            429 => Some(Self::TooManyRequests(problem)),
            503 => Some(Self::ServiceUnavailable(problem)),
            _ => None,
        }
    }

    /// The HTTP status this shape stands for.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::TooManyRequests(_) => 429,
            Self::ServiceUnavailable(_) => 503,
        }
    }

    pub fn problem(&self) -> &ProblemDetails {
        match self {
            Self::BadRequest(p)
            | Self::Unauthorized(p)
            | Self::Forbidden(p)
            | Self::NotFound(p)
            | Self::Conflict(p)
            | Self::TooManyRequests(p)
            | Self::ServiceUnavailable(p) => p,
        }
    }
}

/// Outcome of one HTTP call after body decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedResponse<T> {
    /// Success payload of the expected type.
    Ok(T),
    /// One of the documented error responses.
    Error(HttpErrorResponse),
    /// A success status whose body is not the expected type.
    Unrecognized {
        status: u16,
        body: serde_json::Value,
    },
}

/// Failures where no decodable response exists.
#[derive(Error, Debug)]
pub enum TransportError {
    /// A status outside the documented set, or a documented error status
    /// without a problem document.
    #[error("unexpected status code {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// Connection, timeout, TLS or request encoding failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Success payload for operations that answer `204 No Content`.
///
/// Decodes from an empty body and ignores any body the API does send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NoContent;

impl<'de> Deserialize<'de> for NoContent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer)?;
        Ok(NoContent)
    }
}

/// Pulls a readable message out of an arbitrary error body.
///
/// Recognizes problem documents (`detail`, `title`), `{"message": ...}` and
/// `{"error": {"message": ...}}`. Falls back to the raw body.
pub fn extract_detail(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message", "title"] {
            if let Some(message) = json.get(key).and_then(|m| m.as_str()) {
                return message.to_string();
            }
        }

        if let Some(message) = json
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return message.to_string();
        }
    }

    body.trim().to_string()
}

/// Converts one transport outcome into the typed value or an [`ApiError`].
///
/// Pure and stateless: equal inputs always produce equal results.
///
/// # Parameters
///
/// * `method` - Operation label used in the error message, e.g. `"Folder.Read"`
/// * `outcome` - What the transport produced for the call
///
/// # Returns
///
/// - `Ok(T)` when the response carried the expected payload
/// - `Err(ApiError::Api)` for documented error responses and unexpected statuses
/// - `Err(ApiError::Transport)` when no response was received
/// - `Err(ApiError::UnexpectedResponse)` when a success body did not decode
pub fn classify<T>(
    method: &str,
    outcome: std::result::Result<DecodedResponse<T>, TransportError>,
) -> Result<T> {
    match outcome {
        Ok(DecodedResponse::Ok(value)) => Ok(value),
        Ok(DecodedResponse::Error(response)) => {
            let problem = response.problem();
            let status = problem.status.unwrap_or_else(|| response.status_code());
            tracing::debug!(method, status, "classified error response");
            Err(ApiError::Api {
                method: method.to_string(),
                status,
                detail: problem.message(),
                body: serde_json::to_value(problem).ok(),
            })
        }
        Ok(DecodedResponse::Unrecognized { status, body }) => {
            tracing::debug!(method, status, "unrecognized response body");
            Err(ApiError::UnexpectedResponse {
                method: method.to_string(),
                status,
                value: body.to_string(),
            })
        }
        Err(TransportError::UnexpectedStatus { status, body }) => {
            tracing::debug!(method, status, "unexpected status code");
            Err(ApiError::Api {
                method: method.to_string(),
                status,
                detail: extract_detail(&body),
                body: serde_json::from_str(&body).ok(),
            })
        }
        Err(source) => Err(ApiError::Transport {
            method: method.to_string(),
            source,
        }),
    }
}

/// Awaits a single transport call and classifies its outcome.
///
/// The future is awaited exactly once. Nothing is retried.
///
/// # Example
///
/// ```rust,no_run
/// use iam_api::api::common::error_from_decoded_response;
/// use iam_api::api::folder::Folder;
/// use iam_api::IamClient;
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = IamClient::new()?;
/// let folder: Folder =
///     error_from_decoded_response("Folder.Read", client.get("/folders/1")).await?;
/// # Ok(())
/// # }
/// ```
pub async fn error_from_decoded_response<T, F>(method: &str, call: F) -> Result<T>
where
    F: Future<Output = std::result::Result<DecodedResponse<T>, TransportError>>,
{
    classify(method, call.await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statuses() -> [u16; 7] {
        [400, 401, 403, 404, 409, 429, 503]
    }

    #[test]
    fn test_ok_passes_through() {
        let result = classify("Test.Ok", Ok(DecodedResponse::Ok(vec![1, 2, 3])));
        assert_eq!(result.unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_every_known_error_shape() {
        for status in statuses() {
            let problem = ProblemDetails::new(status, format!("detail-{}", status));
            let response = HttpErrorResponse::from_status(status, problem).unwrap();
            assert_eq!(response.status_code(), status);

            let err =
                classify::<()>("Test.Fail", Ok(DecodedResponse::Error(response))).unwrap_err();
            assert_eq!(err.status(), Some(status));
            assert!(err.to_string().contains(&format!("detail-{}", status)));
            assert!(err.to_string().contains("Test.Fail"));
            assert!(err.body().is_some());
        }
    }

    #[test]
    fn test_status_falls_back_to_shape() {
        let problem = ProblemDetails {
            title: Some("Conflict".to_string()),
            ..Default::default()
        };
        let response = HttpErrorResponse::Conflict(problem);
        let err = classify::<()>("Test.Fail", Ok(DecodedResponse::Error(response))).unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(err.detail(), Some("Conflict"));
    }

    #[test]
    fn test_unknown_status_is_not_a_known_shape() {
        assert!(HttpErrorResponse::from_status(500, ProblemDetails::default()).is_none());
        assert!(HttpErrorResponse::from_status(200, ProblemDetails::default()).is_none());
    }

    #[test]
    fn test_unexpected_status_keeps_code_and_message() {
        let outcome: std::result::Result<DecodedResponse<()>, _> =
            Err(TransportError::UnexpectedStatus {
                status: 500,
                body: r#"{"message": "internal failure"}"#.to_string(),
            });
        let err = classify("Test.Fail", outcome).unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.detail(), Some("internal failure"));
        assert!(err.body().is_some());
    }

    #[test]
    fn test_unrecognized_body_is_reported() {
        let outcome: std::result::Result<DecodedResponse<String>, _> =
            Ok(DecodedResponse::Unrecognized {
                status: 200,
                body: serde_json::json!({"unexpected": true}),
            });
        let err = classify("Test.Odd", outcome).unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedResponse { status: 200, .. }));
        assert!(err.to_string().contains("unexpected"));
    }

    #[test]
    fn test_classify_is_idempotent() {
        let response: DecodedResponse<u8> =
            DecodedResponse::Error(HttpErrorResponse::Forbidden(ProblemDetails::new(403, "nope")));

        let first = classify("Test.Twice", Ok(response.clone())).unwrap_err();
        let second = classify("Test.Twice", Ok(response)).unwrap_err();
        assert_eq!(first.to_string(), second.to_string());
        assert_eq!(first.status(), second.status());
        assert_eq!(first.body(), second.body());

        let ok: DecodedResponse<u8> = DecodedResponse::Ok(9);
        assert_eq!(classify("Test.Twice", Ok(ok.clone())).unwrap(), 9);
        assert_eq!(classify("Test.Twice", Ok(ok)).unwrap(), 9);
    }

    #[test]
    fn test_no_content_accepts_anything() {
        let empty: NoContent = serde_json::from_str("null").unwrap();
        assert_eq!(empty, NoContent);
        let body: NoContent = serde_json::from_str(r#"{"ignored": 1}"#).unwrap();
        assert_eq!(body, NoContent);
    }

    #[test]
    fn test_extract_detail_formats() {
        assert_eq!(extract_detail(r#"{"detail": "a"}"#), "a");
        assert_eq!(extract_detail(r#"{"message": "b"}"#), "b");
        assert_eq!(extract_detail(r#"{"error": {"message": "c"}}"#), "c");
        assert_eq!(extract_detail("plain text\n"), "plain text");
    }

    #[tokio::test]
    async fn test_error_from_decoded_response_awaits_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = AtomicUsize::new(0);
        let call = async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(DecodedResponse::Ok("done"))
        };

        let value = error_from_decoded_response("Test.Once", call).await.unwrap();
        assert_eq!(value, "done");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

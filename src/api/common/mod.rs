//
//  iam-api
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the IAM API
//!
//! This module provides shared types used by every resource module: the
//! uniform error type, the response classifier, list envelopes, and the
//! small reference types that several resources embed (principals, role
//! references, list ordering).
//!
//! # Overview
//!
//! - [`ApiError`] - The single error type returned by every resource operation
//! - [`DecodedResponse`] - What the transport produced for one HTTP call
//! - [`error_from_decoded_response`] - Turns a decoded response into `Result<T, ApiError>`
//! - [`Page`] - List envelope (re-exported from the [`pagination`] submodule)
//! - [`Principal`] / [`PolicyRole`] - Binding building blocks shared by IAM and ID policies
//!
//! # Example
//!
//! ```rust
//! use iam_api::api::common::ApiError;
//!
//! fn report<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(e) if e.is_not_found() => println!("Nothing there: {}", e),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Notes
//!
//! - Every failure path is normalized into [`ApiError`] before it reaches a caller
//! - The method label (e.g. `"Folder.Read"`) is always part of the error message

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod pagination;
mod response;

pub use pagination::*;
pub use response::*;

/// Result alias used by every resource operation.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Unified error type for all IAM API operations.
///
/// Every resource method funnels its single HTTP call through
/// [`error_from_decoded_response`], which produces one of these variants.
/// The variants mirror the three failure classes a caller can observe:
///
/// | Variant | Meaning | HTTP Status |
/// |---------|---------|-------------|
/// | `Api` | The API answered with an error status | 4xx / 5xx |
/// | `Transport` | The request never produced a response | N/A |
/// | `UnexpectedResponse` | A success status with an undecodable body | 2xx |
///
/// # Example
///
/// ```rust
/// use iam_api::api::common::ApiError;
///
/// let err = ApiError::Api {
///     method: "Folder.Read".to_string(),
///     status: 404,
///     detail: "folder xyz not found".to_string(),
///     body: None,
/// };
///
/// assert!(err.is_not_found());
/// assert!(err.to_string().contains("folder xyz not found"));
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// The API returned an error status.
    ///
    /// Covers both the seven recognized problem responses
    /// (400/401/403/404/409/429/503) and any other status the transport
    /// reported as unexpected.
    ///
    /// # Parameters
    ///
    /// - `method` - Operation label, e.g. `"Project.Create"`
    /// - `status` - HTTP status code
    /// - `detail` - Human readable detail extracted from the error body
    /// - `body` - The error body as JSON, when it was JSON
    #[error("iam: {method}: HTTP {status}: {detail}")]
    Api {
        method: String,
        status: u16,
        detail: String,
        body: Option<serde_json::Value>,
    },

    /// The request failed before a response was decoded.
    ///
    /// This covers connection failures, timeouts, TLS errors and request
    /// bodies that could not be encoded.
    #[error("iam: {method}: {source}")]
    Transport {
        method: String,
        #[source]
        source: TransportError,
    },

    /// The API answered with a success status but the body did not match
    /// the expected payload type.
    ///
    /// This is a contract violation between the client and the API, not an
    /// ordinary runtime failure.
    #[error("iam: {method}: unexpected response (HTTP {status}): {value}")]
    UnexpectedResponse {
        method: String,
        status: u16,
        value: String,
    },
}

impl ApiError {
    /// Returns the operation label this error was produced for.
    pub fn method(&self) -> &str {
        match self {
            Self::Api { method, .. }
            | Self::Transport { method, .. }
            | Self::UnexpectedResponse { method, .. } => method,
        }
    }

    /// Returns the HTTP status code, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::UnexpectedResponse { status, .. } => Some(*status),
            Self::Transport { .. } => None,
        }
    }

    /// Returns the detail message extracted from an error response.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Api { detail, .. } => Some(detail),
            _ => None,
        }
    }

    /// Returns the raw error body, when the API sent a JSON one.
    pub fn body(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Api { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    fn has_status(&self, code: u16) -> bool {
        matches!(self, Self::Api { status, .. } if *status == code)
    }

    /// `true` for HTTP 400 responses.
    pub fn is_bad_request(&self) -> bool {
        self.has_status(400)
    }

    /// `true` for HTTP 401 responses.
    pub fn is_unauthorized(&self) -> bool {
        self.has_status(401)
    }

    /// `true` for HTTP 403 responses.
    pub fn is_forbidden(&self) -> bool {
        self.has_status(403)
    }

    /// `true` for HTTP 404 responses.
    pub fn is_not_found(&self) -> bool {
        self.has_status(404)
    }

    /// `true` for HTTP 409 responses.
    pub fn is_conflict(&self) -> bool {
        self.has_status(409)
    }

    /// `true` for HTTP 429 responses.
    pub fn is_rate_limited(&self) -> bool {
        self.has_status(429)
    }

    /// `true` for HTTP 503 responses.
    pub fn is_service_unavailable(&self) -> bool {
        self.has_status(503)
    }
}

/// Reports whether any error in the chain is an [`ApiError`] for HTTP 404.
///
/// Works on plain `ApiError` values as well as errors wrapped by `anyhow`
/// or other error types that expose the `ApiError` as a source.
///
/// # Example
///
/// ```rust
/// use iam_api::api::common::{is_not_found_error, ApiError};
///
/// let err = anyhow::Error::new(ApiError::Api {
///     method: "User.Read".to_string(),
///     status: 404,
///     detail: "no such user".to_string(),
///     body: None,
/// })
/// .context("loading user");
///
/// assert!(is_not_found_error(err.as_ref()));
/// ```
pub fn is_not_found_error(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(api) = e.downcast_ref::<ApiError>() {
            if api.is_not_found() {
                return true;
            }
        }
        current = e.source();
    }
    false
}

/// A subject that policy bindings grant roles to.
///
/// The API identifies principals by a type string (`"user"`,
/// `"service-principal"`, ...) and a numeric id.
///
/// # Example
///
/// ```rust
/// use iam_api::api::common::Principal;
///
/// let principal = Principal::service_principal(42);
/// assert_eq!(principal.kind.as_deref(), Some("service-principal"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Principal {
    /// Principal type, e.g. `"user"` or `"service-principal"`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Resource id of the principal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl Principal {
    /// Creates a service principal reference.
    pub fn service_principal(id: i64) -> Self {
        Self {
            kind: Some("service-principal".to_string()),
            id: Some(id),
        }
    }

    /// Creates a user reference.
    pub fn user(id: i64) -> Self {
        Self {
            kind: Some("user".to_string()),
            id: Some(id),
        }
    }
}

/// Whether a role is provided by the platform or defined by the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    Preset,
    Custom,
}

/// Role reference inside a policy binding.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PolicyRole {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<RoleType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl PolicyRole {
    /// References a preset role by id, e.g. `"organization-admin"`.
    pub fn preset(id: impl Into<String>) -> Self {
        Self {
            kind: Some(RoleType::Preset),
            id: Some(id.into()),
        }
    }
}

/// Sort order accepted by the list endpoints.
///
/// A leading `-` in the wire value means descending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ordering {
    #[serde(rename = "created_at")]
    CreatedAt,
    #[serde(rename = "-created_at")]
    CreatedAtDesc,
    #[serde(rename = "updated_at")]
    UpdatedAt,
    #[serde(rename = "-updated_at")]
    UpdatedAtDesc,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "-name")]
    NameDesc,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16) -> ApiError {
        ApiError::Api {
            method: "Test.Op".to_string(),
            status,
            detail: "boom".to_string(),
            body: None,
        }
    }

    #[test]
    fn test_status_predicates() {
        assert!(api_error(400).is_bad_request());
        assert!(api_error(401).is_unauthorized());
        assert!(api_error(403).is_forbidden());
        assert!(api_error(404).is_not_found());
        assert!(api_error(409).is_conflict());
        assert!(api_error(429).is_rate_limited());
        assert!(api_error(503).is_service_unavailable());
        assert!(!api_error(500).is_not_found());
    }

    #[test]
    fn test_display_carries_method_and_detail() {
        let err = api_error(404);
        assert_eq!(err.to_string(), "iam: Test.Op: HTTP 404: boom");
        assert_eq!(err.method(), "Test.Op");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.detail(), Some("boom"));
    }

    #[test]
    fn test_unexpected_response_is_not_an_http_error() {
        let err = ApiError::UnexpectedResponse {
            method: "Test.Op".to_string(),
            status: 200,
            value: "[]".to_string(),
        };
        assert!(!err.is_not_found());
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn test_is_not_found_error_walks_chain() {
        let wrapped = anyhow::Error::new(api_error(404)).context("outer");
        assert!(is_not_found_error(wrapped.as_ref()));

        let other = anyhow::Error::new(api_error(403)).context("outer");
        assert!(!is_not_found_error(other.as_ref()));
    }

    #[test]
    fn test_principal_wire_format() {
        let json = serde_json::to_value(Principal::service_principal(7)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "service-principal", "id": 7}));
    }

    #[test]
    fn test_ordering_wire_format() {
        let json = serde_json::to_value(Ordering::CreatedAtDesc).unwrap();
        assert_eq!(json, serde_json::json!("-created_at"));
    }
}

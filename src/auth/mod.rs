//
//  iam-api
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Credentials accepted by the IAM API and how they are attached to
//! outgoing requests.
//!
//! ## Supported Authentication Methods
//!
//! - **Access token**: An API key pair (token and secret) sent as HTTP Basic
//!   authentication. This is what the control panel issues.
//! - **Bearer token**: An OAuth2 access token, for example one obtained from
//!   a service principal with
//!   [`ServicePrincipalApi::issue_token`](crate::api::service_principal::ServicePrincipalApi::issue_token).
//!
//! ## Example
//!
//! ```rust,no_run
//! use iam_api::auth::AuthCredential;
//! use iam_api::IamClient;
//!
//! let client = IamClient::new()?
//!     .with_auth(AuthCredential::access_token("token", "secret"));
//! # Ok::<(), anyhow::Error>(())
//! ```

use reqwest::RequestBuilder;

/// Credentials applied to every request a client sends.
#[derive(Clone)]
pub enum AuthCredential {
    /// Access token and secret, sent as HTTP Basic authentication.
    AccessToken { token: String, secret: String },

    /// OAuth2 bearer token.
    Bearer { token: String },
}

impl AuthCredential {
    pub fn access_token(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self::AccessToken {
            token: token.into(),
            secret: secret.into(),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Adds the matching `Authorization` header to a request.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::AccessToken { token, secret } => request.basic_auth(token, Some(secret)),
            Self::Bearer { token } => request.bearer_auth(token),
        }
    }

    /// Short name of the method, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AccessToken { .. } => "access-token",
            Self::Bearer { .. } => "bearer",
        }
    }
}

impl std::fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // secrets never reach logs
        match self {
            Self::AccessToken { token, .. } => f
                .debug_struct("AccessToken")
                .field("token", token)
                .field("secret", &"<redacted>")
                .finish(),
            Self::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_header() {
        let client = reqwest::Client::new();
        let request = AuthCredential::access_token("user", "pass")
            .apply_to_request(client.get("http://localhost/"))
            .build()
            .unwrap();
        let header = request.headers().get("authorization").unwrap();
        // base64("user:pass")
        assert_eq!(header, "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_bearer_header() {
        let client = reqwest::Client::new();
        let request = AuthCredential::bearer("abc")
            .apply_to_request(client.get("http://localhost/"))
            .build()
            .unwrap();
        assert_eq!(request.headers().get("authorization").unwrap(), "Bearer abc");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug = format!("{:?}", AuthCredential::access_token("tok", "very-secret"));
        assert!(debug.contains("tok"));
        assert!(!debug.contains("very-secret"));
        assert!(!format!("{:?}", AuthCredential::bearer("hidden")).contains("hidden"));
    }
}

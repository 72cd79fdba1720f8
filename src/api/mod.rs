//
//  iam-api
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! Typed access to the IAM REST API.
//!
//! ## Architecture
//!
//! - [`client`]: The shared HTTP transport with authentication and decoding
//! - [`common`]: The uniform error, the response classifier, pagination
//! - One module per resource type, each exposing a trait and its `*Op` implementation
//!
//! ## Usage
//!
//! ```rust,no_run
//! use iam_api::api::iam_policy::{IamPolicyApi, IamPolicyOp};
//! use iam_api::IamClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = IamClient::new()?;
//! let bindings = IamPolicyOp::new(&client).read_organization_policy().await?;
//! println!("{} bindings", bindings.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`common::Result`], whose error is [`ApiError`]:
//!
//! - `is_unauthorized()`: 401 Unauthorized
//! - `is_forbidden()`: 403 Forbidden
//! - `is_not_found()`: 404 Not Found
//! - `is_conflict()`: 409 Conflict
//! - `is_rate_limited()`: 429 Too Many Requests

/// Core HTTP client for the IAM API.
pub mod client;

/// Shared types: [`ApiError`], the response classifier, [`common::Page`].
pub mod common;

/// Organization password policy and sign-in conditions.
pub mod auth;

/// Folders, the containers projects are organized in.
pub mod folder;

/// User groups and their memberships.
pub mod group;

/// IAM policy bindings on the organization, folders and projects.
pub mod iam_policy;

/// Read-only catalogue of IAM roles.
pub mod iam_role;

/// ID policy bindings on the organization.
pub mod id_policy;

/// Read-only catalogue of ID roles.
pub mod id_role;

/// The organization itself and its service policy rules.
pub mod organization;

/// Projects.
pub mod project;

/// Project API keys (`/compat/api-keys`).
pub mod project_api_key;

/// Organization service policy switch and rule templates.
pub mod service_policy;

/// Service principals, their keys, and token issuance.
pub mod service_principal;

/// SSO profiles.
pub mod sso;

/// Users (`/compat/users`).
pub mod user;

/// Two-factor authentication settings of a single user.
pub mod user_2fa;

pub use client::IamClient;
pub use common::ApiError;

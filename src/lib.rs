//
//  iam-api
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # IAM API Client Library
//!
//! A typed async client for the SAKURA Cloud Identity and Access Management
//! REST API.
//!
//! ## Overview
//!
//! Each resource type has a small trait (`FolderApi`, `UserApi`, ...) and a
//! single implementation (`FolderOp`, `UserOp`, ...) that borrows a shared
//! [`IamClient`]. Every trait method performs exactly one HTTP call and
//! returns either the typed payload or an [`ApiError`].
//!
//! ## Module Structure
//!
//! - [`api`]: The transport, the response classifier, and one module per resource
//! - [`auth`]: Credentials and how they are applied to requests
//! - [`config`]: Endpoint and credential resolution from file and environment
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use iam_api::api::folder::{CreateParams, FolderApi, FolderOp};
//! use iam_api::{Config, IamClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = IamClient::from_config(&Config::load()?)?;
//! let folders = FolderOp::new(&client);
//!
//! let folder = folders
//!     .create(CreateParams {
//!         name: "my-folder".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("Created folder #{}", folder.id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! | Failure | Variant |
//! |---------|---------|
//! | Documented error response (400/401/403/404/409/429/503) | `ApiError::Api` |
//! | Any other non-success status | `ApiError::Api` |
//! | Connection, timeout or TLS failure | `ApiError::Transport` |
//! | Success status with an undecodable body | `ApiError::UnexpectedResponse` |

/// The transport, response classification, and resource operations.
pub mod api;

/// Authentication credentials.
pub mod auth;

/// Configuration file and environment handling.
///
/// Configuration is stored in platform-specific locations:
/// - Linux: `~/.config/iam-api/config.toml`
/// - macOS: `~/Library/Application Support/iam-api/config.toml`
/// - Windows: `%APPDATA%\iam-api\config.toml`
pub mod config;

/// Command-line interface of the `iam-permit` tool.
pub mod cli;

/// Table and JSON output for the command-line tool.
pub mod output;

#[cfg(test)]
pub(crate) mod testutil;

pub use api::auth::AuthApi;
pub use api::client::IamClient;
pub use api::folder::FolderApi;
pub use api::group::GroupApi;
pub use api::iam_policy::IamPolicyApi;
pub use api::iam_role::IamRoleApi;
pub use api::id_policy::IdPolicyApi;
pub use api::id_role::IdRoleApi;
pub use api::organization::OrganizationApi;
pub use api::project::ProjectApi;
pub use api::project_api_key::ProjectApiKeyApi;
pub use api::service_policy::ServicePolicyApi;
pub use api::service_principal::ServicePrincipalApi;
pub use api::sso::SsoApi;
pub use api::user::UserApi;
pub use api::user_2fa::User2faApi;
pub use api::common::{is_not_found_error, ApiError};
pub use config::Config;

/// Application name, used for the configuration directory.
pub const APP_NAME: &str = "iam-api";

/// Library version, derived from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Production API root.
pub const DEFAULT_API_ROOT_URL: &str = "https://secure.sakura.ad.jp/cloud/api/iam/1.0/";

/// Exit codes for the `iam-permit` binary.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: External service issues
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// Credentials missing or rejected (HTTP 401/403).
    pub const AUTH_ERROR: i32 = 4;

    /// The principal or policy does not exist (HTTP 404).
    pub const NOT_FOUND: i32 = 8;

    /// API rate limit exceeded (HTTP 429).
    pub const RATE_LIMIT: i32 = 32;
}

//
//  iam-api
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Resolves the endpoint and credentials a client needs, from a TOML file in
//! the platform configuration directory overlaid with environment variables.
//!
//! ## Configuration File Location
//!
//! | Platform | Path |
//! |----------|------|
//! | Linux | `~/.config/iam-api/config.toml` |
//! | macOS | `~/Library/Application Support/iam-api/config.toml` |
//! | Windows | `%APPDATA%\iam-api\config.toml` |
//!
//! ## Example Configuration File
//!
//! ```toml
//! api_root_url = "https://secure.sakura.ad.jp/cloud/api/iam/1.0/"
//! access_token = "xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"
//! access_token_secret = "..."
//! timeout_secs = 30
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Field |
//! |----------|-------|
//! | `SAKURA_ENDPOINTS_IAM` | `api_root_url` |
//! | `SAKURA_ACCESS_TOKEN` | `access_token` |
//! | `SAKURA_ACCESS_TOKEN_SECRET` | `access_token_secret` |
//! | `SAKURA_BEARER_TOKEN` | `bearer_token` |
//! | `SAKURA_TIMEOUT` | `timeout_secs` |
//!
//! Environment values win over the file.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use iam_api::config::Config;
//!
//! let config = Config::load()?;
//! println!("Endpoint: {}", config.api_root_url());
//! # Ok::<(), anyhow::Error>(())
//! ```

mod file;

pub use file::*;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::auth::AuthCredential;

pub const ENV_API_ROOT_URL: &str = "SAKURA_ENDPOINTS_IAM";
pub const ENV_ACCESS_TOKEN: &str = "SAKURA_ACCESS_TOKEN";
pub const ENV_ACCESS_TOKEN_SECRET: &str = "SAKURA_ACCESS_TOKEN_SECRET";
pub const ENV_BEARER_TOKEN: &str = "SAKURA_BEARER_TOKEN";
pub const ENV_TIMEOUT: &str = "SAKURA_TIMEOUT";

/// Client configuration.
///
/// Every field is optional; an empty configuration talks to the default
/// endpoint without credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// API root URL. Defaults to [`DEFAULT_API_ROOT_URL`](crate::DEFAULT_API_ROOT_URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_root_url: Option<String>,

    /// Access token, used with `access_token_secret` for Basic authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token_secret: Option<String>,

    /// OAuth2 bearer token. Preferred over the access token pair when both are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Loads the configuration file (if any) and applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or an
    /// environment variable holds a malformed value.
    ///
    /// # Notes
    ///
    /// - A missing configuration file is not an error; defaults are used
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if config_exists(&path) {
            Self::load_from(&path)?
        } else {
            Self::default()
        };
        config.apply_env(std::env::vars())?;
        Ok(config)
    }

    /// Loads a configuration file without consulting the environment.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = read_config_file(path)?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Returns the path to the configuration file.
    ///
    /// The file may not exist; this only returns where it would be.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlays values from environment variables.
    ///
    /// Takes the variables as an iterator so callers (and tests) can supply
    /// them without touching the process environment. Empty values are ignored.
    pub fn apply_env<I>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                ENV_API_ROOT_URL => self.api_root_url = Some(value),
                ENV_ACCESS_TOKEN => self.access_token = Some(value),
                ENV_ACCESS_TOKEN_SECRET => self.access_token_secret = Some(value),
                ENV_BEARER_TOKEN => self.bearer_token = Some(value),
                ENV_TIMEOUT => {
                    self.timeout_secs = Some(
                        value
                            .parse()
                            .with_context(|| format!("{} must be a number of seconds", key))?,
                    )
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// The API root to use, falling back to the production endpoint.
    pub fn api_root_url(&self) -> &str {
        self.api_root_url
            .as_deref()
            .unwrap_or(crate::DEFAULT_API_ROOT_URL)
    }

    /// Builds the credential described by this configuration.
    ///
    /// A bearer token wins over an access token pair. An access token
    /// without a secret yields no credential.
    pub fn credential(&self) -> Option<AuthCredential> {
        if let Some(token) = &self.bearer_token {
            return Some(AuthCredential::bearer(token.clone()));
        }
        match (&self.access_token, &self.access_token_secret) {
            (Some(token), Some(secret)) => Some(AuthCredential::access_token(token, secret)),
            _ => None,
        }
    }
}

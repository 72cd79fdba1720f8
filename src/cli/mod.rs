//
//  iam-api
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod permit;
mod policies;

pub use permit::{grant, permit, Binding, PermitCommand, Permitted, IAM_ROLES, ID_ROLES};
pub use policies::{OrganizationBindings, PoliciesCommand};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::output::OutputFormat;
use crate::{exit_codes, ApiError, IamClient};

/// iam-permit - Grant organization administration roles to a service principal
#[derive(Parser, Debug)]
#[command(
    name = "iam-permit",
    version,
    about = "Grant organization administration roles to a service principal",
    long_about = "iam-permit binds the preset organization IAM roles and the identity-admin\n\
                  ID role to a service principal, then prints the resulting bindings.",
    propagate_version = true,
    after_help = "Use 'iam-permit <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Access token
    #[arg(long, global = true, env = "SAKURA_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Access token secret
    #[arg(long, global = true, env = "SAKURA_ACCESS_TOKEN_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// API root URL
    #[arg(long, global = true, env = "SAKURA_ENDPOINTS_IAM")]
    pub endpoint: Option<String>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Overlays the command-line flags on a loaded configuration.
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(token) = &self.token {
            config.access_token = Some(token.clone());
            // an explicit token pair overrides a bearer token from the file
            config.bearer_token = None;
        }
        if let Some(secret) = &self.secret {
            config.access_token_secret = Some(secret.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            config.api_root_url = Some(endpoint.clone());
        }
        config
    }

    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_json_flag(self.json)
    }

    /// Builds an authenticated client from the configuration and flags.
    pub fn client(&self) -> Result<IamClient> {
        let config = self.apply_to(Config::load().context("Failed to load configuration")?);
        if config.credential().is_none() {
            anyhow::bail!(
                "Credentials required. Pass --token and --secret, or set \
                 SAKURA_ACCESS_TOKEN and SAKURA_ACCESS_TOKEN_SECRET."
            );
        }
        IamClient::from_config(&config)
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Grant the administration roles to a service principal
    Permit(PermitCommand),

    /// Show the organization IAM and ID policies
    #[command(visible_alias = "ls")]
    Policies(PoliciesCommand),

    /// Print version information
    Version,
}

/// Maps a command failure to the process exit code.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    let Some(api) = err.chain().find_map(|e| e.downcast_ref::<ApiError>()) else {
        return exit_codes::ERROR;
    };
    if api.is_unauthorized() || api.is_forbidden() {
        exit_codes::AUTH_ERROR
    } else if api.is_not_found() {
        exit_codes::NOT_FOUND
    } else if api.is_rate_limited() {
        exit_codes::RATE_LIMIT
    } else {
        exit_codes::ERROR
    }
}

//
//  iam-api
//  api/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Organization-wide authentication settings: password policy and
//! sign-in conditions.
//!
//! Not to be confused with [`crate::auth`], which holds the credentials
//! this client authenticates with.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::client::IamClient;
use crate::api::common::{error_from_decoded_response, Result};

/// Password rules for users of the organization.
///
/// Every field is required on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PasswordPolicy {
    pub min_length: u32,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_symbols: bool,
}

/// Source address restriction. `mode` is `"allow_all"` or
/// `"allow_list"`; the networks only matter for the latter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IpRestriction {
    pub mode: String,

    #[serde(default)]
    pub source_network: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequireTwoFactorAuth {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatetimeRestriction {
    pub mode: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

/// Conditions every sign-in to the organization must satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthConditions {
    pub ip_restriction: IpRestriction,
    pub require_two_factor_auth: RequireTwoFactorAuth,
    pub datetime_restriction: DatetimeRestriction,
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn read_password_policy(&self) -> Result<PasswordPolicy>;
    async fn update_password_policy(&self, policy: &PasswordPolicy) -> Result<PasswordPolicy>;
    async fn read_auth_conditions(&self) -> Result<AuthConditions>;
    async fn update_auth_conditions(&self, conditions: &AuthConditions) -> Result<AuthConditions>;
}

pub struct AuthOp<'a> {
    client: &'a IamClient,
}

impl<'a> AuthOp<'a> {
    pub fn new(client: &'a IamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthApi for AuthOp<'_> {
    async fn read_password_policy(&self) -> Result<PasswordPolicy> {
        error_from_decoded_response(
            "Auth.ReadPasswordPolicy",
            self.client.get("/organization/password-policy"),
        )
        .await
    }

    async fn update_password_policy(&self, policy: &PasswordPolicy) -> Result<PasswordPolicy> {
        error_from_decoded_response(
            "Auth.UpdatePasswordPolicy",
            self.client.put("/organization/password-policy", policy),
        )
        .await
    }

    async fn read_auth_conditions(&self) -> Result<AuthConditions> {
        error_from_decoded_response(
            "Auth.ReadAuthConditions",
            self.client.get("/organization/auth-conditions"),
        )
        .await
    }

    async fn update_auth_conditions(&self, conditions: &AuthConditions) -> Result<AuthConditions> {
        error_from_decoded_response(
            "Auth.UpdateAuthConditions",
            self.client.put("/organization/auth-conditions", conditions),
        )
        .await
    }
}

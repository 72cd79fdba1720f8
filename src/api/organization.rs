//
//  iam-api
//  api/organization.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Organization API types and operations.
//!
//! The organization is the root of everything else. Besides its name it
//! owns the service policy rule set, which restricts what services the
//! organization's projects may use. Rules are replaced as a whole on update.
//!
//! A rule read back from the server can be turned into an updatable [`Rule`]
//! with `Rule::from(&response)`, which makes the read, modify, write cycle
//! straightforward.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::client::IamClient;
use crate::api::common::{error_from_decoded_response, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(default)]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One entry of a rule specification.
///
/// Only the allow/deny switches are modelled; service-specific fields are
/// carried through untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_all: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deny_all: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleSpec {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default)]
    pub contents: Vec<RuleContent>,
}

impl RuleSpec {
    /// A spec with a single content entry that allows everything.
    pub fn allow_all() -> Self {
        Self {
            kind: None,
            contents: vec![RuleContent {
                allow_all: Some(true),
                deny_all: Some(false),
                extra: Map::new(),
            }],
        }
    }
}

/// A service policy rule as sent to the server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<RuleSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run_spec: Option<RuleSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_dry_run: Option<bool>,
}

/// A service policy rule as returned by the server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<RuleSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run_spec: Option<RuleSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_dry_run: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&RuleResponse> for Rule {
    /// Keeps the code, the flags and any non-empty specs. A rule with
    /// neither spec gets an allow-all spec, as the server rejects rules
    /// without one.
    fn from(response: &RuleResponse) -> Self {
        let non_empty = |spec: &Option<RuleSpec>| {
            spec.as_ref()
                .filter(|s| !s.contents.is_empty())
                .cloned()
        };

        let mut rule = Rule {
            code: response.code.clone(),
            spec: non_empty(&response.spec),
            dry_run_spec: non_empty(&response.dry_run_spec),
            is_active: response.is_active,
            is_dry_run: response.is_dry_run,
        };
        if rule.spec.is_none() && rule.dry_run_spec.is_none() {
            rule.spec = Some(RuleSpec::allow_all());
        }
        rule
    }
}

/// Filters for [`OrganizationApi::read_service_policy`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServicePolicyParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_dry_run: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
struct NameRequest<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct Rules {
    rules: Vec<RuleResponse>,
}

#[derive(Debug, Serialize)]
struct RulesRequest<'a> {
    rules: &'a [Rule],
}

#[async_trait]
pub trait OrganizationApi: Send + Sync {
    async fn read(&self) -> Result<Organization>;
    async fn update(&self, name: &str) -> Result<Organization>;

    async fn read_service_policy(&self, params: ServicePolicyParams) -> Result<Vec<RuleResponse>>;

    /// Replaces the service policy rules and returns the stored rules.
    async fn update_service_policy(&self, rules: &[Rule]) -> Result<Vec<RuleResponse>>;
}

pub struct OrganizationOp<'a> {
    client: &'a IamClient,
}

impl<'a> OrganizationOp<'a> {
    pub fn new(client: &'a IamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrganizationApi for OrganizationOp<'_> {
    async fn read(&self) -> Result<Organization> {
        error_from_decoded_response("Organization.Read", self.client.get("/organization")).await
    }

    async fn update(&self, name: &str) -> Result<Organization> {
        error_from_decoded_response(
            "Organization.Update",
            self.client.put("/organization", &NameRequest { name }),
        )
        .await
    }

    async fn read_service_policy(&self, params: ServicePolicyParams) -> Result<Vec<RuleResponse>> {
        let response: Rules = error_from_decoded_response(
            "Organization.ReadServicePolicy",
            self.client
                .get_with_query("/organization/service-policy", &params),
        )
        .await?;
        Ok(response.rules)
    }

    async fn update_service_policy(&self, rules: &[Rule]) -> Result<Vec<RuleResponse>> {
        let response: Rules = error_from_decoded_response(
            "Organization.UpdateServicePolicy",
            self.client
                .put("/organization/service-policy", &RulesRequest { rules }),
        )
        .await?;
        Ok(response.rules)
    }
}

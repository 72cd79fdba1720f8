//
//  iam-api
//  api/id_policy.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! ID policy API types and operations.
//!
//! ID policies grant identity-management roles (managing users, groups and
//! SSO) and exist only at the organization level. Like IAM policies they
//! are replaced as a whole on update.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::client::IamClient;
use crate::api::common::{error_from_decoded_response, PolicyRole, Principal, Result};
use crate::api::iam_policy::Bindings;

/// One ID policy binding: an ID role granted to principals.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IdPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<PolicyRole>,

    #[serde(default)]
    pub principals: Vec<Principal>,
}

impl IdPolicy {
    pub fn new(role: PolicyRole, principals: Vec<Principal>) -> Self {
        Self {
            role: Some(role),
            principals,
        }
    }
}

#[async_trait]
pub trait IdPolicyApi: Send + Sync {
    async fn read_organization_id_policy(&self) -> Result<Vec<IdPolicy>>;

    /// Replaces the organization ID policy and returns the stored bindings.
    async fn update_organization_id_policy(&self, bindings: &[IdPolicy]) -> Result<Vec<IdPolicy>>;
}

pub struct IdPolicyOp<'a> {
    client: &'a IamClient,
}

impl<'a> IdPolicyOp<'a> {
    pub fn new(client: &'a IamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdPolicyApi for IdPolicyOp<'_> {
    async fn read_organization_id_policy(&self) -> Result<Vec<IdPolicy>> {
        let response: Bindings<IdPolicy> = error_from_decoded_response(
            "IdPolicy.ReadOrganizationIdPolicy",
            self.client.get("/organization/id-policy"),
        )
        .await?;
        Ok(response.bindings)
    }

    async fn update_organization_id_policy(&self, bindings: &[IdPolicy]) -> Result<Vec<IdPolicy>> {
        let request = Bindings {
            bindings: bindings.to_vec(),
        };
        let response: Bindings<IdPolicy> = error_from_decoded_response(
            "IdPolicy.UpdateOrganizationIdPolicy",
            self.client.put("/organization/id-policy", &request),
        )
        .await?;
        Ok(response.bindings)
    }
}

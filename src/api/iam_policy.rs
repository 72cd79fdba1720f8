//
//  iam-api
//  api/iam_policy.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! IAM policy API types and operations.
//!
//! An IAM policy is a list of bindings, each granting one role to a set of
//! principals. Policies attach to the organization, to folders and to
//! projects. Updates replace the whole list, so the usual pattern is
//! read, modify, write:
//!
//! # Example
//!
//! ```rust,no_run
//! use iam_api::api::common::{PolicyRole, Principal};
//! use iam_api::api::iam_policy::{IamPolicy, IamPolicyApi, IamPolicyOp};
//! use iam_api::IamClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = IamClient::new()?;
//! let op = IamPolicyOp::new(&client);
//!
//! let mut bindings = op.read_project_policy(42).await?;
//! bindings.push(IamPolicy::new(
//!     PolicyRole::preset("project-viewer"),
//!     vec![Principal::user(7)],
//! ));
//! let bindings = op.update_project_policy(42, &bindings).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Notes
//!
//! - Every method returns the bindings of the response, not the envelope
//! - An empty list clears the policy

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::client::IamClient;
use crate::api::common::{error_from_decoded_response, PolicyRole, Principal, Result};

/// One IAM policy binding: a role granted to principals.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IamPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<PolicyRole>,

    #[serde(default)]
    pub principals: Vec<Principal>,
}

impl IamPolicy {
    pub fn new(role: PolicyRole, principals: Vec<Principal>) -> Self {
        Self {
            role: Some(role),
            principals,
        }
    }
}

/// Request and response envelope of every IAM policy endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Bindings<T> {
    pub bindings: Vec<T>,
}

#[async_trait]
pub trait IamPolicyApi: Send + Sync {
    async fn read_organization_policy(&self) -> Result<Vec<IamPolicy>>;
    async fn update_organization_policy(&self, bindings: &[IamPolicy]) -> Result<Vec<IamPolicy>>;

    async fn read_project_policy(&self, project_id: i64) -> Result<Vec<IamPolicy>>;
    async fn update_project_policy(
        &self,
        project_id: i64,
        bindings: &[IamPolicy],
    ) -> Result<Vec<IamPolicy>>;

    async fn read_folder_policy(&self, folder_id: i64) -> Result<Vec<IamPolicy>>;
    async fn update_folder_policy(
        &self,
        folder_id: i64,
        bindings: &[IamPolicy],
    ) -> Result<Vec<IamPolicy>>;
}

pub struct IamPolicyOp<'a> {
    client: &'a IamClient,
}

impl<'a> IamPolicyOp<'a> {
    pub fn new(client: &'a IamClient) -> Self {
        Self { client }
    }

    async fn read(&self, method: &str, path: &str) -> Result<Vec<IamPolicy>> {
        let response: Bindings<IamPolicy> =
            error_from_decoded_response(method, self.client.get(path)).await?;
        Ok(response.bindings)
    }

    async fn update(
        &self,
        method: &str,
        path: &str,
        bindings: &[IamPolicy],
    ) -> Result<Vec<IamPolicy>> {
        let request = Bindings {
            bindings: bindings.to_vec(),
        };
        let response: Bindings<IamPolicy> =
            error_from_decoded_response(method, self.client.put(path, &request)).await?;
        Ok(response.bindings)
    }
}

#[async_trait]
impl IamPolicyApi for IamPolicyOp<'_> {
    async fn read_organization_policy(&self) -> Result<Vec<IamPolicy>> {
        self.read("IamPolicy.ReadOrganizationPolicy", "/organization/iam-policy")
            .await
    }

    async fn update_organization_policy(&self, bindings: &[IamPolicy]) -> Result<Vec<IamPolicy>> {
        self.update(
            "IamPolicy.UpdateOrganizationPolicy",
            "/organization/iam-policy",
            bindings,
        )
        .await
    }

    async fn read_project_policy(&self, project_id: i64) -> Result<Vec<IamPolicy>> {
        self.read(
            "IamPolicy.ReadProjectPolicy",
            &format!("/projects/{}/iam-policy", project_id),
        )
        .await
    }

    async fn update_project_policy(
        &self,
        project_id: i64,
        bindings: &[IamPolicy],
    ) -> Result<Vec<IamPolicy>> {
        self.update(
            "IamPolicy.UpdateProjectPolicy",
            &format!("/projects/{}/iam-policy", project_id),
            bindings,
        )
        .await
    }

    async fn read_folder_policy(&self, folder_id: i64) -> Result<Vec<IamPolicy>> {
        self.read(
            "IamPolicy.ReadFolderPolicy",
            &format!("/folders/{}/iam-policy", folder_id),
        )
        .await
    }

    async fn update_folder_policy(
        &self,
        folder_id: i64,
        bindings: &[IamPolicy],
    ) -> Result<Vec<IamPolicy>> {
        self.update(
            "IamPolicy.UpdateFolderPolicy",
            &format!("/folders/{}/iam-policy", folder_id),
            bindings,
        )
        .await
    }
}

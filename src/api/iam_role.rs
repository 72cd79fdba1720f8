//
//  iam-api
//  api/iam_role.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! IAM role catalogue (read-only).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::client::IamClient;
use crate::api::common::{error_from_decoded_response, Page, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IamRole {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

#[async_trait]
pub trait IamRoleApi: Send + Sync {
    async fn list(&self, page: Option<u32>, per_page: Option<u32>) -> Result<Page<IamRole>>;
    async fn read(&self, id: &str) -> Result<IamRole>;
}

pub struct IamRoleOp<'a> {
    client: &'a IamClient,
}

impl<'a> IamRoleOp<'a> {
    pub fn new(client: &'a IamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IamRoleApi for IamRoleOp<'_> {
    async fn list(&self, page: Option<u32>, per_page: Option<u32>) -> Result<Page<IamRole>> {
        let query = PageQuery { page, per_page };
        error_from_decoded_response(
            "IamRole.List",
            self.client.get_with_query("/iam-roles", &query),
        )
        .await
    }

    async fn read(&self, id: &str) -> Result<IamRole> {
        error_from_decoded_response("IamRole.Read", self.client.get(&format!("/iam-roles/{}", id)))
            .await
    }
}

//
//  iam-api
//  api/id_role.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! ID role catalogue (read-only).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::client::IamClient;
use crate::api::common::{error_from_decoded_response, Page, Result};
use crate::api::iam_role::PageQuery;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdRole {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,
}

#[async_trait]
pub trait IdRoleApi: Send + Sync {
    async fn list(&self, page: Option<u32>, per_page: Option<u32>) -> Result<Page<IdRole>>;
    async fn read(&self, id: &str) -> Result<IdRole>;
}

pub struct IdRoleOp<'a> {
    client: &'a IamClient,
}

impl<'a> IdRoleOp<'a> {
    pub fn new(client: &'a IamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdRoleApi for IdRoleOp<'_> {
    async fn list(&self, page: Option<u32>, per_page: Option<u32>) -> Result<Page<IdRole>> {
        let query = PageQuery { page, per_page };
        error_from_decoded_response("IdRole.List", self.client.get_with_query("/id-roles", &query))
            .await
    }

    async fn read(&self, id: &str) -> Result<IdRole> {
        error_from_decoded_response("IdRole.Read", self.client.get(&format!("/id-roles/{}", id)))
            .await
    }
}

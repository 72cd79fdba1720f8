//
//  iam-api
//  api/sso.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! SAML single sign-on profiles.
//!
//! A profile describes an external identity provider. At most one profile
//! is linked to the organization at a time; [`SsoApi::link`] and
//! [`SsoApi::unlink`] switch it on and off.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::client::IamClient;
use crate::api::common::{error_from_decoded_response, NoContent, Page, Result};
use crate::api::iam_role::PageQuery;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SsoProfile {
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idp_entity_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idp_login_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idp_logout_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idp_certificate: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sp_entity_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sp_acs_url: Option<String>,

    /// Whether this profile is the one linked to the organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned: Option<bool>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateParams {
    pub name: String,

    pub description: String,

    pub idp_entity_id: String,

    pub idp_login_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub idp_logout_url: Option<String>,

    pub idp_certificate: String,
}

pub type UpdateParams = CreateParams;

#[async_trait]
pub trait SsoApi: Send + Sync {
    async fn list(&self, page: Option<u32>, per_page: Option<u32>) -> Result<Page<SsoProfile>>;
    async fn create(&self, params: CreateParams) -> Result<SsoProfile>;
    async fn read(&self, id: i64) -> Result<SsoProfile>;
    async fn update(&self, id: i64, params: UpdateParams) -> Result<SsoProfile>;
    async fn delete(&self, id: i64) -> Result<()>;

    /// Links the profile to the organization.
    async fn link(&self, id: i64) -> Result<SsoProfile>;
    async fn unlink(&self, id: i64) -> Result<SsoProfile>;
}

pub struct SsoOp<'a> {
    client: &'a IamClient,
}

impl<'a> SsoOp<'a> {
    pub fn new(client: &'a IamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SsoApi for SsoOp<'_> {
    async fn list(&self, page: Option<u32>, per_page: Option<u32>) -> Result<Page<SsoProfile>> {
        let query = PageQuery { page, per_page };
        error_from_decoded_response(
            "Sso.List",
            self.client.get_with_query("/sso-profiles", &query),
        )
        .await
    }

    async fn create(&self, params: CreateParams) -> Result<SsoProfile> {
        error_from_decoded_response("Sso.Create", self.client.post("/sso-profiles", &params)).await
    }

    async fn read(&self, id: i64) -> Result<SsoProfile> {
        error_from_decoded_response("Sso.Read", self.client.get(&format!("/sso-profiles/{}", id)))
            .await
    }

    async fn update(&self, id: i64, params: UpdateParams) -> Result<SsoProfile> {
        error_from_decoded_response(
            "Sso.Update",
            self.client.put(&format!("/sso-profiles/{}", id), &params),
        )
        .await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let _: NoContent = error_from_decoded_response(
            "Sso.Delete",
            self.client.delete(&format!("/sso-profiles/{}", id)),
        )
        .await?;
        Ok(())
    }

    async fn link(&self, id: i64) -> Result<SsoProfile> {
        error_from_decoded_response(
            "Sso.Link",
            self.client
                .post_empty(&format!("/sso-profiles/{}/assign", id)),
        )
        .await
    }

    async fn unlink(&self, id: i64) -> Result<SsoProfile> {
        error_from_decoded_response(
            "Sso.Unlink",
            self.client
                .post_empty(&format!("/sso-profiles/{}/unassign", id)),
        )
        .await
    }
}

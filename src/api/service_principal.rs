//
//  iam-api
//  api/service_principal.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Service principal API types and operations.
//!
//! A service principal is a non-human identity that belongs to a project.
//! It authenticates with key pairs: the public half is uploaded with
//! [`ServicePrincipalApi::upload_key`], and a JWT signed with the private
//! half is exchanged for an access token via
//! [`ServicePrincipalApi::issue_token`].
//!
//! # Key Lifecycle
//!
//! ```text
//! upload_key ──► enabled ◄──► disabled
//!                   │             │
//!                   └─ delete_key ┘
//! ```
//!
//! Signing the assertion is left to the caller.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::client::IamClient;
use crate::api::common::{error_from_decoded_response, NoContent, Ordering, Page, Result};

/// Grant type of the token exchange.
pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePrincipal {
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub project_id: i64,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStatus {
    Enabled,
    Disabled,
}

/// An uploaded public key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePrincipalKey {
    pub id: Uuid,

    /// Key id to put in the `kid` header of signed assertions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,

    pub status: KeyStatus,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Result of a successful token exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,

    pub token_expired_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<Ordering>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateParams {
    pub project_id: i64,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateParams {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListKeysParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<Ordering>,
}

#[derive(Debug, Serialize)]
struct UploadKeyRequest<'a> {
    public_key: &'a str,
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    grant_type: &'static str,
    assertion: &'a str,
}

#[async_trait]
pub trait ServicePrincipalApi: Send + Sync {
    async fn list(&self, params: ListParams) -> Result<Page<ServicePrincipal>>;
    async fn create(&self, params: CreateParams) -> Result<ServicePrincipal>;
    async fn read(&self, id: i64) -> Result<ServicePrincipal>;
    async fn update(&self, id: i64, params: UpdateParams) -> Result<ServicePrincipal>;
    async fn delete(&self, id: i64) -> Result<()>;

    async fn list_keys(&self, id: i64, params: ListKeysParams) -> Result<Page<ServicePrincipalKey>>;

    /// Uploads a PEM encoded public key. New keys start enabled.
    async fn upload_key(&self, id: i64, public_key: &str) -> Result<ServicePrincipalKey>;
    async fn enable_key(&self, id: i64, key_id: Uuid) -> Result<ServicePrincipalKey>;
    async fn disable_key(&self, id: i64, key_id: Uuid) -> Result<ServicePrincipalKey>;
    async fn delete_key(&self, id: i64, key_id: Uuid) -> Result<()>;

    /// Exchanges a signed JWT assertion for an access token.
    async fn issue_token(&self, assertion: &str) -> Result<AccessToken>;
}

pub struct ServicePrincipalOp<'a> {
    client: &'a IamClient,
}

impl<'a> ServicePrincipalOp<'a> {
    pub fn new(client: &'a IamClient) -> Self {
        Self { client }
    }
}

fn key_path(id: i64, key_id: Uuid) -> String {
    format!("/service-principals/{}/keys/{}", id, key_id)
}

#[async_trait]
impl ServicePrincipalApi for ServicePrincipalOp<'_> {
    async fn list(&self, params: ListParams) -> Result<Page<ServicePrincipal>> {
        error_from_decoded_response(
            "ServicePrincipal.List",
            self.client.get_with_query("/service-principals", &params),
        )
        .await
    }

    async fn create(&self, params: CreateParams) -> Result<ServicePrincipal> {
        error_from_decoded_response(
            "ServicePrincipal.Create",
            self.client.post("/service-principals", &params),
        )
        .await
    }

    async fn read(&self, id: i64) -> Result<ServicePrincipal> {
        error_from_decoded_response(
            "ServicePrincipal.Read",
            self.client.get(&format!("/service-principals/{}", id)),
        )
        .await
    }

    async fn update(&self, id: i64, params: UpdateParams) -> Result<ServicePrincipal> {
        error_from_decoded_response(
            "ServicePrincipal.Update",
            self.client
                .put(&format!("/service-principals/{}", id), &params),
        )
        .await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let _: NoContent = error_from_decoded_response(
            "ServicePrincipal.Delete",
            self.client.delete(&format!("/service-principals/{}", id)),
        )
        .await?;
        Ok(())
    }

    async fn list_keys(
        &self,
        id: i64,
        params: ListKeysParams,
    ) -> Result<Page<ServicePrincipalKey>> {
        error_from_decoded_response(
            "ServicePrincipal.ListKeys",
            self.client
                .get_with_query(&format!("/service-principals/{}/keys", id), &params),
        )
        .await
    }

    async fn upload_key(&self, id: i64, public_key: &str) -> Result<ServicePrincipalKey> {
        error_from_decoded_response(
            "ServicePrincipal.UploadKey",
            self.client.post(
                &format!("/service-principals/{}/upload-key", id),
                &UploadKeyRequest { public_key },
            ),
        )
        .await
    }

    async fn enable_key(&self, id: i64, key_id: Uuid) -> Result<ServicePrincipalKey> {
        error_from_decoded_response(
            "ServicePrincipal.EnableKey",
            self.client
                .post_empty(&format!("{}/enable", key_path(id, key_id))),
        )
        .await
    }

    async fn disable_key(&self, id: i64, key_id: Uuid) -> Result<ServicePrincipalKey> {
        error_from_decoded_response(
            "ServicePrincipal.DisableKey",
            self.client
                .post_empty(&format!("{}/disable", key_path(id, key_id))),
        )
        .await
    }

    async fn delete_key(&self, id: i64, key_id: Uuid) -> Result<()> {
        let _: NoContent = error_from_decoded_response(
            "ServicePrincipal.DeleteKey",
            self.client.delete(&key_path(id, key_id)),
        )
        .await?;
        Ok(())
    }

    async fn issue_token(&self, assertion: &str) -> Result<AccessToken> {
        let request = TokenRequest {
            grant_type: JWT_BEARER_GRANT_TYPE,
            assertion,
        };
        error_from_decoded_response(
            "ServicePrincipal.IssueToken",
            self.client
                .post("/service-principals/oauth2/token", &request),
        )
        .await
    }
}

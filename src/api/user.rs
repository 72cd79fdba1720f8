//
//  iam-api
//  api/user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Organization users (the `/compat/users` endpoints).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::client::IamClient;
use crate::api::common::{error_from_decoded_response, NoContent, Ordering, Page, Result};

/// A user.
///
/// `code` is the login name, unique within the organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    pub name: String,

    pub code: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<Ordering>,
}

#[derive(Clone, Default, Serialize)]
pub struct CreateParams {
    pub name: String,

    pub password: String,

    pub code: String,

    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl std::fmt::Debug for CreateParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateParams")
            .field("name", &self.name)
            .field("password", &"********")
            .field("code", &self.code)
            .field("description", &self.description)
            .field("email", &self.email)
            .finish()
    }
}

/// Request body for [`UserApi::update`]. The password is left unchanged
/// when `None`.
#[derive(Clone, Default, Serialize)]
pub struct UpdateParams {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    pub description: String,
}

impl std::fmt::Debug for UpdateParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateParams")
            .field("name", &self.name)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("description", &self.description)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct EmailRequest<'a> {
    email: &'a str,
}

#[async_trait]
pub trait UserApi: Send + Sync {
    async fn list(&self, params: ListParams) -> Result<Page<User>>;
    async fn create(&self, params: CreateParams) -> Result<User>;
    async fn read(&self, id: i64) -> Result<User>;
    async fn update(&self, id: i64, params: UpdateParams) -> Result<User>;
    async fn delete(&self, id: i64) -> Result<()>;

    /// Starts email registration. The server mails a confirmation link.
    async fn register_email(&self, id: i64, email: &str) -> Result<()>;
    async fn unregister_email(&self, id: i64) -> Result<()>;
}

pub struct UserOp<'a> {
    client: &'a IamClient,
}

impl<'a> UserOp<'a> {
    pub fn new(client: &'a IamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserApi for UserOp<'_> {
    async fn list(&self, params: ListParams) -> Result<Page<User>> {
        error_from_decoded_response(
            "User.List",
            self.client.get_with_query("/compat/users", &params),
        )
        .await
    }

    async fn create(&self, params: CreateParams) -> Result<User> {
        error_from_decoded_response("User.Create", self.client.post("/compat/users", &params)).await
    }

    async fn read(&self, id: i64) -> Result<User> {
        error_from_decoded_response("User.Read", self.client.get(&format!("/compat/users/{}", id)))
            .await
    }

    async fn update(&self, id: i64, params: UpdateParams) -> Result<User> {
        error_from_decoded_response(
            "User.Update",
            self.client.put(&format!("/compat/users/{}", id), &params),
        )
        .await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let _: NoContent = error_from_decoded_response(
            "User.Delete",
            self.client.delete(&format!("/compat/users/{}", id)),
        )
        .await?;
        Ok(())
    }

    async fn register_email(&self, id: i64, email: &str) -> Result<()> {
        let _: NoContent = error_from_decoded_response(
            "User.RegisterEmail",
            self.client.post(
                &format!("/compat/users/{}/register-email", id),
                &EmailRequest { email },
            ),
        )
        .await?;
        Ok(())
    }

    async fn unregister_email(&self, id: i64) -> Result<()> {
        let _: NoContent = error_from_decoded_response(
            "User.UnregisterEmail",
            self.client
                .post_empty(&format!("/compat/users/{}/unregister-email", id)),
        )
        .await?;
        Ok(())
    }
}

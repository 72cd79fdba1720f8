//
//  iam-api
//  api/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project API types and operations.
//!
//! Projects hold cloud resources and sit either at the top level of the
//! organization or inside a folder. [`ProjectApi::move_projects`] re-parents
//! several projects at once.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::client::IamClient;
use crate::api::common::{error_from_decoded_response, NoContent, Ordering, Page, Result};

/// A project.
///
/// # Fields
///
/// * `code` - Unique project code chosen at creation
/// * `status` - Lifecycle status reported by the server
/// * `parent_folder_id` - Containing folder, `None` at the top level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,

    pub code: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default)]
    pub parent_folder_id: Option<i64>,

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

    /// Only list projects on which the caller holds this IAM role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iam_role: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_folder_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateParams {
    pub code: String,

    pub name: String,

    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_folder_id: Option<i64>,
}

#[derive(Debug, Serialize)]
struct UpdateRequest<'a> {
    name: &'a str,
    description: &'a str,
}

#[derive(Debug, Serialize)]
struct MoveRequest<'a> {
    project_ids: &'a [i64],
    parent_folder_id: Option<i64>,
}

#[async_trait]
pub trait ProjectApi: Send + Sync {
    async fn list(&self, params: ListParams) -> Result<Page<Project>>;
    async fn create(&self, params: CreateParams) -> Result<Project>;
    async fn read(&self, id: i64) -> Result<Project>;
    async fn update(&self, id: i64, name: &str, description: &str) -> Result<Project>;
    async fn delete(&self, id: i64) -> Result<()>;

    /// Moves projects into a folder, or to the top level when
    /// `parent_folder_id` is `None`.
    async fn move_projects(&self, ids: &[i64], parent_folder_id: Option<i64>) -> Result<()>;
}

pub struct ProjectOp<'a> {
    client: &'a IamClient,
}

impl<'a> ProjectOp<'a> {
    pub fn new(client: &'a IamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProjectApi for ProjectOp<'_> {
    async fn list(&self, params: ListParams) -> Result<Page<Project>> {
        error_from_decoded_response(
            "Project.List",
            self.client.get_with_query("/projects", &params),
        )
        .await
    }

    async fn create(&self, params: CreateParams) -> Result<Project> {
        error_from_decoded_response("Project.Create", self.client.post("/projects", &params)).await
    }

    async fn read(&self, id: i64) -> Result<Project> {
        error_from_decoded_response("Project.Read", self.client.get(&format!("/projects/{}", id)))
            .await
    }

    async fn update(&self, id: i64, name: &str, description: &str) -> Result<Project> {
        let request = UpdateRequest { name, description };
        error_from_decoded_response(
            "Project.Update",
            self.client.put(&format!("/projects/{}", id), &request),
        )
        .await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let _: NoContent = error_from_decoded_response(
            "Project.Delete",
            self.client.delete(&format!("/projects/{}", id)),
        )
        .await?;
        Ok(())
    }

    async fn move_projects(&self, ids: &[i64], parent_folder_id: Option<i64>) -> Result<()> {
        let request = MoveRequest {
            project_ids: ids,
            parent_folder_id,
        };
        let _: NoContent = error_from_decoded_response(
            "Project.Move",
            self.client.post("/move-projects", &request),
        )
        .await?;
        Ok(())
    }
}

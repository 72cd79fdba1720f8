//
//  iam-api
//  api/folder.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Folder API types and operations.
//!
//! Folders form a tree under the organization. Projects live inside
//! folders, and IAM policies set on a folder apply to everything below it.
//!
//! # Folder Hierarchy
//!
//! ```text
//! Organization
//! ├── Folder
//! │   ├── Folder
//! │   │   └── Project
//! │   └── Project
//! └── Project
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use iam_api::api::folder::{CreateParams, FolderApi, FolderOp};
//! use iam_api::IamClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = IamClient::new()?;
//! let op = FolderOp::new(&client);
//!
//! let parent = op.create(CreateParams { name: "parent".into(), ..Default::default() }).await?;
//! let child = op.create(CreateParams { name: "child".into(), ..Default::default() }).await?;
//!
//! // Re-parent the child, then move it back to the top level
//! op.move_folders(&[child.id], Some(parent.id)).await?;
//! op.move_folders(&[child.id], None).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::client::IamClient;
use crate::api::common::{error_from_decoded_response, NoContent, Page, Result};

/// A folder in the organization tree.
///
/// # Fields
///
/// * `id` - Folder id
/// * `name` - Folder name
/// * `description` - Free-form description
/// * `parent_id` - Parent folder, `None` at the top level
/// * `created_at` / `updated_at` - Timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub parent_id: Option<i64>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Query parameters for [`FolderApi::list`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,

    /// Filter by folder name.
    #[serde(rename = "folder_name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Only list children of this folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

/// Request body for [`FolderApi::create`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateParams {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

#[derive(Debug, Serialize)]
struct UpdateRequest<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct MoveRequest<'a> {
    folder_ids: &'a [i64],
    // always sent; null moves the folders to the top level
    parent_id: Option<i64>,
}

/// Folder operations.
#[async_trait]
pub trait FolderApi: Send + Sync {
    /// Lists folders, one page at a time.
    async fn list(&self, params: ListParams) -> Result<Page<Folder>>;

    /// Creates a folder.
    async fn create(&self, params: CreateParams) -> Result<Folder>;

    /// Reads a folder by id.
    ///
    /// # Errors
    ///
    /// A missing folder yields an error for which
    /// [`ApiError::is_not_found`](crate::ApiError::is_not_found) is `true`.
    async fn read(&self, id: i64) -> Result<Folder>;

    /// Renames a folder and replaces its description.
    async fn update(&self, id: i64, name: &str, description: Option<&str>) -> Result<Folder>;

    async fn delete(&self, id: i64) -> Result<()>;

    /// Moves folders under `parent`, or to the top level when `parent` is `None`.
    async fn move_folders(&self, ids: &[i64], parent: Option<i64>) -> Result<()>;
}

/// [`FolderApi`] implementation backed by an [`IamClient`].
pub struct FolderOp<'a> {
    client: &'a IamClient,
}

impl<'a> FolderOp<'a> {
    pub fn new(client: &'a IamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FolderApi for FolderOp<'_> {
    async fn list(&self, params: ListParams) -> Result<Page<Folder>> {
        error_from_decoded_response(
            "Folder.List",
            self.client.get_with_query("/folders", &params),
        )
        .await
    }

    async fn create(&self, params: CreateParams) -> Result<Folder> {
        error_from_decoded_response("Folder.Create", self.client.post("/folders", &params)).await
    }

    async fn read(&self, id: i64) -> Result<Folder> {
        error_from_decoded_response("Folder.Read", self.client.get(&format!("/folders/{}", id)))
            .await
    }

    async fn update(&self, id: i64, name: &str, description: Option<&str>) -> Result<Folder> {
        let request = UpdateRequest { name, description };
        error_from_decoded_response(
            "Folder.Update",
            self.client.put(&format!("/folders/{}", id), &request),
        )
        .await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let _: NoContent = error_from_decoded_response(
            "Folder.Delete",
            self.client.delete(&format!("/folders/{}", id)),
        )
        .await?;
        Ok(())
    }

    async fn move_folders(&self, ids: &[i64], parent: Option<i64>) -> Result<()> {
        let request = MoveRequest {
            folder_ids: ids,
            parent_id: parent,
        };
        let _: NoContent = error_from_decoded_response(
            "Folder.Move",
            self.client.post("/move-folders", &request),
        )
        .await?;
        Ok(())
    }
}

//
//  iam-api
//  api/project_api_key.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project API keys (the `/compat/api-keys` endpoints).
//!
//! The secret half of a key is only ever returned by
//! [`ProjectApiKeyApi::create`]; later reads omit it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::client::IamClient;
use crate::api::common::{error_from_decoded_response, NoContent, Ordering, Page, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectApiKey {
    pub id: i64,

    pub project_id: i64,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub access_token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_resource_id: Option<String>,

    #[serde(default)]
    pub iam_roles: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,

    // these endpoints report timestamps as free-form strings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A freshly created key, including its secret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectApiKeyWithSecret {
    #[serde(flatten)]
    pub key: ProjectApiKey,

    pub access_token_secret: String,
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

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateParams {
    pub project_id: i64,

    pub name: String,

    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_resource_id: Option<String>,

    pub iam_roles: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateParams {
    pub name: String,

    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_resource_id: Option<String>,

    pub iam_roles: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
}

#[async_trait]
pub trait ProjectApiKeyApi: Send + Sync {
    async fn list(&self, params: ListParams) -> Result<Page<ProjectApiKey>>;
    async fn create(&self, params: CreateParams) -> Result<ProjectApiKeyWithSecret>;
    async fn read(&self, id: i64) -> Result<ProjectApiKey>;
    async fn update(&self, id: i64, params: UpdateParams) -> Result<ProjectApiKey>;
    async fn delete(&self, id: i64) -> Result<()>;
}

pub struct ProjectApiKeyOp<'a> {
    client: &'a IamClient,
}

impl<'a> ProjectApiKeyOp<'a> {
    pub fn new(client: &'a IamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProjectApiKeyApi for ProjectApiKeyOp<'_> {
    async fn list(&self, params: ListParams) -> Result<Page<ProjectApiKey>> {
        error_from_decoded_response(
            "ProjectApiKey.List",
            self.client.get_with_query("/compat/api-keys", &params),
        )
        .await
    }

    async fn create(&self, params: CreateParams) -> Result<ProjectApiKeyWithSecret> {
        error_from_decoded_response(
            "ProjectApiKey.Create",
            self.client.post("/compat/api-keys", &params),
        )
        .await
    }

    async fn read(&self, id: i64) -> Result<ProjectApiKey> {
        error_from_decoded_response(
            "ProjectApiKey.Read",
            self.client.get(&format!("/compat/api-keys/{}", id)),
        )
        .await
    }

    async fn update(&self, id: i64, params: UpdateParams) -> Result<ProjectApiKey> {
        error_from_decoded_response(
            "ProjectApiKey.Update",
            self.client
                .put(&format!("/compat/api-keys/{}", id), &params),
        )
        .await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let _: NoContent = error_from_decoded_response(
            "ProjectApiKey.Delete",
            self.client.delete(&format!("/compat/api-keys/{}", id)),
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::*;
    use mockito::Matcher;

    fn fake_key(iam_roles: Vec<String>) -> ProjectApiKey {
        ProjectApiKey {
            id: 11,
            project_id: 123,
            name: random_name("key", 32),
            description: random_string(64),
            access_token: random_string(36),
            server_resource_id: None,
            iam_roles,
            zone_id: Some("is1a".to_string()),
            created_at: Some(fake_time().to_string()),
            updated_at: Some(fake_time().to_string()),
        }
    }

    #[tokio::test]
    async fn test_list() {
        let (mut server, client) = setup().await;
        let expected = Page {
            count: 1,
            from: 0,
            total_count: 1,
            items: vec![fake_key(vec![String::new()])],
        };
        let _mock = mock_json(&mut server, "GET", "/compat/api-keys", 200, &expected).await;

        let actual = ProjectApiKeyOp::new(&client)
            .list(ListParams::default())
            .await
            .unwrap();
        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_list_fail() {
        let (mut server, client) = setup().await;
        let (_mock, detail) = mock_problem(&mut server, "GET", "/compat/api-keys", 403).await;

        let err = ProjectApiKeyOp::new(&client)
            .list(ListParams::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains(&detail));
    }

    #[tokio::test]
    async fn test_create_returns_secret() {
        let (mut server, client) = setup().await;
        let expected = ProjectApiKeyWithSecret {
            key: fake_key(vec!["foo".to_string(), "bar".to_string()]),
            access_token_secret: random_string(64),
        };
        let mock = server
            .mock("POST", "/compat/api-keys")
            .match_body(Matcher::Json(serde_json::json!({
                "project_id": 123,
                "name": expected.key.name,
                "description": expected.key.description,
                "iam_roles": ["foo", "bar"],
                "zone_id": "is1a",
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&expected).unwrap())
            .create_async()
            .await;

        let params = CreateParams {
            project_id: 123,
            name: expected.key.name.clone(),
            description: expected.key.description.clone(),
            server_resource_id: None,
            iam_roles: vec!["foo".to_string(), "bar".to_string()],
            zone_id: Some("is1a".to_string()),
        };
        let actual = ProjectApiKeyOp::new(&client).create(params).await.unwrap();

        assert_eq!(actual, expected);
        assert_eq!(actual.access_token_secret.len(), 64);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_fail() {
        let (mut server, client) = setup().await;
        let (_mock, detail) = mock_problem(&mut server, "POST", "/compat/api-keys", 400).await;

        let err = ProjectApiKeyOp::new(&client)
            .create(CreateParams::default())
            .await
            .unwrap_err();
        assert!(err.is_bad_request());
        assert!(err.to_string().contains(&detail));
    }

    #[tokio::test]
    async fn test_read() {
        let (mut server, client) = setup().await;
        let expected = fake_key(vec!["role1".to_string(), "role2".to_string()]);
        let _mock = mock_json(&mut server, "GET", "/compat/api-keys/11", 200, &expected).await;

        let actual = ProjectApiKeyOp::new(&client).read(11).await.unwrap();
        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn test_read_fail() {
        let (mut server, client) = setup().await;
        let (_mock, detail) = mock_problem(&mut server, "GET", "/compat/api-keys/11", 404).await;

        let err = ProjectApiKeyOp::new(&client).read(11).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains(&detail));
    }

    #[tokio::test]
    async fn test_update() {
        let (mut server, client) = setup().await;
        let expected = fake_key(vec!["role1".to_string()]);
        let mock = server
            .mock("PUT", "/compat/api-keys/11")
            .match_body(Matcher::Json(serde_json::json!({
                "name": expected.name,
                "description": expected.description,
                "iam_roles": ["role1"],
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&expected).unwrap())
            .create_async()
            .await;

        let params = UpdateParams {
            name: expected.name.clone(),
            description: expected.description.clone(),
            iam_roles: vec!["role1".to_string()],
            ..Default::default()
        };
        let actual = ProjectApiKeyOp::new(&client)
            .update(11, params)
            .await
            .unwrap();

        assert_eq!(actual, expected);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete() {
        let (mut server, client) = setup().await;
        let mock = mock_no_content(&mut server, "DELETE", "/compat/api-keys/11").await;

        ProjectApiKeyOp::new(&client).delete(11).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_fail() {
        let (mut server, client) = setup().await;
        let (_mock, detail) =
            mock_problem(&mut server, "DELETE", "/compat/api-keys/11", 404).await;

        let err = ProjectApiKeyOp::new(&client).delete(11).await.unwrap_err();
        assert!(err.to_string().contains(&detail));
    }
}

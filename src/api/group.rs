//
//  iam-api
//  api/group.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Group API types and operations.
//!
//! Groups collect users so a policy binding can grant a role to all of them
//! at once. Membership is replaced as a whole with
//! [`GroupApi::update_memberships`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::client::IamClient;
use crate::api::common::{error_from_decoded_response, NoContent, Ordering, Page, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A user listed as a member of a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<Ordering>,

    /// Only list groups this user belongs to.
    #[serde(rename = "compat_user_id", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

#[derive(Debug, Serialize)]
struct GroupRequest<'a> {
    name: &'a str,
    description: &'a str,
}

#[derive(Debug, Deserialize)]
struct Memberships {
    compat_users: Vec<GroupMember>,
}

#[derive(Debug, Serialize)]
struct MemberRef {
    id: i64,
}

#[derive(Debug, Serialize)]
struct MembershipsRequest {
    compat_users: Vec<MemberRef>,
}

#[async_trait]
pub trait GroupApi: Send + Sync {
    async fn list(&self, params: ListParams) -> Result<Page<Group>>;
    async fn create(&self, name: &str, description: &str) -> Result<Group>;
    async fn read(&self, id: i64) -> Result<Group>;
    async fn update(&self, id: i64, name: &str, description: &str) -> Result<Group>;
    async fn delete(&self, id: i64) -> Result<()>;

    /// Returns the current members of a group.
    async fn read_memberships(&self, id: i64) -> Result<Vec<GroupMember>>;

    /// Replaces the members of a group and returns the new member list.
    async fn update_memberships(&self, id: i64, user_ids: &[i64]) -> Result<Vec<GroupMember>>;
}

pub struct GroupOp<'a> {
    client: &'a IamClient,
}

impl<'a> GroupOp<'a> {
    pub fn new(client: &'a IamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GroupApi for GroupOp<'_> {
    async fn list(&self, params: ListParams) -> Result<Page<Group>> {
        error_from_decoded_response("Group.List", self.client.get_with_query("/groups", &params))
            .await
    }

    async fn create(&self, name: &str, description: &str) -> Result<Group> {
        let request = GroupRequest { name, description };
        error_from_decoded_response("Group.Create", self.client.post("/groups", &request)).await
    }

    async fn read(&self, id: i64) -> Result<Group> {
        error_from_decoded_response("Group.Read", self.client.get(&format!("/groups/{}", id)))
            .await
    }

    async fn update(&self, id: i64, name: &str, description: &str) -> Result<Group> {
        let request = GroupRequest { name, description };
        error_from_decoded_response(
            "Group.Update",
            self.client.put(&format!("/groups/{}", id), &request),
        )
        .await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let _: NoContent = error_from_decoded_response(
            "Group.Delete",
            self.client.delete(&format!("/groups/{}", id)),
        )
        .await?;
        Ok(())
    }

    async fn read_memberships(&self, id: i64) -> Result<Vec<GroupMember>> {
        let memberships: Memberships = error_from_decoded_response(
            "Group.ReadMemberships",
            self.client.get(&format!("/groups/{}/memberships", id)),
        )
        .await?;
        Ok(memberships.compat_users)
    }

    async fn update_memberships(&self, id: i64, user_ids: &[i64]) -> Result<Vec<GroupMember>> {
        let request = MembershipsRequest {
            compat_users: user_ids.iter().map(|&id| MemberRef { id }).collect(),
        };
        let memberships: Memberships = error_from_decoded_response(
            "Group.UpdateMemberships",
            self.client
                .put(&format!("/groups/{}/memberships", id), &request),
        )
        .await?;
        Ok(memberships.compat_users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::*;
    use mockito::Matcher;

    fn fake_group() -> Group {
        Group {
            id: 7,
            name: random_name("group", 16),
            description: random_string(32),
            created_at: Some(fake_time()),
            updated_at: Some(fake_time()),
        }
    }

    fn fake_member(id: i64) -> GroupMember {
        GroupMember {
            id,
            name: Some(random_name("user", 8)),
            code: Some(random_string(8)),
        }
    }

    #[tokio::test]
    async fn test_list() {
        let (mut server, client) = setup().await;
        let expected = Page {
            count: 1,
            from: 0,
            total_count: 1,
            items: vec![fake_group()],
        };
        let mock = server
            .mock("GET", "/groups")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("compat_user_id".into(), "42".into()),
                Matcher::UrlEncoded("ordering".into(), "-created_at".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&expected).unwrap())
            .create_async()
            .await;

        let params = ListParams {
            ordering: Some(Ordering::CreatedAtDesc),
            user_id: Some(42),
            ..Default::default()
        };
        let actual = GroupOp::new(&client).list(params).await.unwrap();

        assert_eq!(actual, expected);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_fail() {
        let (mut server, client) = setup().await;
        let (_mock, detail) = mock_problem(&mut server, "GET", "/groups", 403).await;

        let err = GroupOp::new(&client)
            .list(ListParams::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains(&detail));
    }

    #[tokio::test]
    async fn test_create() {
        let (mut server, client) = setup().await;
        let expected = fake_group();
        let mock = server
            .mock("POST", "/groups")
            .match_body(Matcher::Json(serde_json::json!({
                "name": expected.name,
                "description": expected.description,
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&expected).unwrap())
            .create_async()
            .await;

        let actual = GroupOp::new(&client)
            .create(&expected.name, &expected.description)
            .await
            .unwrap();

        assert_eq!(actual, expected);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_conflict() {
        let (mut server, client) = setup().await;
        let (_mock, detail) = mock_problem(&mut server, "POST", "/groups", 409).await;

        let err = GroupOp::new(&client)
            .create("dup", "dup")
            .await
            .unwrap_err();
        assert!(err.is_conflict());
        assert!(err.to_string().contains(&detail));
    }

    #[tokio::test]
    async fn test_read_and_update() {
        let (mut server, client) = setup().await;
        let expected = fake_group();
        let _read = mock_json(&mut server, "GET", "/groups/7", 200, &expected).await;
        let _update = mock_json(&mut server, "PUT", "/groups/7", 200, &expected).await;

        let op = GroupOp::new(&client);
        assert_eq!(op.read(7).await.unwrap(), expected);
        assert_eq!(op.update(7, "n", "d").await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_read_fail() {
        let (mut server, client) = setup().await;
        let (_mock, _detail) = mock_problem(&mut server, "GET", "/groups/7", 404).await;

        let err = GroupOp::new(&client).read(7).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete() {
        let (mut server, client) = setup().await;
        let mock = mock_no_content(&mut server, "DELETE", "/groups/7").await;

        GroupOp::new(&client).delete(7).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_read_memberships_projects_users() {
        let (mut server, client) = setup().await;
        let members = vec![fake_member(1), fake_member(2)];
        let _mock = mock_json(
            &mut server,
            "GET",
            "/groups/7/memberships",
            200,
            &serde_json::json!({"compat_users": members}),
        )
        .await;

        let actual = GroupOp::new(&client).read_memberships(7).await.unwrap();
        assert_eq!(actual, members);
    }

    #[tokio::test]
    async fn test_update_memberships_sends_ids() {
        let (mut server, client) = setup().await;
        let members = vec![fake_member(3)];
        let mock = server
            .mock("PUT", "/groups/7/memberships")
            .match_body(Matcher::Json(
                serde_json::json!({"compat_users": [{"id": 3}]}),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!({"compat_users": members}).to_string())
            .create_async()
            .await;

        let actual = GroupOp::new(&client)
            .update_memberships(7, &[3])
            .await
            .unwrap();

        assert_eq!(actual, members);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_memberships_fail() {
        let (mut server, client) = setup().await;
        let (_mock, detail) =
            mock_problem(&mut server, "PUT", "/groups/7/memberships", 400).await;

        let err = GroupOp::new(&client)
            .update_memberships(7, &[3])
            .await
            .unwrap_err();
        assert!(err.to_string().contains(&detail));
    }
}

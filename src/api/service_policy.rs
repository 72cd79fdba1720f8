//
//  iam-api
//  api/service_policy.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Service policy switch and rule templates.
//!
//! The rules themselves are managed through
//! [`OrganizationApi`](crate::api::organization::OrganizationApi).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::client::IamClient;
use crate::api::common::{error_from_decoded_response, NoContent, Page, Result};
use crate::api::organization::RuleSpec;

/// A predefined rule that can be copied into the service policy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<RuleSpec>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListRuleTemplatesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Status {
    enabled: bool,
}

#[async_trait]
pub trait ServicePolicyApi: Send + Sync {
    async fn enable(&self) -> Result<()>;
    async fn disable(&self) -> Result<()>;
    async fn is_enabled(&self) -> Result<bool>;
    async fn list_rule_templates(
        &self,
        params: ListRuleTemplatesParams,
    ) -> Result<Page<RuleTemplate>>;
}

pub struct ServicePolicyOp<'a> {
    client: &'a IamClient,
}

impl<'a> ServicePolicyOp<'a> {
    pub fn new(client: &'a IamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ServicePolicyApi for ServicePolicyOp<'_> {
    async fn enable(&self) -> Result<()> {
        let _: NoContent = error_from_decoded_response(
            "ServicePolicy.Enable",
            self.client.post_empty("/enable-service-policy"),
        )
        .await?;
        Ok(())
    }

    async fn disable(&self) -> Result<()> {
        let _: NoContent = error_from_decoded_response(
            "ServicePolicy.Disable",
            self.client.post_empty("/disable-service-policy"),
        )
        .await?;
        Ok(())
    }

    async fn is_enabled(&self) -> Result<bool> {
        let status: Status = error_from_decoded_response(
            "ServicePolicy.IsEnabled",
            self.client.get("/service-policy/status"),
        )
        .await?;
        Ok(status.enabled)
    }

    async fn list_rule_templates(
        &self,
        params: ListRuleTemplatesParams,
    ) -> Result<Page<RuleTemplate>> {
        error_from_decoded_response(
            "ServicePolicy.ListRuleTemplates",
            self.client
                .get_with_query("/service-policy/rule-templates", &params),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_enable() {
        let (mut server, client) = setup().await;
        let mock = mock_no_content(&mut server, "POST", "/enable-service-policy").await;

        ServicePolicyOp::new(&client).enable().await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_enable_fail() {
        let (mut server, client) = setup().await;
        let (_mock, detail) =
            mock_problem(&mut server, "POST", "/enable-service-policy", 403).await;

        let err = ServicePolicyOp::new(&client).enable().await.unwrap_err();
        assert!(err.is_forbidden());
        assert!(err.to_string().contains(&detail));
    }

    #[tokio::test]
    async fn test_disable() {
        let (mut server, client) = setup().await;
        let mock = mock_no_content(&mut server, "POST", "/disable-service-policy").await;

        ServicePolicyOp::new(&client).disable().await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_disable_fail() {
        let (mut server, client) = setup().await;
        let (_mock, detail) =
            mock_problem(&mut server, "POST", "/disable-service-policy", 403).await;

        let err = ServicePolicyOp::new(&client).disable().await.unwrap_err();
        assert!(err.to_string().contains(&detail));
    }

    #[tokio::test]
    async fn test_is_enabled() {
        let (mut server, client) = setup().await;
        let _mock = mock_json(
            &mut server,
            "GET",
            "/service-policy/status",
            200,
            &serde_json::json!({"enabled": true}),
        )
        .await;

        assert!(ServicePolicyOp::new(&client).is_enabled().await.unwrap());
    }

    #[tokio::test]
    async fn test_is_enabled_rejects_malformed_status() {
        let (mut server, client) = setup().await;
        let _mock = mock_json(
            &mut server,
            "GET",
            "/service-policy/status",
            200,
            &serde_json::json!({"enabled": "yes"}),
        )
        .await;

        let err = ServicePolicyOp::new(&client).is_enabled().await.unwrap_err();
        assert!(matches!(err, crate::ApiError::UnexpectedResponse { .. }));
    }

    #[tokio::test]
    async fn test_list_rule_templates() {
        let (mut server, client) = setup().await;
        let expected = Page {
            count: 1,
            from: 0,
            total_count: 1,
            items: vec![RuleTemplate {
                id: Some(1),
                name: Some(random_string(16)),
                code: Some("allow-all".to_string()),
                kind: Some("service".to_string()),
                description: Some(random_string(32)),
                spec: Some(RuleSpec::allow_all()),
            }],
        };
        let mock = server
            .mock("GET", "/service-policy/rule-templates")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("code".into(), "allow-all".into()),
                Matcher::UrlEncoded("per_page".into(), "10".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&expected).unwrap())
            .create_async()
            .await;

        let params = ListRuleTemplatesParams {
            per_page: Some(10),
            code: Some("allow-all".to_string()),
            ..Default::default()
        };
        let actual = ServicePolicyOp::new(&client)
            .list_rule_templates(params)
            .await
            .unwrap();

        assert_eq!(actual, expected);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_rule_templates_fail() {
        let (mut server, client) = setup().await;
        let (_mock, detail) =
            mock_problem(&mut server, "GET", "/service-policy/rule-templates", 503).await;

        let err = ServicePolicyOp::new(&client)
            .list_rule_templates(ListRuleTemplatesParams::default())
            .await
            .unwrap_err();
        assert!(err.is_service_unavailable());
        assert!(err.to_string().contains(&detail));
    }
}

//
//  iam-api
//  tests/integrated.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Live tests against the real API.
//!
//! Skipped unless `TESTACC` is `1` or `true`. Credentials and endpoint are
//! read the same way the tool reads them, from `config.toml` and the
//! `SAKURA_*` environment variables.

use iam_api::api::folder::{CreateParams, FolderOp, ListParams};
use iam_api::api::iam_role::IamRoleOp;
use iam_api::api::organization::OrganizationOp;
use iam_api::{Config, FolderApi, IamClient, IamRoleApi, OrganizationApi};
use rand::distr::{Alphanumeric, SampleString};

fn integrated_client() -> Option<IamClient> {
    match std::env::var("TESTACC").as_deref() {
        Ok("1") | Ok("true") | Ok("TRUE") | Ok("True") => {}
        _ => {
            eprintln!("environment variable TESTACC is not set. skip");
            return None;
        }
    }
    let config = Config::load().unwrap();
    assert!(config.credential().is_some(), "no credentials configured");
    Some(IamClient::from_config(&config).unwrap())
}

fn random_name(prefix: &str) -> String {
    format!("{}-{}", prefix, Alphanumeric.sample_string(&mut rand::rng(), 32))
}

#[tokio::test]
async fn folder_lifecycle() {
    let Some(client) = integrated_client() else {
        return;
    };
    let op = FolderOp::new(&client);

    let name = random_name("folder");
    let folder = op
        .create(CreateParams {
            name: name.clone(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(folder.name, name);

    let renamed = random_name("folder");
    let result = async {
        let list = op.list(ListParams::default()).await?;
        assert!(list.items.iter().any(|f| f.id == folder.id));

        let updated = op.update(folder.id, &renamed, Some("updated")).await?;
        assert_eq!(updated.name, renamed);

        let read = op.read(folder.id).await?;
        assert_eq!(read.name, renamed);
        Ok::<_, iam_api::ApiError>(())
    }
    .await;

    op.delete(folder.id).await.unwrap();
    result.unwrap();

    let err = op.read(folder.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn organization_and_roles_are_readable() {
    let Some(client) = integrated_client() else {
        return;
    };

    let organization = OrganizationOp::new(&client).read().await.unwrap();
    assert!(!organization.name.is_empty());

    let roles = IamRoleOp::new(&client).list(None, None).await.unwrap();
    assert!(roles.items.iter().any(|r| r.id == "owner"));
}

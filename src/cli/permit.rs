//
//  iam-api
//  cli/permit.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Grant the organization administration roles to a service principal.
//!
//! Both policies are updated with a read, append, write cycle. A role the
//! principal already holds is left alone, so running the command twice
//! changes nothing the second time.

use anyhow::{Context, Result};
use clap::Args;

use crate::api::common::{PolicyRole, Principal};
use crate::api::iam_policy::{IamPolicy, IamPolicyApi, IamPolicyOp};
use crate::api::id_policy::{IdPolicy, IdPolicyApi, IdPolicyOp};
use crate::output::OutputWriter;
use crate::IamClient;

use super::{GlobalOptions, OrganizationBindings};

/// Preset IAM roles granted at the organization level.
pub const IAM_ROLES: &[&str] = &[
    "owner",
    "organization-admin",
    "servicepolicy-admin",
    "folder-admin",
    "project-creator",
];

/// Preset ID roles granted at the organization level.
pub const ID_ROLES: &[&str] = &["identity-admin"];

/// Grant the administration roles to a service principal
#[derive(Args, Debug)]
pub struct PermitCommand {
    /// Resource id of the service principal
    #[arg(long, short = 'p', value_parser = clap::value_parser!(i64).range(1..))]
    pub principal: i64,
}

/// A policy binding of either kind.
pub trait Binding: Sized {
    fn bind(role: PolicyRole, principals: Vec<Principal>) -> Self;
    fn role(&self) -> Option<&PolicyRole>;
    fn principals(&self) -> &[Principal];
}

impl Binding for IamPolicy {
    fn bind(role: PolicyRole, principals: Vec<Principal>) -> Self {
        IamPolicy::new(role, principals)
    }

    fn role(&self) -> Option<&PolicyRole> {
        self.role.as_ref()
    }

    fn principals(&self) -> &[Principal] {
        &self.principals
    }
}

impl Binding for IdPolicy {
    fn bind(role: PolicyRole, principals: Vec<Principal>) -> Self {
        IdPolicy::new(role, principals)
    }

    fn role(&self) -> Option<&PolicyRole> {
        self.role.as_ref()
    }

    fn principals(&self) -> &[Principal] {
        &self.principals
    }
}

/// Appends one binding per preset role the principal does not hold yet.
///
/// Returns the number of bindings added.
pub fn grant<B: Binding>(bindings: &mut Vec<B>, roles: &[&str], principal: &Principal) -> usize {
    let mut added = 0;
    for &role in roles {
        let role = PolicyRole::preset(role);
        let held = bindings
            .iter()
            .any(|b| b.role() == Some(&role) && b.principals().contains(principal));
        if !held {
            bindings.push(B::bind(role, vec![principal.clone()]));
            added += 1;
        }
    }
    added
}

/// What a [`permit`] run changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Permitted {
    /// Bindings stored by the server after the update.
    pub bindings: OrganizationBindings,
    /// IAM bindings added by this run.
    pub iam_added: usize,
    /// ID bindings added by this run.
    pub id_added: usize,
}

impl Permitted {
    /// One-line summary for the terminal.
    pub fn summary(&self, principal_id: i64) -> String {
        if self.iam_added == 0 && self.id_added == 0 {
            format!("Service principal {} already holds every role", principal_id)
        } else {
            format!(
                "Granted {} IAM and {} ID roles to service principal {}",
                self.iam_added, self.id_added, principal_id
            )
        }
    }
}

/// Grants [`IAM_ROLES`] and [`ID_ROLES`] to the service principal and
/// returns the bindings stored by the server.
pub async fn permit(client: &IamClient, principal_id: i64) -> Result<Permitted> {
    let principal = Principal::service_principal(principal_id);

    let iam = IamPolicyOp::new(client);
    let mut iam_policies = iam
        .read_organization_policy()
        .await
        .context("Failed to read the organization IAM policy")?;
    let iam_added = grant(&mut iam_policies, IAM_ROLES, &principal);
    tracing::info!(principal_id, added = iam_added, "granting organization IAM roles");
    let iam_policies = iam
        .update_organization_policy(&iam_policies)
        .await
        .context("Failed to update the organization IAM policy")?;

    let id = IdPolicyOp::new(client);
    let mut id_policies = id
        .read_organization_id_policy()
        .await
        .context("Failed to read the organization ID policy")?;
    let id_added = grant(&mut id_policies, ID_ROLES, &principal);
    tracing::info!(principal_id, added = id_added, "granting organization ID roles");
    let id_policies = id
        .update_organization_id_policy(&id_policies)
        .await
        .context("Failed to update the organization ID policy")?;

    Ok(Permitted {
        bindings: OrganizationBindings {
            iam_policies,
            id_policies,
        },
        iam_added,
        id_added,
    })
}

impl PermitCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let permitted = permit(&client, self.principal).await?;

        let writer = OutputWriter::new(global.output_format());
        writer.write(&permitted.bindings)?;
        writer.write_success(&permitted.summary(self.principal));
        Ok(())
    }
}

//
//  iam-api
//  cli/policies.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Show the organization-level policy bindings.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::api::common::{PolicyRole, Principal};
use crate::api::iam_policy::{IamPolicy, IamPolicyApi, IamPolicyOp};
use crate::api::id_policy::{IdPolicy, IdPolicyApi, IdPolicyOp};
use crate::output::{
    format_principals, format_role, print_header, OutputWriter, TableBuilder, TableOutput,
};
use crate::IamClient;

use super::GlobalOptions;

/// Show the organization IAM and ID policies
#[derive(Args, Debug)]
pub struct PoliciesCommand {}

/// Both organization-level policies, as printed by the commands.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OrganizationBindings {
    pub iam_policies: Vec<IamPolicy>,
    pub id_policies: Vec<IdPolicy>,
}

impl OrganizationBindings {
    /// Reads both policies.
    pub async fn read(client: &IamClient) -> Result<Self> {
        let iam_policies = IamPolicyOp::new(client)
            .read_organization_policy()
            .await
            .context("Failed to read the organization IAM policy")?;
        let id_policies = IdPolicyOp::new(client)
            .read_organization_id_policy()
            .await
            .context("Failed to read the organization ID policy")?;
        Ok(Self {
            iam_policies,
            id_policies,
        })
    }
}

fn print_bindings<'a, I>(title: &str, bindings: I, color: bool)
where
    I: IntoIterator<Item = (Option<&'a PolicyRole>, &'a [Principal])>,
{
    print_header(title, color);
    let mut table = TableBuilder::new().color(color).headers(["ROLE", "PRINCIPALS"]);
    let mut empty = true;
    for (role, principals) in bindings {
        table = table.row([format_role(role), format_principals(principals)]);
        empty = false;
    }
    if empty {
        println!("No bindings");
    } else {
        table.print();
    }
}

impl TableOutput for OrganizationBindings {
    fn print_table(&self, color: bool) {
        print_bindings(
            "IAM policies assigned to the organization",
            self.iam_policies
                .iter()
                .map(|p| (p.role.as_ref(), p.principals.as_slice())),
            color,
        );
        println!();
        print_bindings(
            "ID policies assigned to the organization",
            self.id_policies
                .iter()
                .map(|p| (p.role.as_ref(), p.principals.as_slice())),
            color,
        );
    }
}

impl PoliciesCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let bindings = OrganizationBindings::read(&client).await?;

        let writer = OutputWriter::new(global.output_format());
        writer.write(&bindings)?;
        Ok(())
    }
}

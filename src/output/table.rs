//
//  iam-api
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Table Output Formatting
//!
//! Builds `comfy_table` tables with UTF-8 borders and dynamic column widths,
//! plus the cell formatters for policy bindings.
//!
//! ```rust,ignore
//! use iam_api::output::TableBuilder;
//!
//! TableBuilder::new()
//!     .headers(["ROLE", "PRINCIPALS"])
//!     .row(["preset: owner", "service-principal: 42"])
//!     .print();
//! ```

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::api::common::{PolicyRole, Principal, RoleType};

pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
        }
    }

    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(|s| s.into()).collect();
        if self.color {
            let cells: Vec<Cell> = headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)).collect();
            self.table.set_header(cells);
        } else {
            self.table.set_header(headers);
        }
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(|s| s.into()).collect();
        self.table.add_row(row);
        self
    }

    pub fn print(self) {
        println!("{}", self.table);
    }

    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a role as `type: id`, e.g. `preset: owner`.
pub fn format_role(role: Option<&PolicyRole>) -> String {
    let Some(role) = role else {
        return "-".to_string();
    };
    let kind = match role.kind {
        Some(RoleType::Preset) => "preset",
        Some(RoleType::Custom) => "custom",
        None => "?",
    };
    format!("{}: {}", kind, role.id.as_deref().unwrap_or("?"))
}

/// Formats a principal as `type: id`, e.g. `service-principal: 42`.
pub fn format_principal(principal: &Principal) -> String {
    let kind = principal.kind.as_deref().unwrap_or("?");
    match principal.id {
        Some(id) => format!("{}: {}", kind, id),
        None => kind.to_string(),
    }
}

/// Formats principals one per line, for a single table cell.
pub fn format_principals(principals: &[Principal]) -> String {
    if principals.is_empty() {
        return "-".to_string();
    }
    principals
        .iter()
        .map(format_principal)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_role() {
        assert_eq!(format_role(Some(&PolicyRole::preset("owner"))), "preset: owner");
        assert_eq!(format_role(None), "-");

        let custom = PolicyRole {
            kind: Some(RoleType::Custom),
            id: None,
        };
        assert_eq!(format_role(Some(&custom)), "custom: ?");
    }

    #[test]
    fn test_format_principals() {
        let principals = vec![Principal::service_principal(42), Principal::user(7)];
        assert_eq!(
            format_principals(&principals),
            "service-principal: 42\nuser: 7"
        );
        assert_eq!(format_principals(&[]), "-");
    }

    #[test]
    fn test_table_builder_renders_rows() {
        let table = TableBuilder::new()
            .color(false)
            .headers(["ROLE", "PRINCIPALS"])
            .row(["preset: owner", "user: 7"])
            .build();

        let rendered = table.to_string();
        assert!(rendered.contains("ROLE"));
        assert!(rendered.contains("preset: owner"));
        assert!(rendered.contains("user: 7"));
    }
}

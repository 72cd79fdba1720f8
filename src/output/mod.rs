//
//  iam-api
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Output formatting for the `iam-permit` tool. Results are printed either
//! as human-readable tables or as pretty JSON for scripting.
//!
//! ## Example
//!
//! ```rust,ignore
//! use iam_api::output::OutputWriter;
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write(&bindings)?;
//! writer.write_success("Granted 6 roles");
//! ```

mod table;

pub use table::*;

use serde::Serialize;

/// Available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Unicode tables, colored when the terminal supports it.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Maps the `--json` flag to a format.
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// Writes values and status messages in the selected format.
///
/// Color output is detected from the terminal and disabled when output is
/// piped or redirected.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Writes a value as JSON or as a table.
    pub fn write<T: Serialize + TableOutput + ?Sized>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(value)?;
                println!("{}", json);
            }
            OutputFormat::Table => {
                value.print_table(self.color);
            }
        }
        Ok(())
    }

    /// Status lines go to stderr in JSON mode so stdout stays parseable.
    pub fn write_success(&self, msg: &str) {
        use console::style;
        let line = if self.color {
            format!("{} {}", style("✓").green().bold(), msg)
        } else {
            format!("✓ {}", msg)
        };
        match self.format {
            OutputFormat::Json => eprintln!("{}", line),
            OutputFormat::Table => println!("{}", line),
        }
    }
}

/// Types that know how to render themselves as a table.
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

/// Prints a bold section header with an underline.
pub fn print_header(text: &str, color: bool) {
    use console::style;
    if color {
        println!("{}", style(text).bold());
    } else {
        println!("{}", text);
    }
    println!("{}", "-".repeat(text.chars().count()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_json_flag() {
        assert_eq!(OutputFormat::from_json_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_json_flag(false), OutputFormat::Table);
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_writer_keeps_format() {
        let writer = OutputWriter::new(OutputFormat::Json);
        assert_eq!(writer.format, OutputFormat::Json);
    }
}

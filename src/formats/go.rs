//! Go companion file renderer
//!
//! For each structure `Name` the output declares a `_NameColumn` struct with
//! one `string` member per field, a `NameColumns` variable of that type, and
//! an `init` function assigning the tag values. Structures appear in
//! alphabetical order.

use std::fmt::Write;

use crate::codegen::ExtractionResult;
use crate::error::RenderError;
use crate::formats::Renderer;
use crate::golang::format::format_source;

pub const HEADER: &str = "// Code generated by tagcol; DO NOT EDIT.";

pub struct GoRenderer;

impl Renderer for GoRenderer {
    fn name(&self) -> &str {
        "go"
    }

    fn description(&self) -> &str {
        "Go source with column name lookups"
    }

    fn render(&self, result: &ExtractionResult) -> Result<String, RenderError> {
        let mut out = String::new();
        writeln!(out, "{HEADER}")?;
        writeln!(out)?;
        writeln!(out, "package {}", result.package_name)?;
        if result.is_empty() {
            return Ok(out);
        }

        for (name, structure) in &result.structures {
            writeln!(out)?;
            writeln!(out, "type _{name}Column struct {{")?;
            for field in &structure.fields {
                writeln!(out, "{} string", field.name)?;
            }
            writeln!(out, "}}")?;
        }

        writeln!(out)?;
        writeln!(out, "var (")?;
        for name in result.structures.keys() {
            writeln!(out, "{name}Columns _{name}Column")?;
        }
        writeln!(out, ")")?;

        writeln!(out)?;
        writeln!(out, "func init() {{")?;
        for (index, (name, structure)) in result.structures.iter().enumerate() {
            if index > 0 {
                writeln!(out)?;
            }
            writeln!(out, "// define {name} column names")?;
            for field in &structure.fields {
                writeln!(
                    out,
                    "{name}Columns.{} = {}",
                    field.name,
                    quote_go(&field.tag_value)
                )?;
            }
        }
        writeln!(out, "}}")?;

        Ok(out)
    }

    fn format(&self, rendered: String) -> Result<String, RenderError> {
        format_source(&rendered)
    }
}

/// Write `value` as a Go interpreted string literal
pub fn quote_go(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{7}' => quoted.push_str("\\a"),
            '\u{8}' => quoted.push_str("\\b"),
            '\u{c}' => quoted.push_str("\\f"),
            '\u{b}' => quoted.push_str("\\v"),
            c if c.is_control() => {
                let code = c as u32;
                if code < 0x80 {
                    quoted.push_str(&format!("\\x{code:02x}"));
                } else if code <= 0xFFFF {
                    quoted.push_str(&format!("\\u{code:04x}"));
                } else {
                    quoted.push_str(&format!("\\U{code:08x}"));
                }
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
